//! FILENAME: dashboard/src/main.rs
//! Command-line front end for the dashboard pipeline: load a sales CSV,
//! apply dimension filters, print the summary (text or JSON) and optionally
//! export the filtered rows.
//!
//! The excluded presentation layer consumes the same `DashboardSummary`
//! values this binary prints; nothing here is needed by the library crates.

use std::env;
use std::path::PathBuf;
use std::process;

use engine::{CleanedTable, DimensionFilter, FilterSelection};
use log::info;
use persistence::{export_csv, load_csv, DataFormatError, LoadReport};
use summary_engine::{summarize, DashboardSummary};

const USAGE: &str = "\
Usage: dashboard <input.csv> [options]

Options:
  --region <NAME>          Keep only this region (repeatable)
  --category <NAME>        Keep only this category (repeatable)
  --sub-category <NAME>    Keep only this sub-category (repeatable)
  --export <PATH>          Write the filtered rows to a CSV file
  --json                   Print the summary as JSON instead of text";

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    input: PathBuf,
    regions: Vec<String>,
    categories: Vec<String>,
    sub_categories: Vec<String>,
    export: Option<PathBuf>,
    json: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut input: Option<PathBuf> = None;
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--region" => parsed.regions.push(take_value(&mut args, "--region")?),
            "--category" => parsed.categories.push(take_value(&mut args, "--category")?),
            "--sub-category" => parsed
                .sub_categories
                .push(take_value(&mut args, "--sub-category")?),
            "--export" => parsed.export = Some(PathBuf::from(take_value(&mut args, "--export")?)),
            "--json" => parsed.json = true,
            other if other.starts_with("--") => {
                return Err(format!("Unknown option: {other}"));
            }
            path => {
                if input.replace(PathBuf::from(path)).is_some() {
                    return Err("More than one input file given".to_string());
                }
            }
        }
    }

    parsed.input = input.ok_or_else(|| "No input file given".to_string())?;
    Ok(parsed)
}

fn take_value(args: &mut impl Iterator<Item = String>, option: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("{option} requires a value"))
}

fn selection_from(args: &CliArgs) -> FilterSelection {
    fn dimension(values: &[String]) -> DimensionFilter {
        if values.is_empty() {
            DimensionFilter::All
        } else {
            DimensionFilter::any_of(values.iter().cloned())
        }
    }

    FilterSelection {
        region: dimension(&args.regions),
        category: dimension(&args.categories),
        sub_category: dimension(&args.sub_categories),
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

fn run(args: &CliArgs) -> Result<(), DataFormatError> {
    let outcome = load_csv(&args.input)?;
    info!("load complete: {:?}", outcome.report);

    let selection = selection_from(args);
    let view = outcome.table.filter(&selection);

    let summary = summarize(&view);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
    } else {
        print_load_line(&outcome.report, &outcome.table);
        print_summary(&summary, view.len());
    }

    if let Some(path) = &args.export {
        export_csv(&view, path)?;
        println!("Exported {} rows to {}", view.len(), path.display());
    }

    Ok(())
}

fn print_load_line(report: &LoadReport, table: &CleanedTable) {
    println!(
        "Loaded {} rows ({} excluded: {} bad dates, {} bad numbers, {} missing values)",
        table.len(),
        report.rejected_total(),
        report.rejected_dates,
        report.rejected_numbers,
        report.rejected_missing
    );
}

fn print_summary(summary: &DashboardSummary, filtered_rows: usize) {
    println!();
    println!("=== Key figures ({filtered_rows} rows after filtering) ===");
    println!("Total sales:  {}", format_money(summary.kpis.total_sales));
    println!("Total profit: {}", format_money(summary.kpis.total_profit));
    println!("Total orders: {}", summary.kpis.total_orders);

    println!();
    println!("=== Top customers by sales ===");
    for group in &summary.top_customers {
        println!("  {:<30} {}", group.key, format_money(group.total));
    }

    println!();
    println!("=== Sales by segment ===");
    for group in &summary.sales_by_segment {
        println!("  {:<30} {}", group.key, format_money(group.total));
    }

    println!();
    println!("=== Sales by region ===");
    for group in &summary.sales_by_region {
        println!("  {:<30} {}", group.key, format_money(group.total));
    }

    println!();
    println!("=== Sales by category ===");
    for group in &summary.sales_by_category {
        println!("  {:<30} {}", group.key, format_money(group.total));
    }

    println!();
    println!("=== Monthly sales & profit ===");
    for point in &summary.monthly_trend {
        println!(
            "  {}  sales {:>14}  profit {:>14}",
            point.label(),
            format_money(point.sales),
            format_money(point.profit)
        );
    }

    println!();
    println!("=== Profit vs sales by category ===");
    for entry in &summary.category_breakdown {
        println!(
            "  {:<20} sales {:>14}  profit {:>14}",
            entry.category,
            format_money(entry.sales),
            format_money(entry.profit)
        );
    }

    println!();
    println!("=== Top profitable sub-categories ===");
    for group in &summary.top_sub_categories {
        println!("  {:<30} {}", group.key, format_money(group.total));
    }
}

/// `$1,234.56` formatting, minus sign ahead of the symbol.
fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut digits = whole.to_string();
    let mut grouped = String::new();
    while digits.len() > 3 {
        let split = digits.len() - 3;
        grouped = format!(",{}{}", &digits[split..], grouped);
        digits.truncate(split);
    }
    grouped = format!("{digits}{grouped}");

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

fn main() {
    env_logger::init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!();
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Result<CliArgs, String> {
        parse_args(tokens.iter().map(|t| t.to_string()))
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = parse(&["superstore.csv"]).unwrap();
        assert_eq!(args.input, PathBuf::from("superstore.csv"));
        assert!(args.regions.is_empty());
        assert!(!args.json);
    }

    #[test]
    fn test_parse_repeated_filters() {
        let args = parse(&[
            "superstore.csv",
            "--region",
            "West",
            "--region",
            "East",
            "--category",
            "Furniture",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.regions, vec!["West", "East"]);
        assert_eq!(args.categories, vec!["Furniture"]);
        assert!(args.json);
    }

    #[test]
    fn test_parse_rejects_missing_input() {
        assert!(parse(&["--json"]).is_err());
    }

    #[test]
    fn test_parse_rejects_dangling_option() {
        assert!(parse(&["superstore.csv", "--region"]).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_option() {
        assert!(parse(&["superstore.csv", "--theme"]).is_err());
    }

    #[test]
    fn test_selection_from_args() {
        let args = parse(&["superstore.csv", "--region", "West"]).unwrap();
        let selection = selection_from(&args);

        assert_eq!(selection.region, DimensionFilter::any_of(["West"]));
        assert_eq!(selection.category, DimensionFilter::All);
        assert_eq!(selection.sub_category, DimensionFilter::All);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-42.0), "-$42.00");
    }
}
