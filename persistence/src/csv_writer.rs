//! FILENAME: persistence/src/csv_writer.rs
//! Export: writes a filtered view back to CSV in the canonical column order.
//!
//! The output uses the normalized schema headers and the `%Y-%m-%d` date
//! form, so re-loading an export through the reader reproduces the exported
//! rows exactly.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use engine::{Column, FilteredView, Record, EXPORT_ORDER};

use crate::DataFormatError;

const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Exports a filtered view to a CSV file on disk.
pub fn export_csv(view: &FilteredView, path: &Path) -> Result<(), DataFormatError> {
    write_csv(view, File::create(path)?)
}

/// Writes a filtered view as CSV to any writer.
pub fn write_csv<W: Write>(view: &FilteredView, writer: W) -> Result<(), DataFormatError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(EXPORT_ORDER.iter().map(|column| column.header()))?;
    for record in view.rows() {
        out.write_record(EXPORT_ORDER.iter().map(|&column| field_value(record, column)))?;
    }
    out.flush()?;

    Ok(())
}

/// The exported text for one cell. Optional fields export as empty strings,
/// which the reader maps back to `None`.
fn field_value(record: &Record, column: Column) -> String {
    match column {
        Column::RowId => record.row_id.map(|id| id.to_string()).unwrap_or_default(),
        Column::OrderId => record.order_id.clone().unwrap_or_default(),
        Column::OrderDate => record.order_date.format(EXPORT_DATE_FORMAT).to_string(),
        Column::ShipDate => record.ship_date.format(EXPORT_DATE_FORMAT).to_string(),
        Column::CustomerName => record.customer_name.clone(),
        Column::Segment => record.segment.clone(),
        Column::Country => record.country.clone().unwrap_or_default(),
        Column::City => record.city.clone().unwrap_or_default(),
        Column::State => record.state.clone().unwrap_or_default(),
        Column::Region => record.region.clone(),
        Column::ProductName => record.product_name.clone(),
        Column::Category => record.category.clone(),
        Column::SubCategory => record.sub_category.clone(),
        Column::Sales => record.sales.to_string(),
        Column::Profit => record.profit.to_string(),
        Column::Quantity => record.quantity.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::{load_csv, read_csv};
    use chrono::NaiveDate;
    use engine::{CleanedTable, DimensionFilter, FilterSelection};

    fn create_test_table() -> CleanedTable {
        let base = Record {
            row_id: Some(1),
            order_id: Some("CA-2017-1001".to_string()),
            order_date: NaiveDate::from_ymd_opt(2017, 1, 5).unwrap(),
            ship_date: NaiveDate::from_ymd_opt(2017, 1, 9).unwrap(),
            customer_name: "Alice".to_string(),
            segment: "Consumer".to_string(),
            country: Some("United States".to_string()),
            city: Some("Seattle".to_string()),
            state: Some("Washington".to_string()),
            region: "West".to_string(),
            product_name: "Stapler".to_string(),
            category: "Furniture".to_string(),
            sub_category: "Chairs".to_string(),
            sales: 261.96,
            profit: 41.91,
            quantity: 2,
        };

        let mut second = base.clone();
        second.row_id = None;
        second.order_id = None;
        second.country = None;
        second.city = None;
        second.state = None;
        second.customer_name = "Bob".to_string();
        second.region = "East".to_string();
        second.sales = 19.5;
        second.profit = -3.25;

        CleanedTable::new(vec![base, second])
    }

    #[test]
    fn test_round_trip_through_writer_and_reader() {
        let table = create_test_table();
        let view = table.filter(&FilterSelection::all());

        let mut buffer = Vec::new();
        write_csv(&view, &mut buffer).unwrap();

        let outcome = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(outcome.report.rejected_total(), 0);
        assert_eq!(outcome.table.rows(), table.rows());
    }

    #[test]
    fn test_round_trip_of_filtered_subset() {
        let table = create_test_table();
        let mut selection = FilterSelection::all();
        selection.region = DimensionFilter::any_of(["East"]);
        let view = table.filter(&selection);

        let mut buffer = Vec::new();
        write_csv(&view, &mut buffer).unwrap();

        let outcome = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(&outcome.table.rows()[0], view.rows()[0]);
    }

    #[test]
    fn test_export_file_round_trip() {
        let table = create_test_table();
        let view = table.filter(&FilterSelection::all());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        export_csv(&view, &path).unwrap();

        let outcome = load_csv(&path).unwrap();
        assert_eq!(outcome.table.rows(), table.rows());
    }

    #[test]
    fn test_header_row_matches_canonical_order() {
        let table = CleanedTable::default();
        let view = table.filter(&FilterSelection::all());

        let mut buffer = Vec::new();
        write_csv(&view, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "Row ID,Order ID,Order Date,Ship Date,Customer Name,Segment,Country,City,State,\
             Region,Product Name,Category,Sub-Category,Sales,Profit,Quantity"
        );
        assert_eq!(text.lines().count(), 1);
    }
}
