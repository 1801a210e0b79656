//! CSV export and the bulk-edit sheet.
//!
//! Two formats live here:
//!
//! - the **export**: `name,quantity,price,category`, for spreadsheets and reports;
//! - the **edit sheet**: `id,name,quantity,price`, downloaded, edited offline and
//!   uploaded again for bulk reconciliation.
//!
//! Both operate on rows that were already fetched; nothing here touches the database.

use crate::{
    core::product::ProductRow,
    errors::{Error, Result},
};
use serde::{Deserialize, Serialize};

/// Header of the export format.
pub const EXPORT_HEADER: [&str; 4] = ["name", "quantity", "price", "category"];

/// Header of the edit sheet format.
pub const SHEET_HEADER: [&str; 4] = ["id", "name", "quantity", "price"];

#[derive(Serialize)]
struct ExportRecord<'a> {
    name: &'a str,
    quantity: i64,
    price: String,
    category: &'a str,
}

/// One row of an uploaded edit sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Product identifier the row refers to
    pub id: i64,
    /// Edited name
    pub name: String,
    /// Edited quantity
    pub quantity: i64,
    /// Edited unit price
    pub price: f64,
}

impl From<&ProductRow> for SheetRow {
    fn from(row: &ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            quantity: row.quantity,
            price: row.price,
        }
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Serialises the joined product table. The header row is always present.
///
/// Prices are written with two decimals. Products without a resolvable category
/// get the uncategorised label.
pub fn export_csv(rows: &[ProductRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        writer.serialize(ExportRecord {
            name: &row.name,
            quantity: row.quantity,
            price: format!("{:.2}", row.price),
            category: row.category_label(),
        })?;
    }
    finish(writer)
}

/// Serialises the edit sheet for the given rows.
pub fn edit_sheet_csv(rows: &[ProductRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SHEET_HEADER)?;
    for row in rows {
        writer.serialize(SheetRow::from(row))?;
    }
    finish(writer)
}

/// Parses an uploaded edit sheet.
///
/// Columns are matched by header name, so extra columns (such as `category`)
/// and reordering are tolerated. Surrounding whitespace is trimmed.
///
/// # Errors
/// Returns `Error::InvalidSheet` if a required column is missing, a row is
/// malformed, or the content is not valid UTF-8.
pub fn parse_edit_sheet(bytes: &[u8]) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(|e| Error::InvalidSheet {
        message: format!("unreadable header: {e}"),
    })?;
    if let Some(missing) = SHEET_HEADER
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(Error::InvalidSheet {
            message: format!("missing column '{missing}'"),
        });
    }

    reader
        .deserialize::<SheetRow>()
        .enumerate()
        .map(|(index, record)| {
            record.map_err(|e| Error::InvalidSheet {
                message: format!("row {}: {e}", index + 1),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::row;

    #[test]
    fn test_export_empty_has_header() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv, "name,quantity,price,category\n");
    }

    #[test]
    fn test_export_rows() {
        let mut orphan = row(2, "Chips, salted", 0);
        orphan.category_name = None;
        orphan.price = 3.5;

        let csv = export_csv(&[row(1, "Cola", 12), orphan]).unwrap();
        let expected = "name,quantity,price,category\n\
                        Cola,12,10.00,Test Category\n\
                        \"Chips, salted\",0,3.50,none\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_export_keeps_utf8() {
        let mut r = row(1, "Żubrówka", 3);
        r.category_name = Some("Napoje".to_string());
        let csv = export_csv(&[r]).unwrap();
        assert!(csv.contains("Żubrówka,3,10.00,Napoje"));
    }

    #[test]
    fn test_edit_sheet_round_trip() {
        let rows = vec![row(1, "Cola", 12), row(7, "Water", 0)];
        let sheet = edit_sheet_csv(&rows).unwrap();
        assert!(sheet.starts_with("id,name,quantity,price\n"));

        let parsed = parse_edit_sheet(sheet.as_bytes()).unwrap();
        let expected: Vec<SheetRow> = rows.iter().map(SheetRow::from).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_tolerates_extra_columns_and_whitespace() {
        let input = "price, id ,category,name,quantity\n 2.5 ,4,Drinks, Cola ,10\n";
        let parsed = parse_edit_sheet(input.as_bytes()).unwrap();
        assert_eq!(
            parsed,
            vec![SheetRow {
                id: 4,
                name: "Cola".to_string(),
                quantity: 10,
                price: 2.5,
            }]
        );
    }

    #[test]
    fn test_parse_missing_column() {
        let err = parse_edit_sheet(b"id,name,price\n1,Cola,2.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSheet { ref message } if message.contains("quantity")));
    }

    #[test]
    fn test_parse_malformed_row() {
        let err = parse_edit_sheet(b"id,name,quantity,price\n1,Cola,lots,2.0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidSheet { ref message } if message.starts_with("row 1")));
        assert_eq!(err.kind(), crate::errors::ErrorKind::Validation);
    }

    #[test]
    fn test_parse_invalid_utf8() {
        let bytes = b"id,name,quantity,price\n1,\xff\xfe,1,2.0\n";
        assert!(matches!(
            parse_edit_sheet(bytes),
            Err(Error::InvalidSheet { .. })
        ));
    }
}
