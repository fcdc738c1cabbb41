use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};

use super::model::{CellValue, Column, Listing, ListingTable};

// ---------------------------------------------------------------------------
// Memoized fixed-path load
// ---------------------------------------------------------------------------

/// Fixed location of the listings dataset, relative to the working directory.
/// The only external input the program reads; no flags, no env vars.
pub const DATA_PATH: &str = "data/listings.csv";

static TABLE: OnceLock<ListingTable> = OnceLock::new();

/// Load the listings dataset, reading the source at most once per process.
///
/// The first successful call parses [`DATA_PATH`] and stores the table in a
/// single-assignment cache; every later call returns the cached table without
/// touching the filesystem.  A failed load is not cached, but the caller
/// treats it as fatal anyway (the app cannot serve any view without data).
pub fn load() -> Result<&'static ListingTable> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }
    let table = read_csv(Path::new(DATA_PATH))
        .with_context(|| format!("loading listings from {DATA_PATH}"))?;
    log::info!(
        "Loaded {} listings with {} known columns",
        table.len(),
        table.columns.len()
    );
    Ok(TABLE.get_or_init(|| table))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse a listings CSV.  Header row names the columns; headers that are not
/// in the [`Column`] enum are ignored (the source carries far more columns
/// than the views use).
pub fn read_csv(path: &Path) -> Result<ListingTable> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    parse_records(reader)
}

fn parse_records<R: Read>(mut reader: csv::Reader<R>) -> Result<ListingTable> {
    // Map each CSV field index to a known column (None → ignored).
    let header_columns: Vec<Option<Column>> = reader
        .headers()
        .context("reading CSV header")?
        .iter()
        .map(Column::from_name)
        .collect();

    let columns: BTreeSet<Column> = header_columns.iter().flatten().copied().collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut listing = Listing::default();
        for (field_idx, value) in record.iter().enumerate() {
            let Some(Some(column)) = header_columns.get(field_idx) else {
                continue;
            };
            listing.values.insert(*column, sniff_cell_type(value));
        }
        rows.push(listing);
    }

    Ok(ListingTable::new(columns, rows))
}

fn sniff_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ListingTable {
        parse_records(csv::Reader::from_reader(text.as_bytes())).unwrap()
    }

    #[test]
    fn parses_known_columns_and_skips_unknown_ones() {
        let table = parse(
            "country,room_type,price,host_id\n\
             US,Entire home,120.5,999\n\
             FR,Private room,60,1000\n",
        );
        assert_eq!(table.len(), 2);
        assert!(table.has_column(Column::Country));
        assert!(table.has_column(Column::Price));
        assert_eq!(table.columns.len(), 3);

        let first = &table.rows[0];
        assert_eq!(first.text(Column::Country), "US");
        assert_eq!(first.number(Column::Price), Some(120.5));
    }

    #[test]
    fn sniffs_cell_types() {
        assert_eq!(sniff_cell_type(""), CellValue::Null);
        assert_eq!(sniff_cell_type("42"), CellValue::Integer(42));
        assert_eq!(sniff_cell_type("3.25"), CellValue::Float(3.25));
        assert_eq!(sniff_cell_type("true"), CellValue::Bool(true));
        assert_eq!(
            sniff_cell_type("Entire home"),
            CellValue::String("Entire home".into())
        );
    }

    #[test]
    fn empty_cells_become_null() {
        let table = parse("country,price\nUS,\n");
        assert_eq!(*table.rows[0].get(Column::Price), CellValue::Null);
    }

    #[test]
    fn load_is_memoized() {
        // Uses the sample dataset committed at DATA_PATH.
        let first = load().expect("sample dataset should load");
        let second = load().expect("second load should hit the cache");
        assert!(std::ptr::eq(first, second));
        assert!(!first.is_empty());
    }
}
