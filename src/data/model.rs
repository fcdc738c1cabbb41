use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the listing table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as sniffed from the CSV source.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for metrics and colour scales.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the closed set of columns the views reference
// ---------------------------------------------------------------------------

/// Every listing-table column any view or filter touches.  Lookups go through
/// this enum instead of raw header strings, so a typo is a compile error and a
/// missing column is a schema error, not a silent empty chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Column {
    Country,
    RoomType,
    PropertyType,
    Price,
    NumberOfReviews,
    ReviewScores,
    BedType,
    IsLocationExact,
    Availability365,
    Latitude,
    Longitude,
    Name,
    Accommodates,
}

impl Column {
    /// Header name in the CSV source.
    pub fn name(self) -> &'static str {
        match self {
            Column::Country => "country",
            Column::RoomType => "room_type",
            Column::PropertyType => "property_type",
            Column::Price => "price",
            Column::NumberOfReviews => "number_of_reviews",
            Column::ReviewScores => "review_scores",
            Column::BedType => "bed_type",
            Column::IsLocationExact => "is_location_exact",
            Column::Availability365 => "availability_365",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::Name => "name",
            Column::Accommodates => "accommodates",
        }
    }

    /// Map a CSV header back to a column; unknown headers are ignored upstream.
    pub fn from_name(name: &str) -> Option<Column> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    pub const ALL: [Column; 13] = [
        Column::Country,
        Column::RoomType,
        Column::PropertyType,
        Column::Price,
        Column::NumberOfReviews,
        Column::ReviewScores,
        Column::BedType,
        Column::IsLocationExact,
        Column::Availability365,
        Column::Latitude,
        Column::Longitude,
        Column::Name,
        Column::Accommodates,
    ];
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the table
// ---------------------------------------------------------------------------

/// A single listing (one row of the source CSV).
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub values: BTreeMap<Column, CellValue>,
}

impl Listing {
    /// Cell value for a column, `Null` when the row has no cell for it.
    pub fn get(&self, column: Column) -> &CellValue {
        self.values.get(&column).unwrap_or(&CellValue::Null)
    }

    /// Numeric view of a cell, `None` for non-numeric or null cells.
    pub fn number(&self, column: Column) -> Option<f64> {
        self.get(column).as_f64()
    }

    /// Text rendering of a cell for labels and hover text.
    pub fn text(&self, column: Column) -> String {
        self.get(column).to_string()
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete in-memory dataset
// ---------------------------------------------------------------------------

/// The loaded dataset: ordered rows plus the set of columns present in the
/// source header.  Immutable after construction; filters return new tables.
#[derive(Debug, Clone)]
pub struct ListingTable {
    pub rows: Vec<Listing>,
    /// Columns that appeared in the source header (a row may still hold
    /// `Null` for a present column).
    pub columns: BTreeSet<Column>,
}

impl ListingTable {
    pub fn new(columns: BTreeSet<Column>, rows: Vec<Listing>) -> Self {
        ListingTable { columns, rows }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_ordering_is_total() {
        let mut vals = vec![
            CellValue::String("b".into()),
            CellValue::Float(1.5),
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::String("a".into()),
            CellValue::Bool(true),
        ];
        vals.sort();
        assert_eq!(vals[0], CellValue::Null);
        assert_eq!(vals[4], CellValue::String("a".into()));
        assert_eq!(vals[5], CellValue::String("b".into()));
    }

    #[test]
    fn float_nan_does_not_break_ordering() {
        let mut vals = vec![CellValue::Float(f64::NAN), CellValue::Float(0.0)];
        vals.sort();
        assert_eq!(vals[0], CellValue::Float(0.0));
    }

    #[test]
    fn column_round_trips_through_name() {
        for col in Column::ALL {
            assert_eq!(Column::from_name(col.name()), Some(col));
        }
        assert_eq!(Column::from_name("host_id"), None);
    }

    #[test]
    fn listing_get_defaults_to_null() {
        let listing = Listing::default();
        assert_eq!(*listing.get(Column::Price), CellValue::Null);
        assert_eq!(listing.number(Column::Price), None);
    }
}
