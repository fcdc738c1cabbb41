use std::collections::BTreeSet;

use super::model::{CellValue, Column, ListingTable};

// ---------------------------------------------------------------------------
// Filter & selection operations
// ---------------------------------------------------------------------------
//
// All three take a table by reference and return fresh data; the input is
// never mutated, so repeated calls with the same arguments give the same
// result and subsets can be chained (country → room type cascade).

/// Ordered set of unique values present in `column` of the given table.
///
/// Used to populate dropdowns: because it only sees rows currently in scope,
/// a second-stage dropdown automatically offers only choices compatible with
/// the first-stage selection.  `Null` cells are not offered as choices.
pub fn distinct_values(table: &ListingTable, column: Column) -> BTreeSet<CellValue> {
    table
        .rows
        .iter()
        .map(|row| row.get(column))
        .filter(|v| **v != CellValue::Null)
        .cloned()
        .collect()
}

/// Subset of rows where `column == value`, preserving row order.
///
/// Zero matches yield an empty table; downstream views render empty charts
/// rather than fail.
pub fn filter_by(table: &ListingTable, column: Column, value: &CellValue) -> ListingTable {
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| row.get(column) == value)
        .cloned()
        .collect();
    ListingTable::new(table.columns.clone(), rows)
}

/// The `n` rows with the largest value in `column`, sorted descending.
///
/// The sort is stable, so rows with equal values keep their original relative
/// order.  Rows with no numeric value in `column` sort last and are only
/// included when fewer than `n` numeric rows exist.
pub fn top_n(table: &ListingTable, column: Column, n: usize) -> ListingTable {
    let mut rows = table.rows.clone();
    rows.sort_by(|a, b| {
        let va = a.number(column);
        let vb = b.number(column);
        match (va, vb) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    rows.truncate(n);
    ListingTable::new(table.columns.clone(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::data::model::Listing;

    fn table(rows: &[(&str, &str, f64)]) -> ListingTable {
        let rows = rows
            .iter()
            .map(|(country, room, price)| {
                let mut listing = Listing::default();
                listing
                    .values
                    .insert(Column::Country, CellValue::String(country.to_string()));
                listing
                    .values
                    .insert(Column::RoomType, CellValue::String(room.to_string()));
                listing
                    .values
                    .insert(Column::Price, CellValue::Float(*price));
                listing
            })
            .collect();
        let columns: BTreeSet<Column> = [Column::Country, Column::RoomType, Column::Price]
            .into_iter()
            .collect();
        ListingTable::new(columns, rows)
    }

    #[test]
    fn distinct_values_are_ordered_and_deduplicated() {
        let t = table(&[
            ("US", "Private room", 50.0),
            ("FR", "Entire home", 120.0),
            ("US", "Entire home", 200.0),
        ]);
        let countries: Vec<String> = distinct_values(&t, Column::Country)
            .into_iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(countries, vec!["FR", "US"]);
    }

    #[test]
    fn filter_by_keeps_only_matching_rows() {
        let t = table(&[
            ("US", "Private room", 50.0),
            ("FR", "Entire home", 120.0),
            ("US", "Entire home", 200.0),
        ]);
        let us = filter_by(&t, Column::Country, &CellValue::String("US".into()));
        assert_eq!(us.len(), 2);
        assert!(us
            .rows
            .iter()
            .all(|r| r.text(Column::Country) == "US"));
        // Input table untouched.
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn filter_by_is_idempotent() {
        let t = table(&[
            ("US", "Private room", 50.0),
            ("US", "Entire home", 200.0),
            ("FR", "Entire home", 120.0),
        ]);
        let value = CellValue::String("US".into());
        let once = filter_by(&t, Column::Country, &value);
        let twice = filter_by(&once, Column::Country, &value);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.rows.iter().zip(twice.rows.iter()) {
            assert_eq!(a.values, b.values);
        }
    }

    #[test]
    fn filter_by_unknown_value_yields_empty_table() {
        let t = table(&[("US", "Private room", 50.0)]);
        let none = filter_by(&t, Column::Country, &CellValue::String("DE".into()));
        assert!(none.is_empty());
    }

    #[test]
    fn cascaded_room_types_are_a_subset_of_the_full_domain() {
        let t = table(&[
            ("US", "Entire home", 200.0),
            ("US", "Private room", 50.0),
            ("FR", "Shared room", 20.0),
        ]);
        let all_rooms = distinct_values(&t, Column::RoomType);
        let us = filter_by(&t, Column::Country, &CellValue::String("US".into()));
        let us_rooms = distinct_values(&us, Column::RoomType);

        assert!(!us_rooms.is_empty());
        assert!(us_rooms.is_subset(&all_rooms));
        assert!(!us_rooms.contains(&CellValue::String("Shared room".into())));
    }

    #[test]
    fn top_n_returns_largest_sorted_descending() {
        let t = table(&[
            ("US", "a", 10.0),
            ("US", "b", 90.0),
            ("US", "c", 40.0),
            ("US", "d", 70.0),
        ]);
        let top = top_n(&t, Column::Price, 2);
        let prices: Vec<f64> = top
            .rows
            .iter()
            .map(|r| r.number(Column::Price).unwrap())
            .collect();
        assert_eq!(prices, vec![90.0, 70.0]);
    }

    #[test]
    fn top_n_is_stable_among_ties() {
        let t = table(&[
            ("US", "first", 50.0),
            ("US", "second", 50.0),
            ("US", "third", 50.0),
        ]);
        let top = top_n(&t, Column::Price, 2);
        let names: Vec<String> = top
            .rows
            .iter()
            .map(|r| r.text(Column::RoomType))
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn top_n_caps_at_row_count() {
        let t = table(&[("US", "a", 10.0), ("US", "b", 20.0)]);
        assert_eq!(top_n(&t, Column::Price, 10).len(), 2);
    }
}
