use thiserror::Error;

use super::model::{Column, ListingTable};

// ---------------------------------------------------------------------------
// Required-column validation
// ---------------------------------------------------------------------------

/// Every column the exploration views reference.  The whole set is checked up
/// front so a partial schema fails with a named error before any view runs,
/// instead of blowing up mid-chart on the first absent column.
pub const REQUIRED_COLUMNS: [Column; 13] = Column::ALL;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("data is missing required column(s): {}", format_columns(.0))]
    MissingColumns(Vec<Column>),
}

fn format_columns(cols: &[Column]) -> String {
    cols.iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that the table carries every required column.
///
/// Called at the exploration-view boundary each render cycle; a failure aborts
/// that view only, other pages stay reachable.
pub fn validate(table: &ListingTable) -> Result<(), SchemaError> {
    let missing: Vec<Column> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !table.has_column(*c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn full_schema_passes() {
        let table = ListingTable::new(Column::ALL.into_iter().collect(), Vec::new());
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn missing_country_is_reported() {
        let columns: BTreeSet<Column> = Column::ALL
            .into_iter()
            .filter(|c| *c != Column::Country)
            .collect();
        let table = ListingTable::new(columns, Vec::new());

        let err = validate(&table).unwrap_err();
        assert_eq!(err, SchemaError::MissingColumns(vec![Column::Country]));
        assert!(err.to_string().contains("'country'"));
    }

    #[test]
    fn all_missing_columns_are_named() {
        let columns: BTreeSet<Column> = Column::ALL
            .into_iter()
            .filter(|c| *c != Column::Country && *c != Column::Price)
            .collect();
        let table = ListingTable::new(columns, Vec::new());

        match validate(&table).unwrap_err() {
            SchemaError::MissingColumns(missing) => {
                assert_eq!(missing, vec![Column::Country, Column::Price]);
            }
        }
    }
}
