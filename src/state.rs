use std::collections::BTreeSet;

use crate::data::filter::{distinct_values, filter_by};
use crate::data::model::{CellValue, Column, ListingTable};
use crate::data::schema::{self, SchemaError};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The three top-level pages; exactly one is active per render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Explore,
    About,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Explore, Page::About];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Explore => "Data Exploration",
            Page::About => "About",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Subsets are cached and rebuilt on every selection change; the loaded table
/// itself is shared, immutable, and never filtered in place.
pub struct AppState {
    /// The memoized dataset (loaded once per process).
    pub table: &'static ListingTable,

    /// Active page.
    pub page: Page,

    /// First cascade stage: selected country.
    pub country: Option<CellValue>,

    /// Second cascade stage: selected room type, always drawn from the
    /// country subset's room types.
    pub room_type: Option<CellValue>,

    /// Rows matching the selected country (cached).
    pub country_subset: ListingTable,

    /// Rows matching country and room type (cached).
    pub room_subset: ListingTable,

    /// Required-column check, evaluated once against the immutable table.
    /// `Err` blocks the exploration page only; Home/About stay reachable.
    pub schema: Result<(), SchemaError>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: &'static ListingTable) -> Self {
        let schema = schema::validate(table);
        let status_message = match &schema {
            Ok(()) => None,
            Err(err) => {
                log::warn!("Schema check failed: {err}");
                Some(err.to_string())
            }
        };

        let mut state = AppState {
            table,
            page: Page::Home,
            country: None,
            room_type: None,
            country_subset: empty_like(table),
            room_subset: empty_like(table),
            schema,
            status_message,
        };

        // Dropdowns always carry a value, so default to the first country.
        if state.schema.is_ok() {
            state.country = distinct_values(table, Column::Country)
                .into_iter()
                .next();
            state.refilter();
        }
        state
    }

    /// Countries offered by the first dropdown (full table scope).
    pub fn country_options(&self) -> BTreeSet<CellValue> {
        distinct_values(self.table, Column::Country)
    }

    /// Room types offered by the second dropdown: only values present in the
    /// current country subset (cascading).
    pub fn room_type_options(&self) -> BTreeSet<CellValue> {
        distinct_values(&self.country_subset, Column::RoomType)
    }

    /// Select a country; resets the room-type stage to the subset's first
    /// offered value.
    pub fn select_country(&mut self, value: CellValue) {
        if self.country.as_ref() == Some(&value) {
            return;
        }
        self.country = Some(value);
        self.room_type = None;
        self.refilter();
    }

    /// Select a room type.  Values not offered by the current country subset
    /// are ignored, so the second stage can never escape the first.
    pub fn select_room_type(&mut self, value: CellValue) {
        if !self.room_type_options().contains(&value) {
            log::debug!("Ignoring room type not in current country subset: {value}");
            return;
        }
        self.room_type = Some(value);
        self.refilter();
    }

    /// Rebuild the cached subsets from the current selections.
    pub fn refilter(&mut self) {
        self.country_subset = match &self.country {
            Some(country) => filter_by(self.table, Column::Country, country),
            None => empty_like(self.table),
        };

        // Drop a stale room type that the new country no longer offers,
        // defaulting to the first offered value.
        let options = self.room_type_options();
        let stale = match &self.room_type {
            Some(rt) => !options.contains(rt),
            None => true,
        };
        if stale {
            self.room_type = options.into_iter().next();
        }

        self.room_subset = match &self.room_type {
            Some(room) => filter_by(&self.country_subset, Column::RoomType, room),
            None => empty_like(&self.country_subset),
        };

        log::debug!(
            "Filtered to {} rows (country), {} rows (room type)",
            self.country_subset.len(),
            self.room_subset.len()
        );
    }
}

fn empty_like(table: &ListingTable) -> ListingTable {
    ListingTable::new(table.columns.clone(), Vec::new())
}
