//! Data layer: core types, loading, schema validation, and filtering.
//!
//! Architecture:
//! ```text
//!  data/listings.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse CSV once → memoized ListingTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ ListingTable  │  Vec<Listing>, typed Column set
//!   └──────────────┘
//!        │
//!        ├──────────────► schema: required-column check
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  distinct values / equality subsets / top-n
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
