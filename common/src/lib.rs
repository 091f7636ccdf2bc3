//! ENKK Scraper Common Library
//!
//! Browser-free domain logic shared by the scraper binary and its tests:
//! input/output row types, search query derivation, status table parsing
//! and the person record join.

pub mod types;
pub mod error;
pub mod query;
pub mod parser;
pub mod records;
pub mod export;

pub use types::{
    BasicFields, InputRecord, LookupError, PersonRecord, SearchQuery, StatusRow, COLUMN_ORDER,
};
pub use error::{Error, Result};
pub use parser::{parse_status_table, StatusTable};
pub use records::{error_rows, merge_person, OutputTable};
