//! Export core shared by the scraper and its tests.

#[cfg(feature = "excel")]
pub mod excel_core;
