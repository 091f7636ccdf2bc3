//! Registry page adapter
//!
//! Everything the pipeline needs from the registry web page, expressed as
//! operations on the page rather than on DOM elements. Selectors and other
//! layout details belong to the implementation (`webdriver::SiteLayout`),
//! so a change on the site touches one adapter, not the pipeline.

pub mod webdriver;

pub use webdriver::{SiteLayout, WebDriverPage};

use crate::error::Result;
use async_trait::async_trait;
use enkk_common::SearchQuery;
use thiserror::Error;

/// Failure to read the status table from an open profile
#[derive(Error, Debug)]
pub enum PageError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("browser command failed: {0}")]
    Command(String),
}

#[async_trait]
pub trait RegistryPage: Send {
    /// Clear and fill the name and number search fields
    async fn fill_search(&mut self, query: &SearchQuery) -> Result<()>;

    /// Open the search toggle if it is closed, then submit the form
    async fn submit(&mut self) -> Result<()>;

    /// Number of profile links on the result page.
    /// A result table that never appears counts as zero results.
    async fn count_results(&mut self) -> Result<usize>;

    /// Open the single result's profile
    async fn open_profile(&mut self) -> Result<()>;

    /// Outer HTML of the profile's status table cell
    async fn status_table_html(&mut self) -> std::result::Result<String, PageError>;
}
