//! Error types

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("status table not found in page fragment")]
    TableNotFound,

    #[error("unexpected status table shape: {0}")]
    ShapeMismatch(String),

    #[error("missing status table column: {0}")]
    MissingColumn(String),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;
