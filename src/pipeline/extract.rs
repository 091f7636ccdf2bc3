//! Status extraction from an open profile
//!
//! Page failures and table shape problems are both expected on a site we do
//! not control; they become an UNKNOWN row instead of stopping the run.

use crate::browser::{PageError, RegistryPage};
use enkk_common::{parse_status_table, LookupError, StatusRow, StatusTable};
use log::warn;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Parse(#[from] enkk_common::Error),
}

pub async fn read_status_table<P: RegistryPage + ?Sized>(
    page: &mut P,
) -> Result<StatusTable, ExtractError> {
    let html = page.status_table_html().await?;
    Ok(parse_status_table(&html)?)
}

/// Status rows of the open profile, or the lookup error to record instead
pub async fn extract_status<P: RegistryPage + ?Sized>(
    page: &mut P,
    row_index: usize,
) -> Result<Vec<StatusRow>, LookupError> {
    match read_status_table(page).await {
        Ok(StatusTable::Rows(rows)) => Ok(rows),
        Ok(StatusTable::Empty) => Err(LookupError::Empty),
        Err(e) => {
            warn!("Status table unreadable at row {}: {}", row_index, e);
            Err(LookupError::Unknown)
        }
    }
}
