//! Search and disambiguation
//!
//! ```text
//! search -> 1 result   -> open profile
//!        -> 0 results  -> NONAME
//!        -> N results  -> narrowed search -> 1 result -> open profile
//!                                         -> other    -> DUPLICATE
//! ```
//!
//! The narrowed search runs at most once per input row.

use crate::browser::RegistryPage;
use crate::error::Result;
use enkk_common::{InputRecord, LookupError, SearchQuery};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    NoMatch,
    Ambiguous,
}

pub fn decide(result_count: usize) -> Decision {
    match result_count {
        0 => Decision::NoMatch,
        1 => Decision::Accept,
        _ => Decision::Ambiguous,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The single matching profile is open on the page
    ProfileOpened,
    Failed(LookupError),
}

/// Result of resolving one input row, with the query that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub query: SearchQuery,
    pub outcome: Outcome,
}

async fn search<P: RegistryPage + ?Sized>(page: &mut P, query: &SearchQuery) -> Result<usize> {
    page.fill_search(query).await?;
    page.submit().await?;
    page.count_results().await
}

/// Search for `record`, retrying once with a narrower name when ambiguous
pub async fn resolve<P: RegistryPage + ?Sized>(
    page: &mut P,
    record: &InputRecord,
) -> Result<Resolution> {
    let query = SearchQuery::from_record(record);
    let count = search(page, &query).await?;

    match decide(count) {
        Decision::Accept => {
            page.open_profile().await?;
            Ok(Resolution { query, outcome: Outcome::ProfileOpened })
        }
        Decision::NoMatch => Ok(Resolution {
            query,
            outcome: Outcome::Failed(LookupError::NoName),
        }),
        Decision::Ambiguous => {
            let retry = SearchQuery::narrowed(record);
            info!(
                "{} results for '{}', retrying with '{}'",
                count, query.search_name, retry.search_name
            );

            let retry_count = search(page, &retry).await?;
            let outcome = if decide(retry_count) == Decision::Accept {
                page.open_profile().await?;
                Outcome::ProfileOpened
            } else {
                Outcome::Failed(LookupError::Duplicate)
            };

            Ok(Resolution { query: retry, outcome })
        }
    }
}
