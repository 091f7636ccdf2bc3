//! Search query derivation
//!
//! The registry search matches on a single surname token plus the
//! registration number, so input names are reduced before typing them in.

use crate::types::{InputRecord, SearchQuery};

const TITLE_PREFIX: &str = "Dr.";

/// Registration id up to its first hyphen
pub fn search_number(registration_id: &str) -> String {
    registration_id
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Last name token, title and hyphens removed, lowercased
///
/// `"Dr. Kovács-Nagy Éva"` -> `"éva"`, `"Szabó-Tóth"` -> `"tóth"`
pub fn search_name(name: &str) -> String {
    name.replace(TITLE_PREFIX, "")
        .replace('-', " ")
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .to_lowercase()
}

/// Last two name tokens with the title removed, used when the first
/// search is ambiguous. Case and hyphens are kept.
pub fn narrowed_search_name(name: &str) -> String {
    let stripped = name.replace(TITLE_PREFIX, "");
    let tokens: Vec<&str> = stripped.split_whitespace().collect();
    let start = tokens.len().saturating_sub(2);
    tokens[start..].join(" ")
}

impl SearchQuery {
    /// First-attempt query for an input row
    pub fn from_record(record: &InputRecord) -> Self {
        Self {
            search_name: search_name(&record.name),
            search_number: search_number(&record.registration_id),
        }
    }

    /// Retry query for an ambiguous first attempt
    pub fn narrowed(record: &InputRecord) -> Self {
        Self {
            search_name: narrowed_search_name(&record.name),
            search_number: search_number(&record.registration_id),
        }
    }
}
