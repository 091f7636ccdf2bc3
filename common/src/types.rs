//! Row types
//!
//! - InputRecord: one row of the input spreadsheet
//! - SearchQuery: what gets typed into the registry search form
//! - StatusRow: one licensing qualification of a person (or an error row)
//! - PersonRecord: one output row (basic fields + one status row)

use serde::{Deserialize, Serialize};

/// Output column order. Every PersonRecord is written in exactly this order.
pub const COLUMN_ORDER: [&str; 9] = [
    "Név",
    "Munkakör",
    "Kifizetőhely",
    "Nyilvántartási szám",
    "Érvényesség kezdete",
    "Érvényesség vége",
    "Szakképesítés",
    "Státusz",
    "Korlátozott alkalmasság",
];

/// One person to look up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub name: String,
    /// Registration id, possibly hyphen-suffixed (`12345-A`)
    pub registration_id: String,
    pub job_title: String,
    pub pay_office: String,
}

/// Values typed into the name and number fields of the search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search_name: String,
    pub search_number: String,
}

/// Per-row lookup failure, written to the output in place of real data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookupError {
    /// The search returned no candidates
    #[serde(rename = "NONAME")]
    NoName,
    /// The search and its narrowed retry did not resolve to one candidate
    #[serde(rename = "DUPLICATE")]
    Duplicate,
    /// The profile was opened but its status table had no data rows
    #[serde(rename = "EMPTY")]
    Empty,
    /// The status table could not be read
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl LookupError {
    /// Tag used in the log file
    pub fn tag(&self) -> &'static str {
        match self {
            LookupError::NoName => "NONAME",
            LookupError::Duplicate => "DUPLICATE",
            LookupError::Empty => "EMPTY",
            LookupError::Unknown => "UNKNOWN",
        }
    }

    /// Text written into every status column of the error row
    pub fn message(&self) -> &'static str {
        match self {
            LookupError::NoName => "# HIBA - HIÁNYZÓ NÉV",
            LookupError::Duplicate => "# HIBA - NÉV EGYEZŐSÉG",
            LookupError::Empty => "# HIBA - ÜRES",
            LookupError::Unknown => "# HIBA - ISMERETLEN HIBA",
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One licensing qualification entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub validity_start: String,
    pub validity_end: String,
    pub qualification: String,
    pub status: String,
    pub restricted_fitness: String,
}

impl StatusRow {
    /// Error row: the error message in every column
    pub fn from_error(error: LookupError) -> Self {
        let msg = error.message().to_string();
        Self {
            validity_start: msg.clone(),
            validity_end: msg.clone(),
            qualification: msg.clone(),
            status: msg.clone(),
            restricted_fitness: msg,
        }
    }
}

/// Fixed per-person fields, replicated onto every status row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicFields {
    pub name: String,
    pub job_title: String,
    pub pay_office: String,
    /// Search number (registration id without its suffix)
    pub registration_number: String,
}

impl BasicFields {
    pub fn new(record: &InputRecord, query: &SearchQuery) -> Self {
        Self {
            name: record.name.clone(),
            job_title: record.job_title.clone(),
            pay_office: record.pay_office.clone(),
            registration_number: query.search_number.clone(),
        }
    }
}

/// One output row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "Név")]
    pub name: String,
    #[serde(rename = "Munkakör")]
    pub job_title: String,
    #[serde(rename = "Kifizetőhely")]
    pub pay_office: String,
    #[serde(rename = "Nyilvántartási szám")]
    pub registration_number: String,
    #[serde(rename = "Érvényesség kezdete")]
    pub validity_start: String,
    #[serde(rename = "Érvényesség vége")]
    pub validity_end: String,
    #[serde(rename = "Szakképesítés")]
    pub qualification: String,
    #[serde(rename = "Státusz")]
    pub status: String,
    #[serde(rename = "Korlátozott alkalmasság")]
    pub restricted_fitness: String,
}

impl PersonRecord {
    pub fn new(basic: &BasicFields, status: &StatusRow) -> Self {
        Self {
            name: basic.name.clone(),
            job_title: basic.job_title.clone(),
            pay_office: basic.pay_office.clone(),
            registration_number: basic.registration_number.clone(),
            validity_start: status.validity_start.clone(),
            validity_end: status.validity_end.clone(),
            qualification: status.qualification.clone(),
            status: status.status.clone(),
            restricted_fitness: status.restricted_fitness.clone(),
        }
    }

    /// Cell values in `COLUMN_ORDER`
    pub fn columns(&self) -> [&str; 9] {
        [
            self.name.as_str(),
            self.job_title.as_str(),
            self.pay_office.as_str(),
            self.registration_number.as_str(),
            self.validity_start.as_str(),
            self.validity_end.as_str(),
            self.qualification.as_str(),
            self.status.as_str(),
            self.restricted_fitness.as_str(),
        ]
    }
}
