//! Person record assembly
//!
//! Joins a person's fixed fields with each of their status rows and
//! accumulates the result for the whole run.

use crate::types::{BasicFields, LookupError, PersonRecord, StatusRow};

/// Single error row for a failed lookup
pub fn error_rows(error: LookupError) -> Vec<StatusRow> {
    vec![StatusRow::from_error(error)]
}

/// One PersonRecord per status row, basic fields replicated
pub fn merge_person(basic: &BasicFields, status_rows: &[StatusRow]) -> Vec<PersonRecord> {
    status_rows
        .iter()
        .map(|status| PersonRecord::new(basic, status))
        .collect()
}

/// Append-only output of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    rows: Vec<PersonRecord>,
}

impl OutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one person's block
    pub fn append(&mut self, block: Vec<PersonRecord>) {
        self.rows.extend(block);
    }

    pub fn rows(&self) -> &[PersonRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
