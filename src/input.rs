//! Input workbook loader
//!
//! Reads the first worksheet; row 1 holds the column headers.

use crate::config::InputColumns;
use crate::error::{Result, ScraperError};
use calamine::{open_workbook_auto, Data, Reader};
use enkk_common::InputRecord;
use log::info;
use std::path::Path;

/// Load every non-empty data row, in sheet order
pub fn load_records(path: &Path, columns: &InputColumns) -> Result<Vec<InputRecord>> {
    if !path.exists() {
        return Err(ScraperError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ScraperError::InputFormat(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ScraperError::InputFormat(format!("{}: no worksheet", path.display())))?
        .map_err(|e| ScraperError::InputFormat(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ScraperError::InputFormat(format!("{}: missing header row", path.display())))?;

    let find = |name: &str| -> Result<usize> {
        header
            .iter()
            .position(|cell| cell_text(cell).trim() == name)
            .ok_or_else(|| ScraperError::InputFormat(format!("missing column '{}'", name)))
    };

    let name_idx = find(&columns.name)?;
    let number_idx = find(&columns.number)?;
    let job_idx = find(&columns.job_title)?;
    let pay_idx = find(&columns.pay_office)?;

    let mut records = Vec::new();

    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let get = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

        records.push(InputRecord {
            name: get(name_idx),
            registration_id: get(number_idx),
            job_title: get(job_idx),
            pay_office: get(pay_idx),
        });
    }

    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Cell as text; integral numbers keep all digits and no decimal part
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
