//! Output workbook persistence
//!
//! The whole table is written on every save, replacing the previous file.

use crate::error::{Result, ScraperError};
use enkk_common::export::excel_core::generate_output_buffer;
use enkk_common::OutputTable;
use log::info;
use std::path::{Path, PathBuf};

/// `<output_dir>/orvosi_adatbazis-<run stamp>.xlsx`
pub fn output_file_path(output_dir: &Path, run_stamp: &str) -> PathBuf {
    output_dir.join(format!("orvosi_adatbazis-{}.xlsx", run_stamp))
}

pub fn save_output(table: &OutputTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let buffer = generate_output_buffer(table.rows())
        .map_err(|e| ScraperError::ExcelOutput(e.to_string()))?;
    std::fs::write(path, buffer)
        .map_err(|e| ScraperError::ExcelOutput(format!("{}: {}", path.display(), e)))?;

    info!("Saved {} rows to {}", table.len(), path.display());
    Ok(())
}
