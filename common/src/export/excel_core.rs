//! Output workbook generation
//!
//! One worksheet, a header row in `COLUMN_ORDER`, then one row per
//! PersonRecord. Empty values are left as blank cells.

use crate::error::{Error, Result};
use crate::types::{PersonRecord, COLUMN_ORDER};
use rust_xlsxwriter::*;

pub const SHEET_NAME: &str = "Sheet1";

/// Column widths (Excel character units), same order as `COLUMN_ORDER`
const COLUMN_WIDTHS: [f64; 9] = [28.0, 22.0, 28.0, 18.0, 18.0, 18.0, 32.0, 14.0, 24.0];

/// Build the output workbook in memory
///
/// # Arguments
/// * `rows` - every PersonRecord accumulated so far, in output order
pub fn generate_output_buffer(rows: &[PersonRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_background_color(Color::RGB(0xF2F2F2));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| Error::Excel(format!("sheet name: {}", e)))?;

    for (col, (title, width)) in COLUMN_ORDER.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, width)
            .map_err(|e| Error::Excel(format!("column width: {}", e)))?;
        worksheet
            .write_string_with_format(0, col, *title, &header_format)
            .map_err(|e| Error::Excel(format!("header cell: {}", e)))?;
    }

    for (idx, record) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in record.columns().iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row, col as u16, *value)
                .map_err(|e| Error::Excel(format!("cell ({}, {}): {}", row, col, e)))?;
        }
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| Error::Excel(format!("freeze panes: {}", e)))?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("save: {}", e)))
}
