//! Status table parser
//!
//! Turns the rendered licensing status cell of a profile page into
//! StatusRow values. The cell wraps a table laid out as:
//!
//! 1. a caption row (dropped)
//! 2. the header row (`Szakképesítés`, `Érvényesség`, `Státusz`, ...)
//! 3. one row per qualification
//!
//! A table with only the header row left after dropping the caption means
//! the registry has no data for the person.

use crate::error::{Error, Result};
use crate::types::StatusRow;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

pub const QUALIFICATION_COLUMN: &str = "Szakképesítés";
pub const VALIDITY_COLUMN: &str = "Érvényesség";
pub const STATUS_COLUMN: &str = "Státusz";
pub const RESTRICTION_COLUMN: &str = "Korlátozott alkalmasság";

/// Separator between start and end date in the validity column
pub const VALIDITY_SEPARATOR: &str = " - ";

lazy_static::lazy_static! {
    static ref TABLE: Selector = Selector::parse("table").expect("valid table selector");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[\r\n]+|\s{2,}").expect("valid whitespace regex");
}

/// Parsed status table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTable {
    /// Qualification rows, deduplicated by qualification
    Rows(Vec<StatusRow>),
    /// Header row only
    Empty,
}

/// Parse the outer HTML of the status cell
///
/// # Returns
/// * `Ok(StatusTable::Empty)` - exactly one row after the caption
/// * `Ok(StatusTable::Rows(_))` - header + data rows
/// * `Err` - no table, no rows, or a required column is missing
pub fn parse_status_table(html: &str) -> Result<StatusTable> {
    let fragment = Html::parse_fragment(html);
    let table = fragment.select(&TABLE).next().ok_or(Error::TableNotFound)?;

    let mut rows = table_rows(table);
    if rows.is_empty() {
        return Err(Error::ShapeMismatch("table has no rows".into()));
    }
    rows.remove(0);

    match rows.len() {
        0 => return Err(Error::ShapeMismatch("table has no header row".into())),
        1 => return Ok(StatusTable::Empty),
        _ => {}
    }

    let header = rows.remove(0);
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let has_data = |col: usize| rows.iter().any(|row| !cell(row, col).is_empty());

    // named columns are kept even when blank in every row; among
    // same-named columns the first one carrying data wins
    let column = |name: &str| -> Result<usize> {
        let named: Vec<usize> = (0..width).filter(|&col| cell(&header, col) == name).collect();
        named
            .iter()
            .copied()
            .find(|&col| has_data(col))
            .or_else(|| named.first().copied())
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    };

    let qualification_col = column(QUALIFICATION_COLUMN)?;
    let validity_col = column(VALIDITY_COLUMN)?;
    let status_col = column(STATUS_COLUMN)?;
    let restriction_col = column(RESTRICTION_COLUMN)?;

    let mut seen = HashSet::new();
    let mut status_rows = Vec::new();

    for row in &rows {
        let qualification = cell(row, qualification_col);
        if !seen.insert(qualification.to_string()) {
            continue;
        }

        let (validity_start, validity_end) = split_validity(cell(row, validity_col))?;

        status_rows.push(StatusRow {
            validity_start,
            validity_end,
            qualification: qualification.to_string(),
            status: cell(row, status_col).to_string(),
            restricted_fitness: cell(row, restriction_col).to_string(),
        });
    }

    Ok(StatusTable::Rows(status_rows))
}

/// Split `"2010-01-01 - 2030-01-01"` into start and end
///
/// Text without the separator is kept whole as the start date and the end
/// date is left blank, so a single open-ended date still produces a row.
pub fn split_validity(validity: &str) -> Result<(String, String)> {
    let mut parts = validity.split(VALIDITY_SEPARATOR);
    let start = parts.next().unwrap_or_default().trim().to_string();
    let end = parts.next().unwrap_or_default().trim().to_string();

    if parts.next().is_some() {
        return Err(Error::ShapeMismatch(format!(
            "validity has more than two parts: {}",
            validity
        )));
    }

    Ok((start, end))
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// Rows of `table` itself, nested tables excluded
fn table_rows(table: ElementRef) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(row_cells(child)),
            "thead" | "tbody" | "tfoot" => {
                for tr in child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|e| e.value().name() == "tr")
                {
                    rows.push(row_cells(tr));
                }
            }
            _ => {}
        }
    }

    rows
}

fn row_cells(tr: ElementRef) -> Vec<String> {
    let mut cells = Vec::new();

    for td in tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "td" | "th"))
    {
        let text = normalize_text(&td.text().collect::<String>());
        let span = td
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);

        for _ in 0..span {
            cells.push(text.clone());
        }
    }

    cells
}

fn normalize_text(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
