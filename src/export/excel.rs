//! Tabular exporter: serializes a report document as an `.xlsx` workbook
//! with one named worksheet per section.

use std::path::Path;

use tracing::warn;
use xlsxwriter::prelude::*;

use crate::report::{CellValue, ReportDocument};
use crate::errors::ReportError;

/// Worksheet names are capped at 31 characters by the xlsx format.
const MAX_SHEET_NAME: usize = 31;

/// Solid fill for header rows, RGB 60,108,64 (the Lusoi brand green).
const HEADER_FILL: u32 = 0x3C_6C40;

/// Writes every section of `doc` into one workbook at `path`. Section
/// order becomes sheet order; row 0 of each sheet carries the column
/// headers in the brand header style.
///
/// On any mid-write failure the partially written file is removed so the
/// caller never hands the user a truncated workbook.
pub(crate) fn write_workbook(path: &Path, doc: &ReportDocument) -> Result<(), ReportError> {
    let target = path
        .to_str()
        .ok_or_else(|| ReportError::InvalidPath(path.to_path_buf()))?;

    let workbook = Workbook::new(target)?;
    let result = write_sheets(&workbook, doc).and_then(|()| workbook.close().map_err(Into::into));
    if result.is_err() {
        // Never leave a truncated workbook behind.
        if std::fs::remove_file(path).is_err() {
            warn!(path = %path.display(), "could not remove partial workbook");
        }
    }
    result
}

fn write_sheets(workbook: &Workbook, doc: &ReportDocument) -> Result<(), ReportError> {
    let mut header = Format::new();
    header
        .set_bold()
        .set_font_color(FormatColor::White)
        .set_bg_color(FormatColor::Custom(HEADER_FILL));
    let mut money = Format::new();
    money.set_num_format("#,##0.00");

    for section in &doc.sections {
        let name = sheet_name(&section.title);
        let mut sheet = workbook.add_worksheet(Some(&name))?;

        for (col, title) in section.columns.iter().enumerate() {
            let col = col as u16;
            sheet.write_string(0, col, title, Some(&header))?;
            // Column width tracks the header label, with a floor that
            // keeps short-headed columns readable.
            let width = (title.len() as f64 + 2.0).max(12.0);
            sheet.set_column(col, col, width, None)?;
        }

        for (row, cells) in section.rows.iter().enumerate() {
            let row = (row + 1) as u32;
            for (col, cell) in cells.iter().enumerate() {
                write_cell(&mut sheet, row, col as u16, cell, &money)?;
            }
        }
    }
    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet<'_>,
    row: u32,
    col: u16,
    cell: &CellValue,
    money: &Format,
) -> Result<(), ReportError> {
    use rust_decimal::prelude::ToPrimitive;

    match cell {
        CellValue::Integer(value) => sheet.write_number(row, col, *value as f64, None)?,
        CellValue::Quantity(value) => {
            sheet.write_number(row, col, value.to_f64().unwrap_or(0.0), None)?
        }
        CellValue::Money(value) => {
            sheet.write_number(row, col, value.to_f64().unwrap_or(0.0), Some(money))?
        }
        other => sheet.write_string(row, col, &other.to_string(), None)?,
    }
    Ok(())
}

/// Sanitizes a section title into a legal worksheet name: strips the
/// characters xlsx forbids and truncates to 31 characters.
fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect();
    cleaned.chars().take(MAX_SHEET_NAME).collect()
}
