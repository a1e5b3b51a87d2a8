//! Spreadsheet → CSV conversion for the upload page.
//!
//! Only the first worksheet is converted. The workbook format (xlsx, xls,
//! xlsb, ods) is detected from its content, not its name.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{AppError, Result};
use crate::models::UploadFile;

pub fn spreadsheet_to_csv(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Spreadsheet("workbook has no worksheets".to_string()))?;
    let range = workbook.worksheet_range(&first_sheet)?;

    rows_to_csv(range.rows().map(|row| row.iter().map(cell_text)))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

pub fn rows_to_csv<R, C>(rows: R) -> Result<Vec<u8>>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish CSV: {}", e)))
}

/// `Relatório Junho 2024.xlsx` → `Relatrio_Junho_2024.csv`
///
/// A name with nothing left after sanitizing is rejected.
pub fn csv_file_name(original: &str) -> Result<String> {
    let stem = match original.rfind('.') {
        Some(idx) if idx > 0 => &original[..idx],
        _ => original,
    };

    let mut name = String::with_capacity(stem.len() + 4);
    let mut in_whitespace = false;
    for c in stem.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            name.push(c);
        }
    }
    if name.is_empty() {
        return Err(AppError::Validation(format!(
            "Cannot derive a CSV name from {:?}; rename the file using letters or digits",
            original
        )));
    }
    name.push_str(".csv");
    Ok(name)
}

/// Convert every uploaded workbook into a CSV upload.
pub fn convert_batch(files: &[UploadFile]) -> Result<Vec<UploadFile>> {
    files
        .iter()
        .map(|file| {
            let csv = spreadsheet_to_csv(&file.bytes).map_err(|e| match e {
                AppError::Spreadsheet(msg) => AppError::Spreadsheet(format!("{}: {}", file.name, msg)),
                other => other,
            })?;
            Ok(UploadFile::new(csv_file_name(&file.name)?, csv))
        })
        .collect()
}
