//! Read the first sheet of an Excel workbook into a [`Table`].
//!
//! The first row is the header; columns with an empty header cell are
//! dropped. Rows whose remaining cells are all empty are skipped, which
//! discards the phantom trailing rows Excel likes to leave behind.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::error::IngestError;

use super::table::{Table, Value};

/// Convert an Excel cell to a typed [`Value`].
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Excel stores most numbers as floats; collapse whole ones
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(format!("{}", dt)),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

/// Read a workbook's first sheet into a table labeled `name`.
pub fn read_table<P: AsRef<Path>>(path: P, name: &str) -> Result<Table, IngestError> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|source| IngestError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::NoSheets {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|source| IngestError::Sheet {
            sheet: sheet.clone(),
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| IngestError::EmptySheet {
        sheet: sheet.clone(),
        path: path.to_path_buf(),
    })?;

    // Keep only columns that actually have a header
    let mut keep: Vec<usize> = Vec::new();
    let mut columns: Vec<String> = Vec::new();
    for (idx, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::String(s) => s.trim().to_string(),
            _ => String::new(),
        };
        if !name.is_empty() {
            keep.push(idx);
            columns.push(name);
        }
    }

    let mut table = Table::new(name, columns);
    for row in rows {
        let cells: Vec<Value> = keep
            .iter()
            .map(|&idx| row.get(idx).map(cell_to_value).unwrap_or_default())
            .collect();
        if cells.iter().all(Value::is_null) {
            continue;
        }
        table.push_row(cells);
    }

    Ok(table)
}
