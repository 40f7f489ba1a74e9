//! In-memory representation of a spreadsheet.
//!
//! Cells are typed [`Value`]s rather than stringly dicts; column lookups
//! go through the header so a misconfigured column name surfaces as an
//! explicit error instead of a silent null.

use crate::error::IngestError;

/// A typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty cell
    Null,
    String(String),
    /// Whole number (Excel floats with no fractional part collapse here)
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Normalized form used for joining, `None` for null cells.
    ///
    /// Excel routinely stores ids as floats, so `7`, `7.0` and `" 7 "`
    /// must all land on the same key.
    pub fn join_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some((*f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
            Value::Bool(b) => Some(b.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// One sheet's worth of data: header columns plus typed rows.
///
/// Every row has exactly `columns.len()` cells; the reader pads short
/// rows with [`Value::Null`].
#[derive(Debug, Clone)]
pub struct Table {
    /// Label used in error messages (file name or configured source name)
    pub name: String,
    /// Header columns in sheet order
    pub columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut cells: Vec<Value>) {
        cells.resize(self.columns.len(), Value::Null);
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header column, or a missing-column error naming what
    /// is actually available.
    pub fn column_index(&self, column: &str) -> Result<usize, IngestError> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| IngestError::MissingColumn {
                column: column.to_string(),
                table: self.name.clone(),
                available: self.columns.join(", "),
            })
    }

    pub fn row(&self, index: usize) -> Row<'_> {
        Row { table: self, index }
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(|index| Row { table: self, index })
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Cell by column name; the column must exist in the header.
    pub fn get(self, column: &str) -> Result<&'a Value, IngestError> {
        let idx = self.table.column_index(column)?;
        Ok(&self.table.rows[self.index][idx])
    }

    /// Cell by pre-resolved column index.
    pub fn cell(self, column_index: usize) -> &'a Value {
        &self.table.rows[self.index][column_index]
    }

    /// All cells paired with their column names, in header order.
    pub fn cells(self) -> impl Iterator<Item = (&'a str, &'a Value)> + use<'a> {
        self.table
            .columns
            .iter()
            .map(|c| c.as_str())
            .zip(self.table.rows[self.index].iter())
    }
}
