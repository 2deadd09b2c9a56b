use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Column headers written above the score rows.
pub const SHEET_HEADERS: [&str; 2] = ["name", "score"];

pub type Score = i64;

/// A single recorded result, as kept by the local document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub username: String,
    pub score: Score,
    pub created_date: DateTime<Utc>,
}

impl ScoreEntry {
    /// Create an entry stamped with the current time.
    pub fn new(username: impl Into<String>, score: Score) -> Result<Self> {
        Self::with_date(username, score, Utc::now())
    }

    pub fn with_date(
        username: impl Into<String>,
        score: Score,
        created_date: DateTime<Utc>,
    ) -> Result<Self> {
        let username = username.into();
        validate_name(&username)?;

        Ok(Self {
            username,
            score,
            created_date,
        })
    }
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({})",
            self.username,
            self.score,
            self.created_date.to_rfc3339()
        )
    }
}

/// One `name`/`score` row of the remote score sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRow {
    pub name: String,
    pub score: Score,
}

impl ScoreRow {
    pub fn new(name: impl Into<String>, score: Score) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self { name, score })
    }

    /// Cells in column order, ready for a `ValueRange` payload.
    pub fn to_sheet_row(&self) -> Vec<Value> {
        vec![Value::String(self.name.clone()), Value::from(self.score)]
    }
}

impl From<&ScoreEntry> for ScoreRow {
    fn from(entry: &ScoreEntry) -> Self {
        ScoreRow {
            name: entry.username.clone(),
            score: entry.score,
        }
    }
}

impl fmt::Display for ScoreRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.score)
    }
}

pub trait FromSheetRows: Sized {
    /// Convert data rows (headers already stripped) into records.
    ///
    /// `first_row` is the sheet row number of `rows[0]` and is only used in
    /// error messages.
    fn from_sheet_rows(rows: &[Vec<Value>], first_row: usize) -> Result<Vec<Self>>;
}

impl FromSheetRows for ScoreRow {
    fn from_sheet_rows(rows: &[Vec<Value>], first_row: usize) -> Result<Vec<Self>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| -> Result<ScoreRow> {
                let mut cells: Vec<String> = row.iter().map(cell_text).collect();
                // The API drops trailing empty cells
                while cells.len() < SHEET_HEADERS.len() {
                    cells.push(String::new());
                }

                let row: ScoreRow = csv::StringRecord::from(cells)
                    .deserialize(None)
                    .map_err(|e| row_error(first_row + idx, e))?;
                validate_name(&row.name).map_err(|e| row_error(first_row + idx, e))?;

                Ok(row)
            })
            .collect()
    }
}

fn row_error(row: usize, e: impl fmt::Display) -> AppError {
    AppError::Sheets(format!("Failed to parse row {}: {}", row, e))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidEntry(
            "username must not be empty".to_string(),
        ));
    }
    Ok(())
}
