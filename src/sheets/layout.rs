use crate::error::{AppError, Result};
use crate::models::score::SHEET_HEADERS;

/// Where the score table lives inside a spreadsheet.
///
/// Rows are 1-based, as in A1 notation. Header rows sit at the top of the
/// sheet and data rows follow immediately after them.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub header_rows: usize,
    pub first_column: String,
    pub last_column: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Score".to_string(),
            header_rows: 1,
            first_column: "A".to_string(),
            last_column: "B".to_string(),
        }
    }
}

impl SheetLayout {
    /// Check that the column bounds hold exactly one `name`/`score` pair.
    pub fn validate(&self) -> Result<()> {
        let first = column_number(&self.first_column)?;
        let last = column_number(&self.last_column)?;

        if last < first || last - first + 1 != SHEET_HEADERS.len() {
            return Err(AppError::Config(format!(
                "Sheet columns {}:{} must span exactly {} columns",
                self.first_column,
                self.last_column,
                SHEET_HEADERS.len()
            )));
        }

        Ok(())
    }

    /// Every row of the score columns, e.g. `Score!A:B`.
    pub fn full_range(&self) -> String {
        format!(
            "{}!{}:{}",
            self.sheet_ref(),
            self.first_column,
            self.last_column
        )
    }

    /// A single row of the score columns, e.g. `Score!A4:B4`.
    pub fn row_range(&self, row: usize) -> String {
        format!(
            "{}!{}{}:{}{}",
            self.sheet_ref(),
            self.first_column,
            row,
            self.last_column,
            row
        )
    }

    /// Number of data rows given the total row count returned for
    /// [`full_range`](Self::full_range).
    pub fn data_rows(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.header_rows)
    }

    /// Row the next appended record goes to.
    ///
    /// An empty table still reserves the header rows, so the first record
    /// lands on `header_rows + 1`.
    pub fn next_row(&self, total_rows: usize) -> usize {
        self.header_rows + self.data_rows(total_rows) + 1
    }

    /// First row that holds data.
    pub fn first_data_row(&self) -> usize {
        self.header_rows + 1
    }

    // Names with spaces or punctuation must be single-quoted in A1 notation
    fn sheet_ref(&self) -> String {
        let plain = self
            .sheet_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        match plain {
            true => self.sheet_name.clone(),
            false => format!("'{}'", self.sheet_name.replace('\'', "''")),
        }
    }
}

// 1-based column number of an A1 column label, e.g. `A` = 1, `AA` = 27
fn column_number(label: &str) -> Result<usize> {
    if label.is_empty() || !label.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(AppError::Config(format!(
            "Invalid sheet column '{}'",
            label
        )));
    }

    Ok(label
        .bytes()
        .fold(0, |acc, b| acc * 26 + usize::from(b - b'A' + 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let layout = SheetLayout::default();

        assert_eq!(layout.full_range(), "Score!A:B");
        assert_eq!(layout.row_range(2), "Score!A2:B2");
        assert_eq!(layout.row_range(1), "Score!A1:B1");
    }

    #[test]
    fn test_next_row_skips_header() {
        let layout = SheetLayout::default();

        assert_eq!(layout.next_row(0), 2);
        assert_eq!(layout.next_row(1), 2);
        assert_eq!(layout.next_row(3), 4);
        assert_eq!(layout.data_rows(0), 0);
        assert_eq!(layout.data_rows(3), 2);
    }

    #[test]
    fn test_custom_layout() {
        let layout = SheetLayout {
            sheet_name: "Leaderboard".to_string(),
            header_rows: 2,
            first_column: "C".to_string(),
            last_column: "D".to_string(),
        };

        assert_eq!(layout.full_range(), "Leaderboard!C:D");
        assert_eq!(layout.next_row(0), 3);
        assert_eq!(layout.row_range(layout.next_row(5)), "Leaderboard!C6:D6");
        assert_eq!(layout.first_data_row(), 3);
    }

    #[test]
    fn test_validate_requires_two_columns() {
        assert!(SheetLayout::default().validate().is_ok());

        let wide = SheetLayout {
            last_column: "C".to_string(),
            ..SheetLayout::default()
        };
        assert!(matches!(wide.validate(), Err(AppError::Config(_))));

        let reversed = SheetLayout {
            first_column: "B".to_string(),
            last_column: "A".to_string(),
            ..SheetLayout::default()
        };
        assert!(reversed.validate().is_err());

        let across_z = SheetLayout {
            first_column: "Z".to_string(),
            last_column: "AA".to_string(),
            ..SheetLayout::default()
        };
        assert!(across_z.validate().is_ok());

        let garbage = SheetLayout {
            first_column: "A1".to_string(),
            ..SheetLayout::default()
        };
        assert!(garbage.validate().is_err());
    }

    #[test]
    fn test_sheet_name_is_quoted_when_needed() {
        let layout = SheetLayout {
            sheet_name: "High Scores".to_string(),
            ..SheetLayout::default()
        };
        assert_eq!(layout.full_range(), "'High Scores'!A:B");

        let layout = SheetLayout {
            sheet_name: "Clem's".to_string(),
            ..SheetLayout::default()
        };
        assert_eq!(layout.row_range(2), "'Clem''s'!A2:B2");
    }
}
