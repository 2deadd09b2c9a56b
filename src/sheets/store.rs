use super::{SheetLayout, SheetOperations, ValueInputOption};
use crate::error::Result;
use crate::models::score::SHEET_HEADERS;
use crate::models::{FromSheetRows, ScoreRow};
use crate::store::{ScoreStore, slot};
use async_trait::async_trait;
use google_sheets4::api::ValueRange;
use serde_json::Value;
use tracing::{debug, instrument};

/// Score table kept in a worksheet of a remote spreadsheet.
pub struct SheetScoreStore<C> {
    client: C,
    spreadsheet_id: String,
    layout: SheetLayout,
}

impl<C> SheetScoreStore<C>
where
    C: SheetOperations + Sync,
{
    pub fn new(client: C, spreadsheet_id: impl Into<String>, layout: SheetLayout) -> Self {
        Self {
            client,
            spreadsheet_id: spreadsheet_id.into(),
            layout,
        }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// Every row of the score columns, header rows included.
    #[instrument(name = "Reading score table", skip(self))]
    pub async fn read_all(&self) -> Result<Vec<Vec<Value>>> {
        let response = self
            .client
            .get_values(&self.spreadsheet_id, &self.layout.full_range())
            .await?;

        Ok(response.values.unwrap_or_default())
    }

    /// Data rows below the header, decoded.
    pub async fn rows(&self) -> Result<Vec<ScoreRow>> {
        let values = self.read_all().await?;
        let header_rows = self.layout.header_rows.min(values.len());

        ScoreRow::from_sheet_rows(&values[header_rows..], self.layout.first_data_row())
    }

    /// Number of data rows currently in the table, never negative.
    pub async fn count_existing(&self) -> Result<usize> {
        let values = self.read_all().await?;
        Ok(self.layout.data_rows(values.len()))
    }

    /// Write the column headers into an empty table.
    ///
    /// Returns `false` without writing if the table already has any rows.
    #[instrument(name = "Ensuring score header", skip(self))]
    pub async fn ensure_header(&self) -> Result<bool> {
        if self.layout.header_rows == 0 || !self.read_all().await?.is_empty() {
            debug!("Score table already initialized");
            return Ok(false);
        }

        let range = self.layout.row_range(1);
        let header = SHEET_HEADERS.iter().map(|h| Value::from(*h)).collect();
        self.write_row(range, header, ValueInputOption::Raw).await?;

        Ok(true)
    }

    async fn write_row(
        &self,
        range: String,
        row: Vec<Value>,
        option: ValueInputOption,
    ) -> Result<()> {
        let payload = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.clone()),
            values: Some(vec![row]),
        };

        self.client
            .update_values(&self.spreadsheet_id, &range, payload, option)
            .await?;
        debug!(range, "Row written");

        Ok(())
    }
}

#[async_trait]
impl<C> ScoreStore for SheetScoreStore<C>
where
    C: SheetOperations + Send + Sync,
{
    type Record = ScoreRow;

    #[instrument(name = "Appending sheet score", skip_all, fields(name = %record.name))]
    async fn append(&self, record: ScoreRow) -> Result<()> {
        let total_rows = self.read_all().await?.len();
        let range = self.layout.row_range(self.layout.next_row(total_rows));

        self.write_row(range, record.to_sheet_row(), ValueInputOption::UserEntered)
            .await
    }

    #[instrument(name = "Reading sheet score", skip(self))]
    async fn get(&self, index: i64) -> Result<Option<ScoreRow>> {
        let values = self.read_all().await?;
        let data = &values[self.layout.header_rows.min(values.len())..];

        let Some(i) = slot(index, data.len()) else {
            return Ok(None);
        };
        let row = self.layout.first_data_row() + i;
        let mut parsed = ScoreRow::from_sheet_rows(&data[i..=i], row)?;

        Ok(parsed.pop())
    }
}

#[cfg(test)]
mod mocks {
    use super::*;
    use crate::error::AppError;
    use google_sheets4::api::UpdateValuesResponse;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub(crate) struct Update {
        pub range: String,
        pub values: Vec<Vec<Value>>,
        pub option: ValueInputOption,
    }

    /// In-memory sheet that records every update it receives.
    #[derive(Clone, Default)]
    pub(crate) struct MockSheetsClient {
        pub rows: Arc<Mutex<Vec<Vec<Value>>>>,
        pub requested_ranges: Arc<Mutex<Vec<String>>>,
        pub updates: Arc<Mutex<Vec<Update>>>,
        pub fail_reads: bool,
        pub fail_updates: bool,
    }

    impl MockSheetsClient {
        pub(crate) fn with_rows(rows: Vec<Vec<Value>>) -> Self {
            Self {
                rows: Arc::new(Mutex::new(rows)),
                ..Default::default()
            }
        }

        pub(crate) fn failing_reads() -> Self {
            Self {
                fail_reads: true,
                ..Default::default()
            }
        }

        pub(crate) fn failing_updates(rows: Vec<Vec<Value>>) -> Self {
            Self {
                fail_updates: true,
                ..Self::with_rows(rows)
            }
        }
    }

    /// Starting row of an A1 range such as `Score!A4:B4`.
    fn start_row(range: &str) -> usize {
        let cells = range.rsplit_once('!').map_or(range, |(_, cells)| cells);
        let start = cells.split(':').next().unwrap_or_default();
        start
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .expect("range should name a row")
    }

    #[async_trait]
    impl SheetOperations for MockSheetsClient {
        async fn get_values(&self, _spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
            if self.fail_reads {
                return Err(AppError::Sheets("connection reset".to_string()));
            }
            self.requested_ranges.lock().unwrap().push(range.to_string());

            let rows = self.rows.lock().unwrap().clone();
            Ok(ValueRange {
                range: Some(range.to_string()),
                values: (!rows.is_empty()).then_some(rows),
                ..Default::default()
            })
        }

        async fn update_values(
            &self,
            _spreadsheet_id: &str,
            range: &str,
            payload: ValueRange,
            option: ValueInputOption,
        ) -> Result<UpdateValuesResponse> {
            if self.fail_updates {
                return Err(AppError::Sheets("quota exceeded".to_string()));
            }

            let values = payload.values.unwrap_or_default();
            self.updates.lock().unwrap().push(Update {
                range: range.to_string(),
                values: values.clone(),
                option,
            });

            // Write each row into its own slot, leaving skipped rows blank
            let mut rows = self.rows.lock().unwrap();
            let first = start_row(range) - 1;
            for (offset, row) in values.into_iter().enumerate() {
                let target = first + offset;
                if rows.len() <= target {
                    rows.resize(target + 1, Vec::new());
                }
                rows[target] = row;
            }

            Ok(UpdateValuesResponse {
                updated_range: Some(range.to_string()),
                ..Default::default()
            })
        }
    }
}
