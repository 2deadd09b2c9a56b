mod auth;
mod client;
mod layout;
mod store;

pub use client::SheetsClient;
pub use layout::SheetLayout;
pub use store::SheetScoreStore;

// Re-export clear_tokens for CLI usage
pub use auth::{clear_tokens as clear_sheets_tokens, token_cache_path};

use crate::error::Result;
use async_trait::async_trait;
use google_sheets4::api::{UpdateValuesResponse, ValueRange};

/// How the service interprets submitted cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputOption {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed into the UI, so numeric strings become numbers.
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

#[async_trait]
pub trait SheetOperations {
    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange>;

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        payload: ValueRange,
        option: ValueInputOption,
    ) -> Result<UpdateValuesResponse>;
}
