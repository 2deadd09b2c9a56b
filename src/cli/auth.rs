use crate::config::Config;
use crate::error::Result;
use crate::sheets::{SheetsClient, clear_sheets_tokens};
use tracing::info;

pub(super) async fn execute(reset: bool) -> Result<()> {
    if reset {
        clear_sheets_tokens()?;
    }

    let config = Config::load()?;
    let _client = SheetsClient::new(&config.google).await?;

    info!("Google Sheets authentication verified");

    Ok(())
}
