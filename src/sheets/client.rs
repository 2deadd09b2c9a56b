use super::{SheetOperations, ValueInputOption};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::create_and_verify_authenticator;
use async_trait::async_trait;
use google_sheets4::api::{Scope, Sheets, UpdateValuesResponse, ValueRange};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, instrument};

// Read and write access to the user's spreadsheets
pub(crate) const AUTH_SCOPE: Scope = Scope::Spreadsheet;

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(config: &GoogleConfig) -> Result<Self> {
        config.validate()?;
        let auth = create_and_verify_authenticator(config).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| AppError::Sheets(format!("Failed to load native roots: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        Ok(Self {
            hub: Sheets::new(client, auth),
        })
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Fetching values", skip(self))]
    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .major_dimension("ROWS")
            .value_render_option("UNFORMATTED_VALUE")
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read range '{}': {}", range, e)))?;

        Ok(response)
    }

    #[instrument(name = "Updating values", skip(self, payload))]
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        payload: ValueRange,
        option: ValueInputOption,
    ) -> Result<UpdateValuesResponse> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(payload, spreadsheet_id, range)
            .value_input_option(option.as_str())
            .add_scope(AUTH_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to update range '{}': {}", range, e)))?;
        debug!(
            updated_range = ?response.updated_range,
            updated_cells = ?response.updated_cells,
            "Values updated"
        );

        Ok(response)
    }
}
