//! Google Sheets values API client

use crate::config::{AppConfig, ConfigError, ValueInputOption};
use crate::error::sanitize_error_message;
use crate::sheets::{A1Range, CellGrid, SheetsClient, SheetsError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Connection settings for the Sheets API
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub access_token: String,
    pub timeout: Duration,
    pub value_input_option: ValueInputOption,
}

impl GoogleSheetsConfig {
    /// Build from application config, resolving the access token from the environment
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config.sheets.base_url.clone(),
            spreadsheet_id: config.sheets.spreadsheet_id.clone(),
            access_token: config.sheets_access_token()?,
            timeout: config.sheets_timeout(),
            value_input_option: config.sheets.value_input_option,
        })
    }
}

pub struct GoogleSheetsClient {
    config: GoogleSheetsConfig,
    client: Client,
}

impl GoogleSheetsClient {
    pub fn new(config: GoogleSheetsConfig) -> Result<Self, SheetsError> {
        if config.access_token.is_empty() {
            return Err(SheetsError::NotConfigured(
                "Sheets access token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// `{base}/spreadsheets/{id}/values/{range}` with the range percent-encoded
    fn values_url(&self, range: &A1Range) -> Result<Url, SheetsError> {
        let range_text = range.to_string();
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| SheetsError::InvalidUrl(format!("{}: {e}", self.config.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(&[
                "spreadsheets",
                self.config.spreadsheet_id.as_str(),
                "values",
                range_text.as_str(),
            ]);
        Ok(url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SheetsError::Api {
            status: status.as_u16(),
            message: sanitize_error_message(&body),
        })
    }
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn get_range(&self, range: &A1Range) -> Result<CellGrid, SheetsError> {
        let mut url = self.values_url(range)?;
        // Cells outside the assignment columns are written back as read
        url.query_pairs_mut().append_pair("valueRenderOption", "FORMULA");
        debug!(range = %range, "Reading sheet range");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;
        let response = Self::check_status(response).await?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))?;

        Ok(CellGrid::from_values(
            body.values,
            range.height(),
            range.width(),
        ))
    }

    async fn write_range(&self, range: &A1Range, rows: &[Vec<String>]) -> Result<(), SheetsError> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair(
            "valueInputOption",
            self.config.value_input_option.as_str(),
        );
        debug!(range = %range, rows = rows.len(), "Writing sheet range");

        let body = ValueRangeUpdate {
            range: range.to_string(),
            major_dimension: "ROWS",
            values: rows,
        };

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeUpdate<'a> {
    range: String,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GoogleSheetsConfig {
        GoogleSheetsConfig {
            base_url: "https://sheets.googleapis.com/v4".to_string(),
            spreadsheet_id: "sheet-1".to_string(),
            access_token: "token".to_string(),
            timeout: Duration::from_secs(5),
            value_input_option: ValueInputOption::UserEntered,
        }
    }

    #[test]
    fn test_client_requires_token() {
        let config = GoogleSheetsConfig {
            access_token: String::new(),
            ..test_config()
        };
        assert!(matches!(
            GoogleSheetsClient::new(config),
            Err(SheetsError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_values_url_encodes_range() {
        let client = GoogleSheetsClient::new(test_config()).unwrap();
        let range: A1Range = "TotFW Assigns!Q70:AR84".parse().unwrap();
        let url = client.values_url(&range).unwrap();

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/'TotFW%20Assigns'!Q70:AR84"
        );
    }

    #[test]
    fn test_values_url_with_trailing_slash_base() {
        let config = GoogleSheetsConfig {
            base_url: "http://localhost:1234/".to_string(),
            ..test_config()
        };
        let client = GoogleSheetsClient::new(config).unwrap();
        let range: A1Range = "Shannox!C7:G7".parse().unwrap();
        let url = client.values_url(&range).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:1234/spreadsheets/sheet-1/values/Shannox!C7:G7"
        );
    }

    #[test]
    fn test_update_body_serialization() {
        let rows = vec![vec!["Thrall".to_string(), String::new()]];
        let body = ValueRangeUpdate {
            range: "Shannox!C7:D7".to_string(),
            major_dimension: "ROWS",
            values: &rows,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["majorDimension"], "ROWS");
        assert_eq!(json["values"][0][0], "Thrall");
    }
}
