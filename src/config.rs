//! Configuration for raidslots
//!
//! Loaded from TOML. Credentials are never stored in the file: the sheet
//! section names the environment variable that holds the OAuth access token.

use crate::sheets::A1Range;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub sheets: SheetsSection,
    #[serde(default)]
    pub raid_helper: RaidHelperSection,
    #[serde(default)]
    pub encounters: EncounterSection,
}

/// Google Sheets section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SheetsSection {
    /// Spreadsheet identifier from the sheet URL
    pub spreadsheet_id: String,
    /// Environment variable containing the OAuth bearer token
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,
    /// Sheets API base URL
    #[serde(default = "default_sheets_base_url")]
    pub base_url: String,
    /// Range holding the roster export (`party, slot, name, discord, class, spec, role, color`)
    #[serde(default = "default_roster_range")]
    pub roster_range: String,
    /// How the API interprets written values
    #[serde(default)]
    pub value_input_option: ValueInputOption,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sheets `valueInputOption`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    Raw,
    /// Parses formulas such as `=image(...)`
    #[default]
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

/// Raid-Helper section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaidHelperSection {
    #[serde(default = "default_raid_helper_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RaidHelperSection {
    fn default() -> Self {
        Self {
            base_url: default_raid_helper_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Encounter tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EncounterSection {
    /// Elemental shamans moved into healer groups on Al'Akir
    #[serde(default)]
    pub flex_healers: u32,
}

fn default_access_token_env() -> String {
    "GOOGLE_SHEETS_TOKEN".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}

fn default_roster_range() -> String {
    "data_Raid!H2:R26".to_string()
}

fn default_raid_helper_base_url() -> String {
    "https://raid-helper.dev/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid spreadsheet ID: {0}")]
    InvalidSpreadsheetId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_spreadsheet_id(&self.sheets.spreadsheet_id)?;

        self.sheets
            .roster_range
            .parse::<A1Range>()
            .map_err(|e| ConfigError::InvalidConfig(format!("roster_range: {e}")))?;

        if self.sheets.timeout_secs == 0 || self.raid_helper.timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the Sheets access token from its environment variable
    pub fn sheets_access_token(&self) -> Result<String, ConfigError> {
        std::env::var(&self.sheets.access_token_env)
            .map_err(|_| ConfigError::EnvVarNotFound(self.sheets.access_token_env.clone()))
    }

    pub fn sheets_timeout(&self) -> Duration {
        Duration::from_secs(self.sheets.timeout_secs)
    }

    pub fn raid_helper_timeout(&self) -> Duration {
        Duration::from_secs(self.raid_helper.timeout_secs)
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[sheets]
spreadsheet_id = "test-sheet"

[encounters]
flex_healers = 0
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}

fn validate_spreadsheet_id(id: &str) -> Result<(), ConfigError> {
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if id.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidSpreadsheetId(format!(
            "Spreadsheet ID '{id}' must match pattern [A-Za-z0-9_-]+"
        )));
    }

    Ok(())
}
