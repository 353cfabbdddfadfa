//! Error types for roster assignment
//!
//! Each I/O layer owns its own error enum; `AssignError` is the crate-level
//! error that the CLI reports.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret|bearer)[=:\s]\s*\S+").expect("valid regex")
});

static SENSITIVE_PATH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/[a-zA-Z0-9._/-]+/(secrets?|\.ssh|\.aws|\.config)/[a-zA-Z0-9._/-]+")
        .expect("valid regex")
});

const MAX_MESSAGE_LEN: usize = 500;

/// Main error type for assignment runs
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("No available raider: {wanted}")]
    RaiderUnavailable { wanted: String },

    #[error("No open slot left on {encounter}")]
    NoOpenSlot { encounter: String },

    #[error("Unknown encounter: {0}")]
    UnknownEncounter(String),

    #[error("Unknown tier: {0}")]
    UnknownTier(u8),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Spreadsheet error: {0}")]
    Sheets(#[from] crate::sheets::SheetsError),

    #[error("Range error: {0}")]
    Range(#[from] crate::sheets::RangeError),

    #[error("Raid-Helper error: {0}")]
    RaidHelper(#[from] crate::raid_helper::RaidHelperError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssignError {
    /// Create a raider-unavailable error
    pub fn raider_unavailable<S: Into<String>>(wanted: S) -> Self {
        Self::RaiderUnavailable {
            wanted: wanted.into(),
        }
    }

    /// Create a no-open-slot error
    pub fn no_open_slot<S: Into<String>>(encounter: S) -> Self {
        Self::NoOpenSlot {
            encounter: encounter.into(),
        }
    }
}

/// Strip credentials and sensitive paths from text that came back from a remote API.
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = SECRET_PATTERN
        .replace_all(message, "${1}=***")
        .to_string();

    sanitized = SENSITIVE_PATH_PATTERN
        .replace_all(&sanitized, "/***REDACTED***/")
        .to_string();

    if sanitized.len() > MAX_MESSAGE_LEN {
        let suffix = "...[truncated]";
        let mut cut = MAX_MESSAGE_LEN - suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized = format!("{}{}", &sanitized[..cut], suffix);
    }

    sanitized
}

/// Result type for assignment operations
pub type AssignResult<T> = Result<T, AssignError>;
