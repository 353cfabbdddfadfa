//! Spreadsheet access
//!
//! Encounters read and write plain rectangles of cell text. `SheetsClient`
//! is the seam between the assignment logic and Google Sheets so runs can be
//! exercised against an in-memory sheet.

pub mod client;
pub mod grid;
pub mod range;

pub use client::{GoogleSheetsClient, GoogleSheetsConfig};
pub use grid::CellGrid;
pub use range::{column_index, column_letters, A1Range, CellRef, RangeError};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the spreadsheet backend
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Sheets client not configured: {0}")]
    NotConfigured(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Sheets API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Read/write access to a single spreadsheet
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// Read a range, padded to the range's full shape
    async fn get_range(&self, range: &A1Range) -> Result<CellGrid, SheetsError>;

    /// Overwrite a range row by row
    async fn write_range(&self, range: &A1Range, rows: &[Vec<String>]) -> Result<(), SheetsError>;
}
