//! Mock implementations for testing

use crate::raid_helper::{RaidHelperError, RosterSource};
use crate::roster::RaidRoster;
use crate::sheets::{A1Range, CellGrid, SheetsClient, SheetsError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type RecordedWrite = (String, Vec<Vec<String>>);

/// In-memory spreadsheet keyed by range text
#[derive(Debug, Default)]
pub struct MockSheets {
    pub ranges: Arc<Mutex<HashMap<String, CellGrid>>>,
    pub writes: Arc<Mutex<Vec<RecordedWrite>>>,
    pub reads: Arc<Mutex<Vec<String>>>,
    pub should_fail: bool,
}

impl MockSheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Seed a range with cell values
    pub async fn set_range(&self, range: &str, grid: CellGrid) {
        self.ranges.lock().await.insert(canonical(range), grid);
    }

    pub async fn get_writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().await.clone()
    }

    pub async fn get_reads(&self) -> Vec<String> {
        self.reads.lock().await.clone()
    }

    /// Rows most recently written to `range`
    pub async fn written(&self, range: &str) -> Option<Vec<Vec<String>>> {
        let range = canonical(range);
        self.writes
            .lock()
            .await
            .iter()
            .rev()
            .find(|(r, _)| *r == range)
            .map(|(_, rows)| rows.clone())
    }
}

fn canonical(range: &str) -> String {
    range
        .parse::<A1Range>()
        .map(|r| r.to_string())
        .unwrap_or_else(|_| range.to_string())
}

#[async_trait]
impl SheetsClient for MockSheets {
    async fn get_range(&self, range: &A1Range) -> Result<CellGrid, SheetsError> {
        if self.should_fail {
            return Err(SheetsError::Network("mock sheets unavailable".to_string()));
        }
        let key = range.to_string();
        self.reads.lock().await.push(key.clone());

        let mut grid = CellGrid::blank(range.height(), range.width());
        if let Some(stored) = self.ranges.lock().await.get(&key) {
            for (r, row) in stored.rows().iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    grid.set(r, c, value.clone());
                }
            }
        }
        Ok(grid)
    }

    async fn write_range(&self, range: &A1Range, rows: &[Vec<String>]) -> Result<(), SheetsError> {
        if self.should_fail {
            return Err(SheetsError::Network("mock sheets unavailable".to_string()));
        }
        let key = range.to_string();
        self.ranges
            .lock()
            .await
            .insert(key.clone(), CellGrid::from_rows(rows.to_vec()));
        self.writes.lock().await.push((key, rows.to_vec()));
        Ok(())
    }
}

/// Roster source that hands back a fixed roster
#[derive(Debug, Default)]
pub struct MockRosterSource {
    pub roster: RaidRoster,
    pub requested: Arc<Mutex<Vec<u64>>>,
    pub should_fail: bool,
}

impl MockRosterSource {
    pub fn new(roster: RaidRoster) -> Self {
        Self {
            roster,
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl RosterSource for MockRosterSource {
    async fn fetch_roster(&self, raid_id: u64) -> Result<RaidRoster, RaidHelperError> {
        self.requested.lock().await.push(raid_id);
        if self.should_fail {
            return Err(RaidHelperError::Api {
                status: 404,
                message: format!("raid {raid_id} not found"),
            });
        }
        Ok(self.roster.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sheets_pads_and_records() {
        let sheets = MockSheets::new();
        sheets
            .set_range(
                "BWD Assigns!AV97:BG111",
                CellGrid::from_rows(vec![vec!["Thrall".to_string()]]),
            )
            .await;

        let range: A1Range = "'BWD Assigns'!AV97:BG111".parse().unwrap();
        let grid = sheets.get_range(&range).await.unwrap();
        assert_eq!(grid.height(), 15);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.get(0, 0), "Thrall");

        sheets
            .write_range(&range, &[vec!["Jaina".to_string()]])
            .await
            .unwrap();
        assert_eq!(
            sheets.written("BWD Assigns!AV97:BG111").await,
            Some(vec![vec!["Jaina".to_string()]])
        );
        assert_eq!(sheets.get_reads().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_roster_source_failure() {
        let source = MockRosterSource::with_failure();
        assert!(source.fetch_roster(42).await.is_err());
        assert_eq!(*source.requested.lock().await, vec![42]);
    }
}
