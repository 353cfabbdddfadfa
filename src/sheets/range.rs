//! A1 notation ranges
//!
//! Parses ranges such as `TotFW Assigns!Q70:AR84` or `'BWD Assigns'!AV97:BG111`
//! into zero-based cell coordinates.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing A1 notation
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("Range is empty")]
    Empty,
    #[error("Invalid cell reference: '{0}'")]
    InvalidCell(String),
    #[error("Range end {end} is before start {start}")]
    Inverted { start: String, end: String },
    #[error("Unterminated quoted sheet name in '{0}'")]
    UnterminatedQuote(String),
}

/// A single zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| RangeError::InvalidCell(s.to_string()))?;
        let (letters, digits) = s.split_at(split);

        let col = column_index(letters).ok_or_else(|| RangeError::InvalidCell(s.to_string()))?;
        let row: usize = digits
            .parse()
            .ok()
            .filter(|row| *row >= 1)
            .ok_or_else(|| RangeError::InvalidCell(s.to_string()))?;

        Ok(CellRef::new(row - 1, col))
    }
}

/// Rectangular range, optionally qualified by a sheet name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: Option<String>,
    pub start: CellRef,
    pub end: CellRef,
}

impl A1Range {
    pub fn new(sheet: Option<&str>, start: CellRef, end: CellRef) -> Self {
        Self {
            sheet: sheet.map(str::to_string),
            start,
            end,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Range covering a single row of `width` cells starting at `start`
    pub fn row_span(sheet: Option<&str>, start: CellRef, width: usize) -> Self {
        let end = CellRef::new(start.row, start.col + width.saturating_sub(1));
        Self::new(sheet, start, end)
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            if sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                write!(f, "{sheet}!")?;
            } else {
                write!(f, "'{}'!", sheet.replace('\'', "''"))?;
            }
        }
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for A1Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeError::Empty);
        }

        let (sheet, cells) = match s.rfind('!') {
            Some(idx) => (Some(parse_sheet_name(&s[..idx])?), &s[idx + 1..]),
            None => (None, s),
        };

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (start.parse::<CellRef>()?, end.parse::<CellRef>()?),
            None => {
                let cell = cells.parse::<CellRef>()?;
                (cell, cell)
            }
        };

        if end.row < start.row || end.col < start.col {
            return Err(RangeError::Inverted {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(A1Range { sheet, start, end })
    }
}

fn parse_sheet_name(raw: &str) -> Result<String, RangeError> {
    if let Some(inner) = raw.strip_prefix('\'') {
        let inner = inner
            .strip_suffix('\'')
            .ok_or_else(|| RangeError::UnterminatedQuote(raw.to_string()))?;
        Ok(inner.replace("''", "'"))
    } else {
        Ok(raw.to_string())
    }
}

/// `A` → 0, `Z` → 25, `AA` → 26
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters
        .chars()
        .try_fold(0usize, |acc, c| {
            let c = c.to_ascii_uppercase();
            if !c.is_ascii_uppercase() {
                return None;
            }
            acc.checked_mul(26)?
                .checked_add(c as usize - 'A' as usize + 1)
        })
        .map(|n| n - 1)
}

/// 0 → `A`, 25 → `Z`, 26 → `AA`
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}
