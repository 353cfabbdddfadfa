//! Rectangular cell values read from or written to a range
//!
//! The Sheets API omits trailing empty cells and rows, so every grid is padded
//! out to the shape of the range it was read from. Reads outside the grid
//! return an empty string; writes outside it grow the grid.

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
}

impl CellGrid {
    /// Blank grid of `height` rows by `width` columns
    pub fn blank(height: usize, width: usize) -> Self {
        Self {
            rows: vec![vec![String::new(); width]; height],
        }
    }

    /// Build a grid from raw API values, padded to at least `height` x `width`
    pub fn from_values(values: Vec<Vec<Value>>, height: usize, width: usize) -> Self {
        let mut grid = Self::blank(height, width);
        for (r, row) in values.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                let text = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                grid.set(r, c, text);
            }
        }
        grid
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell text, trimmed; empty when the cell is absent
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.into();
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_values_pads_short_rows() {
        let values = vec![vec![json!("Tank")], vec![]];
        let grid = CellGrid::from_values(values, 3, 4);

        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.get(0, 0), "Tank");
        assert_eq!(grid.get(0, 3), "");
        assert_eq!(grid.get(2, 1), "");
    }

    #[test]
    fn test_from_values_stringifies_numbers() {
        let grid = CellGrid::from_values(vec![vec![json!(1), json!(null), json!(true)]], 1, 3);
        assert_eq!(grid.get(0, 0), "1");
        assert_eq!(grid.get(0, 1), "");
        assert_eq!(grid.get(0, 2), "true");
    }

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let grid = CellGrid::blank(1, 1);
        assert_eq!(grid.get(10, 10), "");
    }

    #[test]
    fn test_get_trims_whitespace() {
        let grid = CellGrid::from_rows(vec![vec!["  Thrall ".to_string()]]);
        assert_eq!(grid.get(0, 0), "Thrall");
    }

    #[test]
    fn test_set_grows_grid() {
        let mut grid = CellGrid::blank(1, 1);
        grid.set(2, 3, "Jaina");
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(2, 3), "Jaina");
        assert_eq!(grid.rows()[1].len(), 0);
    }
}
