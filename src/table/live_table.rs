//! Append-only row store of the live table

use crate::error::TableError;
use crate::models::{DisplayRow, RowKey};
use std::collections::HashMap;

/// Rows in arrival order plus a key index
#[derive(Clone, Debug, Default)]
pub struct LiveTable {
    rows: Vec<DisplayRow>,
    index: HashMap<RowKey, usize>,
}

impl LiveTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&DisplayRow> {
        self.rows.get(index)
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn position(&self, key: &RowKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Append a row, returning its index. A duplicate key leaves the table untouched.
    pub fn push(&mut self, row: DisplayRow) -> Result<usize, TableError> {
        if self.contains(&row.key) {
            return Err(TableError::DuplicateRowKey {
                trial_number: row.key.trial_number,
                block_number: row.key.block_number,
            });
        }
        let index = self.rows.len();
        self.index.insert(row.key, index);
        self.rows.push(row);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(trial: i64, block: i64) -> DisplayRow {
        DisplayRow {
            key: RowKey { trial_number: trial, block_number: block },
            cells: Vec::new(),
        }
    }

    #[test]
    fn test_push_assigns_indices() {
        let mut table = LiveTable::new();
        assert_eq!(table.push(row(1, 1)).unwrap(), 0);
        assert_eq!(table.push(row(2, 1)).unwrap(), 1);
        // same trial number in another block is a different row
        assert_eq!(table.push(row(1, 2)).unwrap(), 2);
        assert_eq!(table.position(&RowKey { trial_number: 2, block_number: 1 }), Some(1));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut table = LiveTable::new();
        table.push(row(1, 1)).unwrap();
        let err = table.push(row(1, 1)).unwrap_err();
        assert_eq!(err, TableError::DuplicateRowKey { trial_number: 1, block_number: 1 });
        assert_eq!(table.len(), 1);
    }
}
