//! Builds display rows from inbound records

use super::live_table::LiveTable;
use super::names::{NameResolver, ValueKind};
use crate::error::TableError;
use crate::models::{ColumnDescriptor, ColumnKind, ColumnSchema, DisplayCell, DisplayRow, RowRecord};

/// Resolves a record into one cell per schema column
pub struct RowAppender {
    resolver: Box<dyn NameResolver>,
}

impl RowAppender {
    pub fn new(resolver: Box<dyn NameResolver>) -> Self {
        Self { resolver }
    }

    /// Build the row for `record`.
    ///
    /// Fails with `DuplicateRowKey` when `table` already holds a row with the
    /// same (trial, block) key. Nothing is attached anywhere; the caller owns
    /// that.
    pub fn build_row(
        &self,
        record: &RowRecord,
        schema: &ColumnSchema,
        table: &LiveTable,
    ) -> Result<DisplayRow, TableError> {
        let key = record.key();
        if table.contains(&key) {
            return Err(TableError::DuplicateRowKey {
                trial_number: key.trial_number,
                block_number: key.block_number,
            });
        }

        let cells = schema
            .columns()
            .iter()
            .map(|column| self.build_cell(column, record))
            .collect();

        Ok(DisplayRow { key, cells })
    }

    fn build_cell(&self, column: &ColumnDescriptor, record: &RowRecord) -> DisplayCell {
        let text = match column.kind {
            ColumnKind::Info if column.is_block_number() => record
                .measure_block_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            ColumnKind::Info => record.trial_number.to_string(),
            ColumnKind::Factor => self.resolve(ValueKind::Factor, column, record),
            ColumnKind::Measure => self.resolve(ValueKind::Measure, column, record),
        };

        DisplayCell {
            column_id: column.id.clone(),
            column_type: column.kind,
            parity: column.parity,
            text,
        }
    }

    fn resolve(&self, kind: ValueKind, column: &ColumnDescriptor, record: &RowRecord) -> String {
        let raw = record.raw_value(column.kind, &column.id);
        if raw.is_empty() {
            return raw;
        }
        self.resolver.display_name(kind, &raw)
    }
}
