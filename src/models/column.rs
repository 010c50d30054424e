//! Column schema of the results table
//!
//! The schema is fixed once the table is built. Columns of the same kind are
//! contiguous, which is what lets the header mirror place group ticks.

use serde::{Deserialize, Serialize};

/// Id of the info column holding the measured block number
pub const BLOCK_NUMBER_COLUMN: &str = "block_number";

/// Id of the info column holding the trial number
pub const TRIAL_NUMBER_COLUMN: &str = "trial_number";

/// Column group
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Info,
    Factor,
    Measure,
}

impl ColumnKind {
    /// Name used in `column-type` attributes and CSS classes
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Info => "info",
            ColumnKind::Factor => "factor",
            ColumnKind::Measure => "measure",
        }
    }
}

/// Alternating stripe class of a column
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// Parity of a 0-based column position (first column is odd)
    pub fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Parity::Odd => "odd",
            Parity::Even => "even",
        }
    }
}

/// A single table column
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColumnDescriptor {
    pub id: String,
    pub kind: ColumnKind,
    pub parity: Parity,
}

impl ColumnDescriptor {
    pub fn new(id: impl Into<String>, kind: ColumnKind, parity: Parity) -> Self {
        Self {
            id: id.into(),
            kind,
            parity,
        }
    }

    /// True for the info column showing the measured block number
    pub fn is_block_number(&self) -> bool {
        self.kind == ColumnKind::Info && self.id == BLOCK_NUMBER_COLUMN
    }
}

/// Ordered, immutable column list
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self { columns }
    }

    /// Build a schema from `(id, kind)` pairs, assigning alternating parity
    pub fn from_kinds<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnKind)>,
        S: Into<String>,
    {
        let columns = columns
            .into_iter()
            .enumerate()
            .map(|(index, (id, kind))| ColumnDescriptor::new(id, kind, Parity::from_index(index)))
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    /// True iff the column at `index` and the next one belong to different groups.
    /// The last column has no successor and never ends a group.
    pub fn group_boundary_after(&self, index: usize) -> bool {
        match (self.columns.get(index), self.columns.get(index + 1)) {
            (Some(current), Some(next)) => current.kind != next.kind,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ColumnSchema {
        ColumnSchema::from_kinds([
            (BLOCK_NUMBER_COLUMN, ColumnKind::Info),
            (TRIAL_NUMBER_COLUMN, ColumnKind::Info),
            ("A", ColumnKind::Factor),
            ("B", ColumnKind::Factor),
            ("M", ColumnKind::Measure),
        ])
    }

    #[test]
    fn test_group_boundaries() {
        let schema = schema();
        let boundaries: Vec<bool> = (0..schema.len())
            .map(|i| schema.group_boundary_after(i))
            .collect();
        assert_eq!(boundaries, vec![false, true, false, true, false]);
    }

    #[test]
    fn test_out_of_range_is_not_a_boundary() {
        assert!(!schema().group_boundary_after(42));
        assert!(!ColumnSchema::new(Vec::new()).group_boundary_after(0));
    }

    #[test]
    fn test_parity_alternates_from_odd() {
        let parities: Vec<Parity> = schema().columns().iter().map(|c| c.parity).collect();
        assert_eq!(
            parities,
            vec![Parity::Odd, Parity::Even, Parity::Odd, Parity::Even, Parity::Odd]
        );
    }

    #[test]
    fn test_kind_deserializes_lowercase() {
        let column: ColumnDescriptor =
            serde_json::from_str(r#"{"id":"M","kind":"measure","parity":"even"}"#).unwrap();
        assert_eq!(column.kind, ColumnKind::Measure);
        assert_eq!(column.parity, Parity::Even);
    }
}
