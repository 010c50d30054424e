//! Error types for the results table and the stroke replay
//!
//! Table errors are per-message: a rejected update is dropped and reported,
//! the table itself stays usable.

use thiserror::Error;

/// Errors raised while feeding or configuring the live results table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Inbound payload is not valid JSON or lacks a required field
    #[error("Malformed row message: {0}")]
    MalformedMessage(String),

    /// A row with the same (trial, block) key is already in the table
    #[error("Duplicate row key: trial {trial_number}, block {block_number}")]
    DuplicateRowKey {
        trial_number: i64,
        block_number: i64,
    },

    /// The transport is closed, the table is read-only
    #[error("Transport disconnected, table is read-only")]
    Disconnected,

    /// A row already in the table body carries no (trial, block) key
    #[error("Rendered row {index} has no trial/block key")]
    UnkeyedRow { index: usize },

    /// Column configuration rejected at construction
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by the stroke replay
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    /// No events to compute a time window from
    #[error("Stroke event sequence is empty")]
    EmptyEventSequence,

    /// A raw event could not be decoded into a point
    #[error("Invalid stroke event at index {index}: {reason}")]
    InvalidEvent { index: usize, reason: String },
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::MalformedMessage(err.to_string())
    }
}
