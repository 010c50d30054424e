//! Row records and their materialized form
//!
//! `RowRecord` is the decoded inbound message. `DisplayRow` is what the view
//! renders: one resolved cell per schema column.

use super::column::{ColumnKind, ColumnSchema, Parity};
use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a row across the table lifetime
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RowKey {
    pub trial_number: i64,
    pub block_number: i64,
}

impl RowKey {
    /// Element id of the rendered row
    pub fn element_id(&self) -> String {
        format!("trial-results-{}-{}", self.trial_number, self.block_number)
    }

    /// Inverse of `element_id`
    pub fn from_element_id(id: &str) -> Option<Self> {
        let (trial, block) = id.strip_prefix("trial-results-")?.split_once('-')?;
        Some(Self {
            trial_number: trial.parse().ok()?,
            block_number: block.parse().ok()?,
        })
    }
}

/// One completed trial as pushed by the server
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RowRecord {
    #[serde(rename = "number")]
    pub trial_number: i64,

    pub block_number: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_block_number: Option<i64>,

    /// Factor id -> raw value id
    #[serde(default, rename = "factors")]
    pub factor_values: HashMap<String, serde_json::Value>,

    /// Measure id -> raw value
    #[serde(default, rename = "measures")]
    pub measure_values: HashMap<String, serde_json::Value>,
}

impl RowRecord {
    /// Decode one inbound message
    pub fn from_json(payload: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn key(&self) -> RowKey {
        RowKey {
            trial_number: self.trial_number,
            block_number: self.block_number,
        }
    }

    /// Raw value id of a factor or measure column, rendered as text.
    /// Missing and null values render as an empty string.
    pub fn raw_value(&self, kind: ColumnKind, column_id: &str) -> String {
        let values = match kind {
            ColumnKind::Factor => &self.factor_values,
            ColumnKind::Measure => &self.measure_values,
            ColumnKind::Info => return String::new(),
        };
        match values.get(column_id) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// A resolved table cell
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayCell {
    pub column_id: String,
    pub column_type: ColumnKind,
    pub parity: Parity,
    pub text: String,
}

impl DisplayCell {
    /// Info cells render as header cells
    pub fn tag_name(&self) -> &'static str {
        match self.column_type {
            ColumnKind::Info => "th",
            ColumnKind::Factor | ColumnKind::Measure => "td",
        }
    }

    /// Classes expected by the results stylesheet
    pub fn class_names(&self) -> Vec<String> {
        let column_class = match self.column_type {
            ColumnKind::Info if self.column_id == super::column::BLOCK_NUMBER_COLUMN => {
                "column-block-num".to_string()
            }
            ColumnKind::Info => "column-trial-num".to_string(),
            kind => format!("column-{}-{}", self.column_id, kind.as_str()),
        };
        vec![column_class, self.parity.class_name().to_string()]
    }
}

/// A materialized table row
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayRow {
    pub key: RowKey,
    pub cells: Vec<DisplayCell>,
}

impl DisplayRow {
    /// Copy of the row keeping only the first `count` columns
    pub fn leading(&self, count: usize) -> MirrorRow {
        MirrorRow {
            key: self.key,
            cells: self.cells.iter().take(count).cloned().collect(),
            height: None,
        }
    }
}

/// A row the server rendered into the table before live updates started
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRow {
    pub key: RowKey,
    /// Cell texts in column order
    pub texts: Vec<String>,
}

impl DisplayRow {
    /// Rebuild the display form of a rendered row. Missing cells are blank.
    pub fn from_rendered(rendered: &RenderedRow, schema: &ColumnSchema) -> Self {
        let cells = schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| DisplayCell {
                column_id: column.id.clone(),
                column_type: column.kind,
                parity: column.parity,
                text: rendered.texts.get(i).cloned().unwrap_or_default(),
            })
            .collect();
        Self {
            key: rendered.key,
            cells,
        }
    }
}

/// A row of the leading-columns mirror
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MirrorRow {
    pub key: RowKey,
    pub cells: Vec<DisplayCell>,

    /// Rendered height copied from the real row once it is laid out
    pub height: Option<f64>,
}
