//! Page configuration
//!
//! Mirrors the `CONFIG` object the results and stroke pages embed. Everything
//! except the column list has a default.

use crate::error::TableError;
use crate::models::{ColumnDescriptor, ColumnKind, ColumnSchema, Parity, StrokeStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Column entry as written in the page configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ColumnConfig {
    pub id: String,
    pub kind: ColumnKind,
    #[serde(default)]
    pub parity: Option<Parity>,
}

/// Configuration of the live results table
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TableConfig {
    #[serde(default)]
    pub experiment_id: String,

    #[serde(default)]
    pub run_id: String,

    pub columns: Vec<ColumnConfig>,

    /// Number of leading columns kept visible by the columns mirror
    #[serde(default = "default_fixed_column_count")]
    pub fixed_column_count: usize,

    /// Factor value id -> display name
    #[serde(default)]
    pub factors: HashMap<String, String>,

    /// Measure value id -> display name
    #[serde(default)]
    pub measures: HashMap<String, String>,

    /// Path of the live update endpoint
    #[serde(default)]
    pub websocket_url: String,

    /// Pixel distance over which the overlay shadow ramps in
    #[serde(default = "default_shadow_distance")]
    pub shadow_distance: f64,

    #[serde(default = "default_tick_width")]
    pub tick_width: f64,

    /// Tick width between columns of different kinds
    #[serde(default = "default_group_tick_width")]
    pub group_tick_width: f64,

    /// Slack in pixels when deciding whether the viewport is at the bottom
    #[serde(default)]
    pub bottom_threshold: f64,

    #[serde(default = "default_scroll_duration_ms")]
    pub scroll_duration_ms: f64,

    /// Key that switches row navigation to the stroke view while held
    #[serde(default = "default_stroke_modifier_key")]
    pub stroke_modifier_key: String,
}

fn default_fixed_column_count() -> usize {
    2
}

fn default_shadow_distance() -> f64 {
    10.0
}

fn default_tick_width() -> f64 {
    1.0
}

fn default_group_tick_width() -> f64 {
    2.0
}

fn default_scroll_duration_ms() -> f64 {
    400.0
}

fn default_stroke_modifier_key() -> String {
    "s".to_string()
}

impl TableConfig {
    /// Minimal configuration for a column list, everything else defaulted
    pub fn with_columns(columns: &ColumnSchema, fixed_column_count: usize) -> Self {
        Self {
            experiment_id: String::new(),
            run_id: String::new(),
            columns: columns
                .columns()
                .iter()
                .map(|c| ColumnConfig {
                    id: c.id.clone(),
                    kind: c.kind,
                    parity: Some(c.parity),
                })
                .collect(),
            fixed_column_count,
            factors: HashMap::new(),
            measures: HashMap::new(),
            websocket_url: String::new(),
            shadow_distance: default_shadow_distance(),
            tick_width: default_tick_width(),
            group_tick_width: default_group_tick_width(),
            bottom_threshold: 0.0,
            scroll_duration_ms: default_scroll_duration_ms(),
            stroke_modifier_key: default_stroke_modifier_key(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let config: TableConfig = serde_json::from_str(json)
            .map_err(|e| TableError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.columns.is_empty() {
            return Err(TableError::InvalidConfig("no columns".to_string()));
        }
        if self.fixed_column_count > self.columns.len() {
            return Err(TableError::InvalidConfig(format!(
                "fixed column count {} exceeds column count {}",
                self.fixed_column_count,
                self.columns.len()
            )));
        }
        if !(self.shadow_distance > 0.0) {
            return Err(TableError::InvalidConfig(format!(
                "shadow distance must be positive, got {}",
                self.shadow_distance
            )));
        }

        // each kind forms one contiguous group; ticks mark the group boundaries
        let mut closed: Vec<ColumnKind> = Vec::new();
        for pair in self.columns.windows(2) {
            let (previous, next) = (pair[0].kind, pair[1].kind);
            if previous == next {
                continue;
            }
            closed.push(previous);
            if closed.contains(&next) {
                return Err(TableError::InvalidConfig(format!(
                    "{} columns are split around column {}",
                    next.as_str(),
                    pair[1].id
                )));
            }
        }
        Ok(())
    }

    /// Column schema with parity filled in where the page left it out
    pub fn schema(&self) -> ColumnSchema {
        ColumnSchema::new(
            self.columns
                .iter()
                .enumerate()
                .map(|(index, c)| {
                    ColumnDescriptor::new(
                        c.id.clone(),
                        c.kind,
                        c.parity.unwrap_or_else(|| Parity::from_index(index)),
                    )
                })
                .collect(),
        )
    }
}

/// Configuration of the stroke replay page
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StrokeConfig {
    pub x_column: String,
    pub y_column: String,
    pub time_column: String,

    /// Paint settings, given inline next to the column names
    #[serde(flatten)]
    pub style: StrokeStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = TableConfig::from_json(
            r#"{"columns": [{"id": "block_number", "kind": "info"},
                            {"id": "trial_number", "kind": "info"},
                            {"id": "A", "kind": "factor", "parity": "odd"}]}"#,
        )
        .unwrap();
        assert_eq!(config.fixed_column_count, 2);
        assert_eq!(config.shadow_distance, 10.0);
        assert_eq!(config.stroke_modifier_key, "s");

        let schema = config.schema();
        assert_eq!(schema.get(1).unwrap().parity, Parity::Even);
        assert_eq!(schema.get(2).unwrap().parity, Parity::Odd);
    }

    #[test]
    fn test_fixed_count_larger_than_columns_rejected() {
        let err = TableConfig::from_json(
            r#"{"columns": [{"id": "trial_number", "kind": "info"}], "fixed_column_count": 3}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(_)));
    }

    #[test]
    fn test_split_kind_group_rejected() {
        let err = TableConfig::from_json(
            r#"{"columns": [{"id": "trial_number", "kind": "info"}, {"id": "A", "kind": "factor"},
                            {"id": "block_number", "kind": "info"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(msg) if msg.contains("block_number")));

        // one group per kind, in any order
        assert!(TableConfig::from_json(
            r#"{"columns": [{"id": "A", "kind": "factor"}, {"id": "B", "kind": "factor"},
                            {"id": "trial_number", "kind": "info"}, {"id": "M", "kind": "measure"}]}"#,
        )
        .is_ok());
    }

    #[test]
    fn test_empty_columns_rejected() {
        assert!(TableConfig::from_json(r#"{"columns": []}"#).is_err());
    }

    #[test]
    fn test_stroke_style_defaults() {
        let config: StrokeConfig =
            serde_json::from_str(r#"{"x_column": "x", "y_column": "y", "time_column": "t"}"#)
                .unwrap();
        assert_eq!(config.style.line_width, 4.0);
        assert_eq!(config.style.marker_radius, 6.0);

        let config: StrokeConfig = serde_json::from_str(
            r#"{"x_column": "x", "y_column": "y", "time_column": "t", "line_width": 2, "marker_color": "red"}"#,
        )
        .unwrap();
        assert_eq!(config.style.line_width, 2.0);
        assert_eq!(config.style.marker_color, "red");
        assert_eq!(config.style.line_color, "#000000");
    }
}
