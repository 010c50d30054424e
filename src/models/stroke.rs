//! Stroke replay data

use crate::error::StrokeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One recorded pointer sample
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StrokeEvent {
    pub x: f64,
    pub y: f64,
    pub time: f64,
}

impl StrokeEvent {
    pub fn new(x: f64, y: f64, time: f64) -> Self {
        Self { x, y, time }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Decode a raw event object whose fields are named by the trial's measures.
    /// Coordinates are integral pixels: numbers are truncated and strings keep
    /// their leading integer (`"12px"` is 12). Times must be finite numbers.
    pub fn from_raw(
        index: usize,
        raw: &Value,
        x_column: &str,
        y_column: &str,
        time_column: &str,
    ) -> Result<Self, StrokeError> {
        let field = |column: &str| {
            raw.get(column).ok_or_else(|| StrokeError::InvalidEvent {
                index,
                reason: format!("missing field '{}'", column),
            })
        };
        let x = parse_coordinate(index, field(x_column)?)?;
        let y = parse_coordinate(index, field(y_column)?)?;
        let time = parse_number(field(time_column)?)
            .filter(|t| t.is_finite())
            .ok_or_else(|| StrokeError::InvalidEvent {
                index,
                reason: format!("non-numeric time in '{}'", time_column),
            })?;
        Ok(Self { x, y, time })
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Optional sign and decimal digits at the start of `s`, after whitespace
fn integer_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let end = s.len() - unsigned.len() + digits;
    s[..end].parse().ok()
}

fn parse_coordinate(index: usize, value: &Value) -> Result<f64, StrokeError> {
    let parsed = match value {
        Value::String(s) => integer_prefix(s),
        other => parse_number(other),
    };
    parsed
        .filter(|v| v.is_finite())
        .map(f64::trunc)
        .ok_or_else(|| StrokeError::InvalidEvent {
            index,
            reason: format!("non-numeric coordinate {}", value),
        })
}

/// Line cap of the replayed path
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Paint settings of a replay pass
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_color: String,
    pub marker_radius: f64,
    pub marker_color: String,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 4.0,
            line_cap: LineCap::Round,
            line_color: "#000000".to_string(),
            marker_radius: 6.0,
            marker_color: "#5C0600".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_truncates_coordinates() {
        let raw = json!({"px": "12.9", "py": 7.6, "t": 40});
        let event = StrokeEvent::from_raw(0, &raw, "px", "py", "t").unwrap();
        assert_eq!(event, StrokeEvent::new(12.0, 7.0, 40.0));
    }

    #[test]
    fn test_from_raw_missing_field() {
        let raw = json!({"px": 1, "t": 40});
        let err = StrokeEvent::from_raw(3, &raw, "px", "py", "t").unwrap_err();
        assert!(matches!(err, StrokeError::InvalidEvent { index: 3, .. }));
    }

    #[test]
    fn test_from_raw_rejects_text() {
        let raw = json!({"px": "left", "py": 1, "t": 0});
        assert!(StrokeEvent::from_raw(0, &raw, "px", "py", "t").is_err());
        let raw = json!({"px": "-", "py": 1, "t": 0});
        assert!(StrokeEvent::from_raw(0, &raw, "px", "py", "t").is_err());
    }

    #[test]
    fn test_from_raw_keeps_leading_integer() {
        let raw = json!({"px": "12px", "py": " -3.5e2", "t": "2.5"});
        let event = StrokeEvent::from_raw(0, &raw, "px", "py", "t").unwrap();
        assert_eq!(event, StrokeEvent::new(12.0, -3.0, 2.5));
    }

    #[test]
    fn test_from_raw_rejects_non_finite_time() {
        for time in ["NaN", "inf", "-infinity"] {
            let raw = json!({"px": 1, "py": 1, "t": time});
            assert!(matches!(
                StrokeEvent::from_raw(5, &raw, "px", "py", "t"),
                Err(StrokeError::InvalidEvent { index: 5, .. })
            ));
        }
    }
}
