//! Row click navigation
//!
//! Clicking a row (live or mirrored) opens the trial's event log, or its
//! stroke replay while the stroke modifier key is held.

use crate::models::RowKey;

/// Which trial view a row click opens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    Events,
    Stroke,
}

impl NavigationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationMode::Events => "events",
            NavigationMode::Stroke => "stroke",
        }
    }
}

/// Modifier key state, updated by key bindings and read at click time
#[derive(Clone, Debug)]
pub struct InputState {
    stroke_key: String,
    stroke_key_pressed: bool,
}

impl InputState {
    pub fn new(stroke_key: impl Into<String>) -> Self {
        Self {
            stroke_key: stroke_key.into(),
            stroke_key_pressed: false,
        }
    }

    /// Feed a key event; returns whether it concerned the stroke key
    pub fn key_changed(&mut self, key: &str, pressed: bool) -> bool {
        if !key.eq_ignore_ascii_case(&self.stroke_key) {
            return false;
        }
        self.stroke_key_pressed = pressed;
        true
    }

    /// Window lost focus: key-up events will never arrive
    pub fn release_all(&mut self) {
        self.stroke_key_pressed = false;
    }

    pub fn mode(&self) -> NavigationMode {
        if self.stroke_key_pressed {
            NavigationMode::Stroke
        } else {
            NavigationMode::Events
        }
    }
}

/// Builds the URL a row click opens
pub trait Navigator {
    fn trial_url(&self, experiment_id: &str, run_id: &str, key: RowKey, mode: NavigationMode) -> String;
}

/// Trial pages served under `<base>/trial/<experiment>/<run>/<block>/<trial>/<mode>`
#[derive(Clone, Debug, Default)]
pub struct RouteNavigator {
    base: String,
}

impl RouteNavigator {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl Navigator for RouteNavigator {
    fn trial_url(&self, experiment_id: &str, run_id: &str, key: RowKey, mode: NavigationMode) -> String {
        format!(
            "{}/trial/{}/{}/{}/{}/{}",
            self.base,
            experiment_id,
            run_id,
            key.block_number,
            key.trial_number,
            mode.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_switches_mode() {
        let mut input = InputState::new("s");
        assert_eq!(input.mode(), NavigationMode::Events);
        assert!(!input.key_changed("a", true));
        assert!(input.key_changed("S", true));
        assert_eq!(input.mode(), NavigationMode::Stroke);
        input.key_changed("s", false);
        assert_eq!(input.mode(), NavigationMode::Events);

        input.key_changed("s", true);
        input.release_all();
        assert_eq!(input.mode(), NavigationMode::Events);
    }

    #[test]
    fn test_route_urls() {
        let navigator = RouteNavigator::new("/api/");
        let key = RowKey { trial_number: 12, block_number: 3 };
        assert_eq!(
            navigator.trial_url("xp", "R01", key, NavigationMode::Events),
            "/api/trial/xp/R01/3/12/events"
        );
        assert_eq!(
            RouteNavigator::default().trial_url("xp", "R01", key, NavigationMode::Stroke),
            "/trial/xp/R01/3/12/stroke"
        );
    }
}
