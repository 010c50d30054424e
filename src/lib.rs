//! Trial Results WASM Module
//!
//! Live-updating table of experiment trial results with fixed header and
//! leading-column overlays, plus the stroke replay used on trial pages.
//! The core is plain Rust behind layout/drawing ports; `api` binds it to
//! the DOM, canvas and WebSocket.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod navigation;
pub mod overlay;
pub mod scroll;
pub mod stroke;
pub mod table;

// Re-export commonly used types
pub use config::{StrokeConfig, TableConfig};
pub use controller::{AppendOutcome, ConnectionState, LiveTableController};
pub use error::{StrokeError, TableError};
pub use models::*;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        return;
    }

    log::info!("Trial results WASM module initialized");
}
