//! Trial Results WASM API
//!
//! JavaScript-facing bindings. The page classes own the browser resources
//! (DOM nodes, canvas context, WebSocket, listeners) and drive the plain-Rust
//! core through its ports.
//!
//! # Module Structure
//!
//! - `helpers`: Serialization, error conversion and small DOM utilities
//! - `dom`: `TableView` implementation over the results table
//! - `canvas`: `DrawingSurface` implementation over a 2D canvas
//! - `results`: `ResultsPage`, the live table page
//! - `stroke`: `StrokeDrawer`, the stroke replay on trial pages

pub mod helpers;
pub mod canvas;
pub mod dom;
pub mod results;
pub mod stroke;

pub use results::ResultsPage;
pub use stroke::StrokeDrawer;
