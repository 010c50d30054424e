//! Overlay synchronization
//!
//! Two mirrors float over the live table: a copy of the header row that
//! sticks to the top of the viewport, and a copy of the leading columns that
//! sticks to the left edge. Both must stay pixel-aligned with the table while
//! rows stream in and column widths change.
//!
//! # Module Structure
//!
//! - `layout`: measurement/style port and target addressing
//! - `state`: positioning and shadow law
//! - `header`: header mirror, ticks and width sync
//! - `columns`: leading-columns mirror, per-row sync, hover pairing
//! - `synchronizer`: drives both on appends and scrolls

pub mod columns;
pub mod header;
pub mod layout;
pub mod state;
pub mod synchronizer;

pub use columns::LeadingColumnsMirror;
pub use header::{HeaderMirror, Tick};
pub use layout::{LayoutPort, LayoutTarget, Mirror, Offset, RowSlot, Shadow, TableView};
pub use state::{shadow_factor, sticky_position, Axis, OverlayState, OverlayUpdate};
pub use synchronizer::{OverlayConfig, OverlaySynchronizer};
