//! Layout port
//!
//! All measurement and style mutation the overlay code needs goes through
//! these traits, so the synchronization logic runs against a stub in tests
//! and against the DOM in the browser (`api::dom`).

use super::columns::LeadingColumnsMirror;
use super::header::HeaderMirror;
use crate::error::TableError;
use crate::models::{DisplayRow, MirrorRow, RenderedRow, RowKey};
use crate::scroll::Viewport;

/// The two overlay surfaces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mirror {
    Header,
    LeadingColumns,
}

/// Row position inside a table or mirror
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowSlot {
    Header,
    Body(usize),
}

/// Something the layout port can measure or style
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutTarget {
    /// The live table as a whole
    Table,
    HeaderRow,
    HeaderCell(usize),
    BodyRow(usize),
    BodyCell { row: usize, column: usize },
    /// Positioned container of a mirror
    Overlay(Mirror),
    MirrorRow { mirror: Mirror, row: RowSlot },
    MirrorCell { mirror: Mirror, row: RowSlot, column: usize },
    /// Divider drawn after a header mirror column
    Tick(usize),
}

/// Document position in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Elevation cue of an overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shadow {
    /// No shadow and no elevated state
    Flat,
    /// Shadow at the given intensity in (0, 1]
    Elevated(f64),
}

impl Shadow {
    pub fn from_factor(factor: f64) -> Self {
        if factor > 0.0 {
            Shadow::Elevated(factor.min(1.0))
        } else {
            Shadow::Flat
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            Shadow::Flat => 0.0,
            Shadow::Elevated(factor) => *factor,
        }
    }
}

/// Measurement and style port
pub trait LayoutPort {
    fn measure_width(&self, target: LayoutTarget) -> f64;

    fn measure_height(&self, target: LayoutTarget) -> f64;

    fn measure_offset(&self, target: LayoutTarget) -> Offset;

    /// Pin the width: min, max and preferred width all equal `width`
    fn set_width(&mut self, target: LayoutTarget, width: f64);

    fn set_height(&mut self, target: LayoutTarget, height: f64);

    fn set_position(&mut self, target: LayoutTarget, position: Offset);

    fn set_shadow(&mut self, target: LayoutTarget, shadow: Shadow);

    fn set_highlight(&mut self, target: LayoutTarget, highlighted: bool);
}

/// Structural side of the view: attaching rows and building the mirrors
pub trait TableView: LayoutPort {
    /// Current viewport geometry and raw scroll offsets
    fn viewport(&self) -> Viewport;

    /// Rows already in the live table body, in body order
    fn rendered_rows(&self) -> Result<Vec<RenderedRow>, TableError>;

    /// Tag the rendered row at `index` so its events resolve to `index`
    fn mark_row(&mut self, index: usize, key: RowKey);

    /// Attach a row to the live table body at `index`
    fn attach_row(&mut self, index: usize, row: &DisplayRow);

    /// Attach a row to the leading-columns mirror body at `index`
    fn attach_mirror_row(&mut self, index: usize, row: &MirrorRow);

    /// Create the header mirror surface with its ticks
    fn attach_header_mirror(&mut self, mirror: &HeaderMirror);

    /// Create the leading-columns mirror surface from the current table
    fn attach_columns_mirror(&mut self, mirror: &LeadingColumnsMirror);

    /// Switch the page chrome to the disconnected state
    fn show_disconnected(&mut self);
}
