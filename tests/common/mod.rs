//! Test doubles for the layout and drawing ports

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use trial_results_wasm::models::{
    ColumnKind, ColumnSchema, DisplayRow, MirrorRow, Point, RenderedRow, RowKey, StrokeStyle,
};
use trial_results_wasm::overlay::{
    HeaderMirror, LayoutPort, LayoutTarget, LeadingColumnsMirror, Offset, Shadow, TableView,
};
use trial_results_wasm::scroll::Viewport;
use trial_results_wasm::TableError;
use trial_results_wasm::stroke::DrawingSurface;

pub const ROW_HEIGHT: f64 = 20.0;
pub const COLUMN_WIDTH: f64 = 50.0;

/// In-memory table: measurements come from maps (with defaults), every
/// mutation is recorded for inspection.
#[derive(Debug)]
pub struct StubView {
    pub viewport: Viewport,
    pub widths: HashMap<LayoutTarget, f64>,
    pub heights: HashMap<LayoutTarget, f64>,
    pub offsets: HashMap<LayoutTarget, Offset>,

    /// Table width reported once the next row is attached
    pub next_table_width: Option<f64>,

    pub set_widths: HashMap<LayoutTarget, f64>,
    pub set_heights: HashMap<LayoutTarget, f64>,
    pub positions: HashMap<LayoutTarget, Offset>,
    pub shadows: HashMap<LayoutTarget, Shadow>,
    pub highlighted: HashSet<LayoutTarget>,
    pub set_width_calls: usize,
    pub position_calls: usize,

    /// Rows in the body before the controller took over
    pub rendered: Vec<RenderedRow>,
    /// Body index whose rendered row has no key
    pub unkeyed_row: Option<usize>,
    pub marked: Vec<(usize, RowKey)>,

    /// Rows attached after the rendered ones
    pub rows: Vec<DisplayRow>,
    pub mirror_rows: Vec<MirrorRow>,
    pub header_mirror_columns: Option<usize>,
    pub header_ticks: Vec<f64>,
    pub columns_mirror_columns: Option<usize>,
    pub disconnected_shown: usize,
}

impl StubView {
    /// Table with its header at `header_top`, `column_count` columns of equal width
    pub fn new(header_top: f64, column_count: usize) -> Self {
        let mut view = Self {
            viewport: Viewport {
                scroll_top: 0.0,
                scroll_left: 0.0,
                document_width: 800.0,
                document_height: 600.0,
                viewport_width: 800.0,
                viewport_height: 600.0,
            },
            widths: HashMap::new(),
            heights: HashMap::new(),
            offsets: HashMap::new(),
            next_table_width: None,
            set_widths: HashMap::new(),
            set_heights: HashMap::new(),
            positions: HashMap::new(),
            shadows: HashMap::new(),
            highlighted: HashSet::new(),
            set_width_calls: 0,
            position_calls: 0,
            rendered: Vec::new(),
            unkeyed_row: None,
            marked: Vec::new(),
            rows: Vec::new(),
            mirror_rows: Vec::new(),
            header_mirror_columns: None,
            header_ticks: Vec::new(),
            columns_mirror_columns: None,
            disconnected_shown: 0,
        };
        view.offsets.insert(LayoutTarget::Table, Offset::new(header_top, 10.0));
        view.offsets.insert(LayoutTarget::HeaderRow, Offset::new(header_top, 10.0));
        for column in 0..column_count {
            view.offsets.insert(
                LayoutTarget::HeaderCell(column),
                Offset::new(header_top, 10.0 + COLUMN_WIDTH * column as f64),
            );
        }
        view.widths
            .insert(LayoutTarget::Table, COLUMN_WIDTH * column_count as f64);
        view
    }

    /// Body pre-filled with one row per `(trial, block)` key
    pub fn with_rendered_rows(mut self, keys: &[(i64, i64)]) -> Self {
        self.rendered = keys
            .iter()
            .map(|&(trial_number, block_number)| RenderedRow {
                key: RowKey {
                    trial_number,
                    block_number,
                },
                texts: vec![block_number.to_string(), trial_number.to_string()],
            })
            .collect();
        self.viewport.document_height += ROW_HEIGHT * keys.len() as f64;
        self
    }

    pub fn scroll_to(&mut self, top: f64, left: f64) {
        self.viewport.scroll_top = top;
        self.viewport.scroll_left = left;
    }

    pub fn is_highlighted(&self, target: LayoutTarget) -> bool {
        self.highlighted.contains(&target)
    }
}

impl LayoutPort for StubView {
    fn measure_width(&self, target: LayoutTarget) -> f64 {
        self.widths.get(&target).copied().unwrap_or(COLUMN_WIDTH)
    }

    fn measure_height(&self, target: LayoutTarget) -> f64 {
        self.heights.get(&target).copied().unwrap_or(ROW_HEIGHT)
    }

    fn measure_offset(&self, target: LayoutTarget) -> Offset {
        self.offsets.get(&target).copied().unwrap_or_default()
    }

    fn set_width(&mut self, target: LayoutTarget, width: f64) {
        self.set_width_calls += 1;
        self.set_widths.insert(target, width);
    }

    fn set_height(&mut self, target: LayoutTarget, height: f64) {
        self.set_heights.insert(target, height);
    }

    fn set_position(&mut self, target: LayoutTarget, position: Offset) {
        self.position_calls += 1;
        self.positions.insert(target, position);
    }

    fn set_shadow(&mut self, target: LayoutTarget, shadow: Shadow) {
        self.shadows.insert(target, shadow);
    }

    fn set_highlight(&mut self, target: LayoutTarget, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(target);
        } else {
            self.highlighted.remove(&target);
        }
    }
}

impl TableView for StubView {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn rendered_rows(&self) -> Result<Vec<RenderedRow>, TableError> {
        match self.unkeyed_row {
            Some(index) => Err(TableError::UnkeyedRow { index }),
            None => Ok(self.rendered.clone()),
        }
    }

    fn mark_row(&mut self, index: usize, key: RowKey) {
        self.marked.push((index, key));
    }

    fn attach_row(&mut self, index: usize, row: &DisplayRow) {
        assert_eq!(index, self.rendered.len() + self.rows.len());
        self.rows.push(row.clone());
        self.viewport.document_height += ROW_HEIGHT;
        if let Some(width) = self.next_table_width.take() {
            self.widths.insert(LayoutTarget::Table, width);
        }
    }

    fn attach_mirror_row(&mut self, index: usize, row: &MirrorRow) {
        assert_eq!(index, self.rendered.len() + self.mirror_rows.len());
        self.mirror_rows.push(row.clone());
    }

    fn attach_header_mirror(&mut self, mirror: &HeaderMirror) {
        self.header_mirror_columns = Some(mirror.column_count());
        self.header_ticks = mirror.ticks().iter().map(|t| t.width).collect();
    }

    fn attach_columns_mirror(&mut self, mirror: &LeadingColumnsMirror) {
        self.columns_mirror_columns = Some(mirror.fixed_column_count());
    }

    fn show_disconnected(&mut self) {
        self.disconnected_shown += 1;
    }
}

/// Schema `[Info:block_number, Info:trial_number, Factor:A, Measure:M]`
pub fn trial_schema() -> ColumnSchema {
    ColumnSchema::from_kinds([
        ("block_number", ColumnKind::Info),
        ("trial_number", ColumnKind::Info),
        ("A", ColumnKind::Factor),
        ("M", ColumnKind::Measure),
    ])
}

/// What the replay put on the surface since the last clear
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    Marker(Point),
    Segment(Point, Point),
}

/// Drawing surface keeping the visible marks; `clear` empties it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub marks: Vec<Mark>,
    pub clears: usize,
    pub strokes: usize,
    pen: Option<Point>,
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.marks.clear();
        self.pen = None;
    }

    fn fill_marker(&mut self, center: Point, _style: &StrokeStyle) {
        self.marks.push(Mark::Marker(center));
    }

    fn begin_path(&mut self, at: Point) {
        self.pen = Some(at);
    }

    fn line_to(&mut self, to: Point) {
        if let Some(from) = self.pen {
            self.marks.push(Mark::Segment(from, to));
        }
        self.pen = Some(to);
    }

    fn stroke(&mut self, _style: &StrokeStyle) {
        self.strokes += 1;
    }
}
