//! Keeps both mirrors aligned with the live table
//!
//! Width synchronization is O(columns x rows) for the columns mirror, so it
//! only runs when the live table's total width changed across an append.

use super::columns::LeadingColumnsMirror;
use super::header::HeaderMirror;
use super::layout::{LayoutPort, LayoutTarget, TableView};
use crate::config::TableConfig;
use crate::models::{ColumnSchema, DisplayRow};
use crate::scroll::ScrollOffsets;

/// Overlay settings taken from the table configuration
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub fixed_column_count: usize,
    pub shadow_distance: f64,
    pub tick_width: f64,
    pub group_tick_width: f64,
}

impl From<&TableConfig> for OverlayConfig {
    fn from(config: &TableConfig) -> Self {
        Self {
            fixed_column_count: config.fixed_column_count,
            shadow_distance: config.shadow_distance,
            tick_width: config.tick_width,
            group_tick_width: config.group_tick_width,
        }
    }
}

pub struct OverlaySynchronizer {
    header: HeaderMirror,
    columns: LeadingColumnsMirror,
    table_width: f64,
}

impl OverlaySynchronizer {
    /// Build both mirror surfaces over the table as currently rendered.
    /// `existing` are the rows already in the body, mirrored by the clone.
    pub fn new(
        schema: &ColumnSchema,
        config: &OverlayConfig,
        existing: &[DisplayRow],
        view: &mut impl TableView,
    ) -> Self {
        let header = HeaderMirror::new(
            schema,
            config.tick_width,
            config.group_tick_width,
            config.shadow_distance,
            &*view,
        );
        view.attach_header_mirror(&header);

        let mut columns = LeadingColumnsMirror::new(
            schema,
            config.fixed_column_count,
            config.shadow_distance,
            &*view,
        );
        view.attach_columns_mirror(&columns);
        columns.adopt_rows(existing);

        let mut synchronizer = Self {
            header,
            columns,
            table_width: view.measure_width(LayoutTarget::Table),
        };
        synchronizer.adjust_widths(view);
        synchronizer
    }

    pub fn header(&self) -> &HeaderMirror {
        &self.header
    }

    pub fn columns(&self) -> &LeadingColumnsMirror {
        &self.columns
    }

    /// Mirror the live row attached at `index`, then resync widths if the
    /// table grew or shrank. Returns whether widths were recomputed.
    pub fn row_appended(&mut self, index: usize, row: &DisplayRow, view: &mut impl TableView) -> bool {
        self.columns.append_row(index, row, view);

        let width = view.measure_width(LayoutTarget::Table);
        if width == self.table_width {
            return false;
        }
        log::debug!("table width changed {} -> {}, resyncing mirrors", self.table_width, width);
        self.table_width = width;
        self.adjust_widths(view);
        true
    }

    /// Re-pin every mirror cell to the live table
    pub fn adjust_widths(&mut self, layout: &mut impl LayoutPort) {
        self.header.adjust_widths(layout);
        self.columns.adjust_widths(layout);
        // next scroll update reapplies positions
        self.header.invalidate_position();
        self.columns.invalidate_position();
    }

    /// Apply the positioning law to both overlays. Returns whether either moved.
    pub fn reposition(&mut self, offsets: ScrollOffsets, layout: &mut impl LayoutPort) -> bool {
        let header_moved = self.header.reposition(offsets, layout);
        let columns_moved = self.columns.reposition(offsets, layout);
        header_moved || columns_moved
    }

    pub fn set_hover(&mut self, index: usize, hovered: bool, layout: &mut impl LayoutPort) {
        self.columns.set_hover(index, hovered, layout);
    }
}
