//! Leading-columns mirror
//!
//! A copy of the whole table reduced to its first `fixed_column_count`
//! columns, header included. Every live row gets exactly one mirror row at
//! the same index, with the live row's height and cell widths.

use super::layout::{LayoutPort, LayoutTarget, Mirror, RowSlot, TableView};
use super::state::{apply_update, Axis, OverlayState};
use crate::models::{ColumnDescriptor, ColumnSchema, DisplayRow, MirrorRow};
use crate::scroll::ScrollOffsets;

#[derive(Clone, Debug)]
pub struct LeadingColumnsMirror {
    fixed_column_count: usize,
    header: Vec<ColumnDescriptor>,
    rows: Vec<MirrorRow>,
    hovered: Option<usize>,
    state: OverlayState,
}

impl LeadingColumnsMirror {
    pub fn new(
        schema: &ColumnSchema,
        fixed_column_count: usize,
        shadow_distance: f64,
        layout: &impl LayoutPort,
    ) -> Self {
        let fixed_column_count = fixed_column_count.min(schema.len());
        let initial = layout.measure_offset(LayoutTarget::Table);

        Self {
            fixed_column_count,
            header: schema.columns()[..fixed_column_count].to_vec(),
            rows: Vec::new(),
            hovered: None,
            state: OverlayState::new(Axis::Horizontal, initial, shadow_distance),
        }
    }

    pub fn fixed_column_count(&self) -> usize {
        self.fixed_column_count
    }

    /// Mirrored header columns
    pub fn header(&self) -> &[ColumnDescriptor] {
        &self.header
    }

    pub fn rows(&self) -> &[MirrorRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Mirror the live row just attached at `index`
    pub fn append_row(&mut self, index: usize, row: &DisplayRow, view: &mut impl TableView) {
        debug_assert_eq!(index, self.rows.len(), "mirror rows must stay index-aligned");

        let mut mirror = row.leading(self.fixed_column_count);
        mirror.height = Some(view.measure_height(LayoutTarget::BodyRow(index)));
        view.attach_mirror_row(index, &mirror);
        self.rows.push(mirror);
        self.sync_row(index, view);
    }

    /// Take over rows that were already in the table when the mirror was
    /// cloned. Heights and widths follow on the next `adjust_widths`.
    pub fn adopt_rows(&mut self, rows: &[DisplayRow]) {
        debug_assert!(self.rows.is_empty(), "rows adopted after appends");
        self.rows
            .extend(rows.iter().map(|row| row.leading(self.fixed_column_count)));
    }

    /// Re-pin header and every row to the live table's widths and heights
    pub fn adjust_widths(&mut self, layout: &mut impl LayoutPort) {
        for column in 0..self.fixed_column_count {
            let width = layout.measure_width(LayoutTarget::HeaderCell(column));
            layout.set_width(self.cell(RowSlot::Header, column), width);
        }
        let height = layout.measure_height(LayoutTarget::HeaderRow);
        layout.set_height(
            LayoutTarget::MirrorRow {
                mirror: Mirror::LeadingColumns,
                row: RowSlot::Header,
            },
            height,
        );

        for index in 0..self.rows.len() {
            self.sync_row(index, layout);
        }
    }

    fn sync_row(&mut self, index: usize, layout: &mut impl LayoutPort) {
        for column in 0..self.fixed_column_count {
            let width = layout.measure_width(LayoutTarget::BodyCell { row: index, column });
            layout.set_width(self.cell(RowSlot::Body(index), column), width);
        }
        let height = layout.measure_height(LayoutTarget::BodyRow(index));
        layout.set_height(
            LayoutTarget::MirrorRow {
                mirror: Mirror::LeadingColumns,
                row: RowSlot::Body(index),
            },
            height,
        );
        if let Some(row) = self.rows.get_mut(index) {
            row.height = Some(height);
        }
    }

    /// Highlight or clear both copies of a row, whichever side was hovered
    pub fn set_hover(&mut self, index: usize, hovered: bool, layout: &mut impl LayoutPort) {
        if index >= self.rows.len() {
            return;
        }
        if hovered {
            if let Some(previous) = self.hovered.filter(|&p| p != index) {
                self.highlight(previous, false, layout);
            }
            self.hovered = Some(index);
        } else if self.hovered == Some(index) {
            self.hovered = None;
        }
        self.highlight(index, hovered, layout);
    }

    fn highlight(&self, index: usize, on: bool, layout: &mut impl LayoutPort) {
        layout.set_highlight(LayoutTarget::BodyRow(index), on);
        layout.set_highlight(
            LayoutTarget::MirrorRow {
                mirror: Mirror::LeadingColumns,
                row: RowSlot::Body(index),
            },
            on,
        );
    }

    /// Apply the positioning law for the current scroll offsets
    pub fn reposition(&mut self, offsets: ScrollOffsets, layout: &mut impl LayoutPort) -> bool {
        apply_update(
            self.state.update(offsets),
            LayoutTarget::Overlay(Mirror::LeadingColumns),
            layout,
        )
    }

    pub(crate) fn invalidate_position(&mut self) {
        self.state.invalidate();
    }

    fn cell(&self, row: RowSlot, column: usize) -> LayoutTarget {
        LayoutTarget::MirrorCell {
            mirror: Mirror::LeadingColumns,
            row,
            column,
        }
    }
}
