//! Header mirror
//!
//! A copy of the header row fixed over the viewport. Its cells are pinned to
//! the widths of the live header cells; a tick sits centered on the right
//! edge of every column except the last.

use super::layout::{LayoutPort, LayoutTarget, Mirror, Offset, RowSlot, Shadow};
use super::state::{apply_update, Axis, OverlayState};
use crate::models::{ColumnDescriptor, ColumnSchema};
use crate::scroll::ScrollOffsets;

/// Divider between two mirrored header columns
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Column whose right edge the tick marks
    pub after_column: usize,
    pub width: f64,
    /// Set when the next column starts another kind
    pub group_boundary: bool,
    /// Left edge relative to the mirror, once widths have been synchronized
    pub left: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct HeaderMirror {
    columns: Vec<ColumnDescriptor>,
    ticks: Vec<Tick>,
    widths: Vec<f64>,
    state: OverlayState,
}

impl HeaderMirror {
    /// Clone the header columns and record where the live header rests
    pub fn new(
        schema: &ColumnSchema,
        tick_width: f64,
        group_tick_width: f64,
        shadow_distance: f64,
        layout: &impl LayoutPort,
    ) -> Self {
        let columns = schema.columns().to_vec();
        let ticks = (0..columns.len().saturating_sub(1))
            .map(|index| {
                let group_boundary = schema.group_boundary_after(index);
                Tick {
                    after_column: index,
                    width: if group_boundary { group_tick_width } else { tick_width },
                    group_boundary,
                    left: None,
                }
            })
            .collect();
        let initial = layout.measure_offset(LayoutTarget::HeaderRow);

        Self {
            widths: vec![0.0; columns.len()],
            columns,
            ticks,
            state: OverlayState::new(Axis::Vertical, initial, shadow_distance),
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Widths applied by the last synchronization
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn shadow(&self) -> Shadow {
        self.state.shadow
    }

    /// Pin every mirror cell to its live header cell width and re-center the ticks
    pub fn adjust_widths(&mut self, layout: &mut impl LayoutPort) {
        let origin = layout.measure_offset(LayoutTarget::HeaderRow).left;

        for column in 0..self.columns.len() {
            let width = layout.measure_width(LayoutTarget::HeaderCell(column));
            layout.set_width(
                LayoutTarget::MirrorCell {
                    mirror: Mirror::Header,
                    row: RowSlot::Header,
                    column,
                },
                width,
            );
            self.widths[column] = width;

            if let Some(tick) = self.ticks.get_mut(column) {
                let cell_left = layout.measure_offset(LayoutTarget::HeaderCell(column)).left;
                let right_edge = cell_left - origin + width;
                let left = right_edge - tick.width / 2.0;
                layout.set_position(LayoutTarget::Tick(column), Offset::new(0.0, left));
                tick.left = Some(left);
            }
        }
    }

    /// Apply the positioning law for the current scroll offsets
    pub fn reposition(&mut self, offsets: ScrollOffsets, layout: &mut impl LayoutPort) -> bool {
        apply_update(
            self.state.update(offsets),
            LayoutTarget::Overlay(Mirror::Header),
            layout,
        )
    }

    pub(crate) fn invalidate_position(&mut self) {
        self.state.invalidate();
    }
}
