//! Live table controller
//!
//! Top-level orchestration of the results page: decoded row messages go
//! through the appender into the table and its mirrors, scrolls reposition
//! the overlays, and the tail-follow animation is started on appends.
//!
//! Everything runs on the UI event queue; each append completes (model,
//! view, mirrors) before the next message is handled.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::models::{ColumnSchema, DisplayRow, RowRecord};
use crate::navigation::{InputState, Navigator, RouteNavigator};
use crate::overlay::{OverlayConfig, OverlaySynchronizer, TableView};
use crate::scroll::{AnimationHandle, AutoScrollController, ScrollStep, ScrollTracker};
use crate::table::{LiveTable, NameResolver, NameTable, RowAppender};

/// Transport state as seen by the table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    /// Read-only: no more appends, overlays stay interactive
    Disconnected,
}

/// Result of a successful append
#[derive(Clone, Debug)]
pub struct AppendOutcome {
    pub index: usize,
    /// Mirror widths were recomputed because the table width changed
    pub widths_resynced: bool,
    /// Tail-follow animation started by this append
    pub scroll: Option<AnimationHandle>,
}

/// Work done by one animation frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    /// Scroll position the driver must apply
    pub scroll: Option<ScrollStep>,
    pub overlays_moved: bool,
}

pub struct LiveTableController<V: TableView> {
    experiment_id: String,
    run_id: String,
    schema: ColumnSchema,
    table: LiveTable,
    appender: RowAppender,
    overlays: OverlaySynchronizer,
    tracker: ScrollTracker,
    auto_scroll: AutoScrollController,
    input: InputState,
    navigator: Box<dyn Navigator>,
    connection: ConnectionState,
    overlays_dirty: bool,
    view: V,
}

impl<V: TableView> LiveTableController<V> {
    /// Controller resolving names from the configuration and navigating to the trial routes
    pub fn new(config: &TableConfig, view: V) -> Result<Self, TableError> {
        let names = NameTable::new(config.factors.clone(), config.measures.clone());
        Self::with_ports(config, view, Box::new(names), Box::new(RouteNavigator::default()))
    }

    pub fn with_ports(
        config: &TableConfig,
        mut view: V,
        resolver: Box<dyn NameResolver>,
        navigator: Box<dyn Navigator>,
    ) -> Result<Self, TableError> {
        config.validate()?;
        let schema = config.schema();

        // rows the server rendered before live updates keep their body positions
        let mut table = LiveTable::new();
        for rendered in view.rendered_rows()? {
            let index = table.push(DisplayRow::from_rendered(&rendered, &schema))?;
            view.mark_row(index, rendered.key);
        }
        if !table.is_empty() {
            log::info!("adopted {} rendered rows", table.len());
        }

        let overlays = OverlaySynchronizer::new(&schema, &OverlayConfig::from(config), table.rows(), &mut view);
        let tracker = ScrollTracker::new(view.viewport());

        let mut controller = Self {
            experiment_id: config.experiment_id.clone(),
            run_id: config.run_id.clone(),
            schema,
            table,
            appender: RowAppender::new(resolver),
            overlays,
            tracker,
            auto_scroll: AutoScrollController::new(config.scroll_duration_ms, config.bottom_threshold),
            input: InputState::new(config.stroke_modifier_key.clone()),
            navigator,
            connection: ConnectionState::Connecting,
            overlays_dirty: false,
            view,
        };
        controller.sync_overlays();
        Ok(controller)
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[DisplayRow] {
        self.table.rows()
    }

    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    pub fn mirror_row_count(&self) -> usize {
        self.overlays.columns().row_count()
    }

    pub fn header_mirror_column_count(&self) -> usize {
        self.overlays.header().column_count()
    }

    pub fn overlays(&self) -> &OverlaySynchronizer {
        &self.overlays
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_animating()
    }

    pub fn connection_opened(&mut self) {
        if self.connection == ConnectionState::Connecting {
            log::info!("live updates connected");
            self.connection = ConnectionState::Connected;
        }
    }

    /// Transport closed or errored: stop appending, keep the page interactive
    pub fn connection_closed(&mut self) {
        if self.connection == ConnectionState::Disconnected {
            return;
        }
        log::info!("live updates disconnected");
        self.connection = ConnectionState::Disconnected;
        self.view.show_disconnected();
    }

    /// Handle one inbound message. A rejected message leaves the table untouched.
    pub fn handle_message(&mut self, payload: &str) -> Result<AppendOutcome, TableError> {
        let result = RowRecord::from_json(payload).and_then(|record| self.append(&record));
        if let Err(err) = &result {
            log::warn!("dropping row message: {}", err);
        }
        result
    }

    /// Append a decoded record to the table and both mirrors
    pub fn append(&mut self, record: &RowRecord) -> Result<AppendOutcome, TableError> {
        if self.connection == ConnectionState::Disconnected {
            return Err(TableError::Disconnected);
        }

        let before = self.view.viewport();
        let row = self.appender.build_row(record, &self.schema, &self.table)?;
        let index = self.table.push(row)?;
        let row = &self.table.rows()[index];

        self.view.attach_row(index, row);
        let widths_resynced = self.overlays.row_appended(index, row, &mut self.view);
        log::debug!("appended trial {} block {} at row {}", row.key.trial_number, row.key.block_number, index);

        let after = self.view.viewport();
        self.tracker.observe(after);
        let scroll = self.auto_scroll.on_row_appended(&before, &after);
        if widths_resynced {
            self.overlays_dirty = true;
        }

        Ok(AppendOutcome {
            index,
            widths_resynced,
            scroll,
        })
    }

    /// A scroll event happened; overlays are repositioned on the next frame
    pub fn on_scroll(&mut self) {
        self.overlays_dirty = true;
    }

    /// Wheel, touch start or mouse down: the user takes over the scroll
    pub fn on_user_input(&mut self) {
        if self.auto_scroll.interrupt() {
            log::debug!("auto-scroll interrupted by user input");
        }
    }

    /// One animation frame: advance the tail-follow animation, then reposition
    /// the overlays if a scroll happened since the last frame
    pub fn animation_frame(&mut self, now_ms: f64) -> FrameOutcome {
        let scroll = self.auto_scroll.frame(now_ms);
        let overlays_moved = if self.overlays_dirty {
            self.sync_overlays()
        } else {
            false
        };
        FrameOutcome {
            scroll,
            overlays_moved,
        }
    }

    /// Reposition overlays for the current viewport right away
    pub fn sync_overlays(&mut self) -> bool {
        self.overlays_dirty = false;
        self.tracker.observe(self.view.viewport());
        self.overlays.reposition(self.tracker.offsets(), &mut self.view)
    }

    /// Re-pin mirror widths, e.g. after a window resize
    pub fn resync_widths(&mut self) {
        self.overlays.adjust_widths(&mut self.view);
        self.overlays_dirty = true;
    }

    pub fn key_changed(&mut self, key: &str, pressed: bool) {
        self.input.key_changed(key, pressed);
    }

    pub fn focus_lost(&mut self) {
        self.input.release_all();
    }

    /// Pointer entered or left row `index`, live or mirrored alike
    pub fn hover_row(&mut self, index: usize, hovered: bool) {
        log::trace!("hover row {} {}", index, hovered);
        self.overlays.set_hover(index, hovered, &mut self.view);
    }

    /// URL a click on row `index` opens, live or mirrored alike
    pub fn click_row(&self, index: usize) -> Option<String> {
        let row = self.table.get(index)?;
        Some(self.navigator.trial_url(
            &self.experiment_id,
            &self.run_id,
            row.key,
            self.input.mode(),
        ))
    }
}
