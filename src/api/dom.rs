//! DOM implementation of the layout port
//!
//! Mirrors are deep clones of the live table placed in fixed-position
//! containers. Ticks live in a separate layer on top of the header mirror so
//! mirror cells keep the live table's child indices.

use super::helpers::{log_dom_error, px, set_style};
use crate::error::TableError;
use crate::models::{DisplayRow, MirrorRow, RenderedRow, RowKey};
use crate::overlay::{
    HeaderMirror, LayoutPort, LayoutTarget, LeadingColumnsMirror, Mirror, Offset, RowSlot, Shadow,
    TableView,
};
use crate::scroll::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTableElement, Window};

/// Attribute carrying the row index on live and mirrored rows
pub const ROW_INDEX_ATTRIBUTE: &str = "data-row-index";

const HOVER_CLASS: &str = "hover";
const ELEVATED_CLASS: &str = "elevated";
const DISCONNECTED_TEXT: &str = "(disconnected)";

pub struct DomTableView {
    window: Window,
    document: Document,
    table: HtmlTableElement,
    header_overlay: HtmlElement,
    columns_overlay: HtmlElement,
    header_mirror: Option<HtmlTableElement>,
    tick_layer: Option<HtmlElement>,
    columns_mirror: Option<HtmlTableElement>,
    message: Option<HtmlElement>,
}

impl DomTableView {
    /// Wrap `table` and create the two overlay containers next to it
    pub fn new(
        window: Window,
        table: HtmlTableElement,
        message: Option<HtmlElement>,
    ) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let header_overlay = create_overlay(&document, "fixed-header")?;
        let columns_overlay = create_overlay(&document, "fixed-columns")?;

        Ok(Self {
            window,
            document,
            table,
            header_overlay,
            columns_overlay,
            header_mirror: None,
            tick_layer: None,
            columns_mirror: None,
            message,
        })
    }

    pub fn table(&self) -> &HtmlTableElement {
        &self.table
    }

    pub fn header_overlay(&self) -> &HtmlElement {
        &self.header_overlay
    }

    pub fn columns_overlay(&self) -> &HtmlElement {
        &self.columns_overlay
    }

    fn header_row(table: &HtmlTableElement) -> Option<Element> {
        table.t_head()?.rows().item(0)
    }

    fn body_row(table: &HtmlTableElement, index: usize) -> Option<Element> {
        let body = table.t_bodies().item(0)?;
        body.children().item(index as u32)
    }

    fn row(table: &HtmlTableElement, slot: RowSlot) -> Option<Element> {
        match slot {
            RowSlot::Header => Self::header_row(table),
            RowSlot::Body(index) => Self::body_row(table, index),
        }
    }

    fn mirror_table(&self, mirror: Mirror) -> Option<&HtmlTableElement> {
        match mirror {
            Mirror::Header => self.header_mirror.as_ref(),
            Mirror::LeadingColumns => self.columns_mirror.as_ref(),
        }
    }

    fn element(&self, target: LayoutTarget) -> Option<HtmlElement> {
        let element: Element = match target {
            LayoutTarget::Table => self.table.clone().into(),
            LayoutTarget::HeaderRow => Self::header_row(&self.table)?,
            LayoutTarget::HeaderCell(column) => {
                Self::header_row(&self.table)?.children().item(column as u32)?
            }
            LayoutTarget::BodyRow(row) => Self::body_row(&self.table, row)?,
            LayoutTarget::BodyCell { row, column } => {
                Self::body_row(&self.table, row)?.children().item(column as u32)?
            }
            LayoutTarget::Overlay(Mirror::Header) => self.header_overlay.clone().into(),
            LayoutTarget::Overlay(Mirror::LeadingColumns) => self.columns_overlay.clone().into(),
            LayoutTarget::MirrorRow { mirror, row } => Self::row(self.mirror_table(mirror)?, row)?,
            LayoutTarget::MirrorCell { mirror, row, column } => {
                Self::row(self.mirror_table(mirror)?, row)?
                    .children()
                    .item(column as u32)?
            }
            LayoutTarget::Tick(index) => self.tick_layer.as_ref()?.children().item(index as u32)?,
        };
        element.dyn_into::<HtmlElement>().ok()
    }

    fn with_element(&self, target: LayoutTarget, f: impl FnOnce(&HtmlElement)) {
        match self.element(target) {
            Some(element) => f(&element),
            None => log::warn!("layout target {:?} not found", target),
        }
    }

    fn scroll(&self) -> (f64, f64) {
        (
            self.window.scroll_y().unwrap_or(0.0),
            self.window.scroll_x().unwrap_or(0.0),
        )
    }

    /// Deep clone of the live table with ids dropped and columns past `keep` removed
    fn clone_table(&self, keep: Option<usize>) -> Result<HtmlTableElement, JsValue> {
        let clone = self
            .table
            .clone_node_with_deep(true)?
            .dyn_into::<HtmlTableElement>()?;
        clone.remove_attribute("id")?;
        let rows = clone.rows();
        for row_index in 0..rows.length() {
            if let Some(row) = rows.item(row_index) {
                row.remove_attribute("id")?;
                if let Some(keep) = keep {
                    strip_cells(&row, keep)?;
                }
            }
        }
        Ok(clone)
    }

    fn build_row(&self, index: usize, row: &DisplayRow) -> Result<Element, JsValue> {
        let tr = self.document.create_element("tr")?;
        tr.set_id(&row.key.element_id());
        tag_row(&tr, index, row.key)?;

        for cell in &row.cells {
            let element = self.document.create_element(cell.tag_name())?;
            element.set_class_name(&cell.class_names().join(" "));
            element.set_attribute("column-type", cell.column_type.as_str())?;
            element.set_attribute(cell.column_type.as_str(), &cell.column_id)?;
            element.set_text_content(Some(&cell.text));
            tr.append_child(&element)?;
        }
        Ok(tr)
    }

    fn try_mark_row(&self, index: usize, key: RowKey) -> Result<(), JsValue> {
        let row = Self::body_row(&self.table, index)
            .ok_or_else(|| JsValue::from_str("rendered row missing"))?;
        tag_row(&row, index, key)
    }

    fn try_attach_row(&self, index: usize, row: &DisplayRow) -> Result<(), JsValue> {
        let body = self
            .table
            .t_bodies()
            .item(0)
            .ok_or_else(|| JsValue::from_str("results table has no body"))?;
        let tr = self.build_row(index, row)?;
        body.append_child(&tr)?;
        Ok(())
    }

    fn try_attach_mirror_row(&self, index: usize, row: &MirrorRow) -> Result<(), JsValue> {
        let mirror = self
            .columns_mirror
            .as_ref()
            .ok_or_else(|| JsValue::from_str("columns mirror not built"))?;
        let body = mirror
            .t_bodies()
            .item(0)
            .ok_or_else(|| JsValue::from_str("columns mirror has no body"))?;
        let live = Self::body_row(&self.table, index)
            .ok_or_else(|| JsValue::from_str("live row not attached"))?;

        let clone = live.clone_node_with_deep(true)?.dyn_into::<Element>()?;
        clone.remove_attribute("id")?;
        strip_cells(&clone, row.cells.len())?;
        body.append_child(&clone)?;
        Ok(())
    }

    fn try_attach_header_mirror(&mut self, mirror: &HeaderMirror) -> Result<(), JsValue> {
        let clone = self.clone_table(None)?;
        // header only
        let bodies = clone.t_bodies();
        while let Some(body) = bodies.item(0) {
            body.remove();
        }
        self.header_overlay.append_child(&clone)?;

        let ticks = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
        ticks.set_class_name("ticks");
        set_style(&ticks, "position", "absolute");
        set_style(&ticks, "top", "0");
        set_style(&ticks, "left", "0");
        set_style(&ticks, "height", "100%");
        for tick in mirror.ticks() {
            let element = self.document.create_element("div")?.dyn_into::<HtmlElement>()?;
            element.set_class_name(if tick.group_boundary { "tick group-tick" } else { "tick" });
            set_style(&element, "position", "absolute");
            set_style(&element, "height", "100%");
            set_style(&element, "width", &px(tick.width));
            ticks.append_child(&element)?;
        }
        self.header_overlay.append_child(&ticks)?;

        let (scroll_top, scroll_left) = self.scroll();
        let state = mirror.state();
        set_style(&self.header_overlay, "top", &px(state.initial_top_offset - scroll_top));
        set_style(&self.header_overlay, "left", &px(state.initial_left_offset - scroll_left));

        self.header_mirror = Some(clone);
        self.tick_layer = Some(ticks);
        Ok(())
    }

    fn try_attach_columns_mirror(&mut self, mirror: &LeadingColumnsMirror) -> Result<(), JsValue> {
        let clone = self.clone_table(Some(mirror.fixed_column_count()))?;
        self.columns_overlay.append_child(&clone)?;

        let (scroll_top, scroll_left) = self.scroll();
        let state = mirror.state();
        set_style(&self.columns_overlay, "top", &px(state.initial_top_offset - scroll_top));
        set_style(&self.columns_overlay, "left", &px(state.initial_left_offset - scroll_left));

        self.columns_mirror = Some(clone);
        Ok(())
    }
}

fn create_overlay(document: &Document, class_name: &str) -> Result<HtmlElement, JsValue> {
    let overlay = document.create_element("div")?.dyn_into::<HtmlElement>()?;
    overlay.set_class_name(class_name);
    set_style(&overlay, "position", "fixed");
    set_style(&overlay, "margin", "0");
    document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?
        .append_child(&overlay)?;
    Ok(overlay)
}

/// Row attributes the page scripts and event handlers read
fn tag_row(row: &Element, index: usize, key: RowKey) -> Result<(), JsValue> {
    row.set_attribute("trial-number", &key.trial_number.to_string())?;
    row.set_attribute("block-number", &key.block_number.to_string())?;
    row.set_attribute(ROW_INDEX_ATTRIBUTE, &index.to_string())
}

/// Key of a rendered row: its trial/block attributes, else its element id
fn row_key(row: &Element) -> Option<RowKey> {
    let number = |name: &str| -> Option<i64> { row.get_attribute(name)?.trim().parse().ok() };
    match (number("trial-number"), number("block-number")) {
        (Some(trial_number), Some(block_number)) => Some(RowKey {
            trial_number,
            block_number,
        }),
        _ => RowKey::from_element_id(&row.id()),
    }
}

/// Remove every cell of `row` at index `keep` or later
fn strip_cells(row: &Element, keep: usize) -> Result<(), JsValue> {
    let cells = row.children();
    while cells.length() as usize > keep {
        if let Some(last) = row.last_element_child() {
            last.remove();
        } else {
            break;
        }
    }
    Ok(())
}

impl LayoutPort for DomTableView {
    fn measure_width(&self, target: LayoutTarget) -> f64 {
        self.element(target)
            .map(|e| e.get_bounding_client_rect().width())
            .unwrap_or(0.0)
    }

    fn measure_height(&self, target: LayoutTarget) -> f64 {
        self.element(target)
            .map(|e| e.get_bounding_client_rect().height())
            .unwrap_or(0.0)
    }

    fn measure_offset(&self, target: LayoutTarget) -> Offset {
        let (scroll_top, scroll_left) = self.scroll();
        self.element(target)
            .map(|e| {
                let rect = e.get_bounding_client_rect();
                Offset::new(rect.top() + scroll_top, rect.left() + scroll_left)
            })
            .unwrap_or_default()
    }

    fn set_width(&mut self, target: LayoutTarget, width: f64) {
        let width = px(width);
        self.with_element(target, |e| {
            set_style(e, "width", &width);
            set_style(e, "min-width", &width);
            set_style(e, "max-width", &width);
            set_style(e, "box-sizing", "border-box");
        });
    }

    fn set_height(&mut self, target: LayoutTarget, height: f64) {
        self.with_element(target, |e| set_style(e, "height", &px(height)));
    }

    fn set_position(&mut self, target: LayoutTarget, position: Offset) {
        self.with_element(target, |e| {
            set_style(e, "top", &px(position.top));
            set_style(e, "left", &px(position.left));
        });
    }

    fn set_shadow(&mut self, target: LayoutTarget, shadow: Shadow) {
        self.with_element(target, |e| match shadow {
            Shadow::Flat => {
                log_dom_error("shadow", e.style().remove_property("box-shadow").map(|_| ()));
                log_dom_error("shadow", e.class_list().remove_1(ELEVATED_CLASS));
            }
            Shadow::Elevated(factor) => {
                let value = format!("0 0 {:.2}px rgba(0, 0, 0, {:.3})", 8.0 * factor, 0.5 * factor);
                set_style(e, "box-shadow", &value);
                log_dom_error("shadow", e.class_list().add_1(ELEVATED_CLASS));
            }
        });
    }

    fn set_highlight(&mut self, target: LayoutTarget, highlighted: bool) {
        self.with_element(target, |e| {
            let class_list = e.class_list();
            let result = if highlighted {
                class_list.add_1(HOVER_CLASS)
            } else {
                class_list.remove_1(HOVER_CLASS)
            };
            log_dom_error("highlight", result);
        });
    }
}

impl TableView for DomTableView {
    fn viewport(&self) -> Viewport {
        let (scroll_top, scroll_left) = self.scroll();
        let root = self.document.document_element();
        Viewport {
            scroll_top,
            scroll_left,
            document_width: root.as_ref().map(|r| r.scroll_width() as f64).unwrap_or(0.0),
            document_height: root.as_ref().map(|r| r.scroll_height() as f64).unwrap_or(0.0),
            viewport_width: self
                .window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
            viewport_height: self
                .window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
        }
    }

    fn rendered_rows(&self) -> Result<Vec<RenderedRow>, TableError> {
        let Some(body) = self.table.t_bodies().item(0) else {
            return Ok(Vec::new());
        };
        let rows = body.children();
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .enumerate()
            .map(|(index, row)| {
                let key = row_key(&row).ok_or(TableError::UnkeyedRow { index })?;
                let cells = row.children();
                let texts = (0..cells.length())
                    .filter_map(|c| cells.item(c))
                    .map(|cell| cell.text_content().unwrap_or_default().trim().to_string())
                    .collect();
                Ok(RenderedRow { key, texts })
            })
            .collect()
    }

    fn mark_row(&mut self, index: usize, key: RowKey) {
        log_dom_error("mark row", self.try_mark_row(index, key));
    }

    fn attach_row(&mut self, index: usize, row: &DisplayRow) {
        log_dom_error("attach row", self.try_attach_row(index, row));
    }

    fn attach_mirror_row(&mut self, index: usize, row: &MirrorRow) {
        log_dom_error("attach mirror row", self.try_attach_mirror_row(index, row));
    }

    fn attach_header_mirror(&mut self, mirror: &HeaderMirror) {
        let result = self.try_attach_header_mirror(mirror);
        log_dom_error("attach header mirror", result);
    }

    fn attach_columns_mirror(&mut self, mirror: &LeadingColumnsMirror) {
        let result = self.try_attach_columns_mirror(mirror);
        log_dom_error("attach columns mirror", result);
    }

    fn show_disconnected(&mut self) {
        if let Some(body) = self.document.body() {
            log_dom_error("disconnected", body.class_list().add_1("disconnected"));
        }
        if let Some(message) = &self.message {
            message.set_text_content(Some(DISCONNECTED_TEXT));
            set_style(message, "display", "block");
        }
    }
}
