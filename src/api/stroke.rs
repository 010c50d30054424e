//! `StrokeDrawer` JS class: stroke replay on a canvas

use super::canvas::CanvasSurface;
use super::helpers::{deserialize, to_js_error};
use crate::config::StrokeConfig;
use crate::models::StrokeEvent;
use crate::stroke::StrokeRenderer;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
pub struct StrokeDrawer {
    renderer: StrokeRenderer<CanvasSurface>,
}

#[wasm_bindgen]
impl StrokeDrawer {
    /// `config`: `{x_column, y_column, time_column}` plus optional paint settings.
    /// `events`: raw trial events, objects keyed by measure id.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue, events: JsValue) -> Result<StrokeDrawer, JsValue> {
        let config: StrokeConfig = deserialize(config, "Invalid stroke configuration")?;
        let raw: Vec<serde_json::Value> = deserialize(events, "Invalid stroke events")?;
        let events = raw
            .iter()
            .enumerate()
            .map(|(index, event)| {
                StrokeEvent::from_raw(
                    index,
                    event,
                    &config.x_column,
                    &config.y_column,
                    &config.time_column,
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| to_js_error("Stroke events", e))?;

        let surface = CanvasSurface::new(canvas)?;
        log::debug!("stroke drawer with {} events", events.len());
        Ok(StrokeDrawer {
            renderer: StrokeRenderer::with_style(events, surface, config.style),
        })
    }

    /// Draw up to `time` (everything when omitted); `redraw` forces a full repaint
    pub fn draw(&mut self, time: Option<f64>, redraw: Option<bool>) {
        self.renderer.draw(time, redraw.unwrap_or(false));
    }

    #[wasm_bindgen(getter, js_name = currentDrawnTime)]
    pub fn current_drawn_time(&self) -> f64 {
        self.renderer.current_drawn_time()
    }

    /// `[firstEventTime, lastEventTime]`
    #[wasm_bindgen(js_name = getTimeWindow)]
    pub fn time_window(&self) -> Result<js_sys::Array, JsValue> {
        let (start, end) = self
            .renderer
            .time_window()
            .map_err(|e| to_js_error("Time window", e))?;
        Ok(js_sys::Array::of2(&JsValue::from_f64(start), &JsValue::from_f64(end)))
    }
}
