//! Canvas 2D drawing surface for the stroke replay

use crate::models::{Point, StrokeStyle};
use crate::stroke::DrawingSurface;
use std::f64::consts::PI;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Failed to get 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to CanvasRenderingContext2d"))?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawingSurface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_marker(&mut self, center: Point, style: &StrokeStyle) {
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(center.x, center.y, style.marker_radius, 0.0, 2.0 * PI) {
            log::error!("stroke marker: {:?}", err);
            return;
        }
        self.ctx.set_fill_style_str(&style.marker_color);
        self.ctx.fill();
    }

    fn begin_path(&mut self, at: Point) {
        self.ctx.begin_path();
        self.ctx.move_to(at.x, at.y);
    }

    fn line_to(&mut self, to: Point) {
        self.ctx.line_to(to.x, to.y);
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.ctx.set_line_width(style.line_width);
        self.ctx.set_line_cap(style.line_cap.as_str());
        self.ctx.set_stroke_style_str(&style.line_color);
        self.ctx.stroke();
    }
}
