//! `Canvas` backed by a `<canvas>` element's 2D context

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::mount::MountError;
use crate::Size;
use crate::renderer::{Canvas, Font, Paint, Path, PathSeg, Rgba, Stroke};

pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(element: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(MountError::NoContext)?;
        Ok(Self { element, ctx })
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, start, end) = match *paint {
            Paint::Solid(_) => return None,
            Paint::Linear {
                from,
                to,
                start,
                end,
            } => (
                self.ctx
                    .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64),
                start,
                end,
            ),
            Paint::Radial {
                center,
                radius,
                inner,
                outer,
            } => (
                self.ctx
                    .create_radial_gradient(
                        center.x as f64,
                        center.y as f64,
                        0.0,
                        center.x as f64,
                        center.y as f64,
                        radius.max(0.0) as f64,
                    )
                    .ok()?,
                inner,
                outer,
            ),
        };
        let _ = gradient.add_color_stop(0.0, &start.to_css());
        let _ = gradient.add_color_stop(1.0, &end.to_css());
        Some(gradient)
    }

    fn set_stroke_paint(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(gradient)) => self.ctx.set_stroke_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_stroke_style_str(&color.to_css()),
            // Degenerate gradient: fall back to its first stop
            (Paint::Linear { start, .. }, None) => self.ctx.set_stroke_style_str(&start.to_css()),
            (Paint::Radial { inner, .. }, None) => self.ctx.set_stroke_style_str(&inner.to_css()),
        }
    }

    fn set_fill_paint(&self, paint: &Paint) {
        match (paint, self.gradient(paint)) {
            (_, Some(gradient)) => self.ctx.set_fill_style_canvas_gradient(&gradient),
            (Paint::Solid(color), None) => self.ctx.set_fill_style_str(&color.to_css()),
            (Paint::Linear { start, .. }, None) => self.ctx.set_fill_style_str(&start.to_css()),
            (Paint::Radial { inner, .. }, None) => self.ctx.set_fill_style_str(&inner.to_css()),
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.set_stroke_paint(&stroke.paint);
        self.ctx.set_line_width(stroke.width as f64);
        let dash = js_sys::Array::new();
        if let Some((on, off)) = stroke.dash {
            dash.push(&JsValue::from_f64(on as f64));
            dash.push(&JsValue::from_f64(off as f64));
        }
        let _ = self.ctx.set_line_dash(&dash);
        let (cap, join) = if stroke.round {
            ("round", "round")
        } else {
            ("butt", "miter")
        };
        self.ctx.set_line_cap(cap);
        self.ctx.set_line_join(join);
    }

    fn trace(&self, path: &Path) {
        self.ctx.begin_path();
        for seg in &path.segs {
            match *seg {
                PathSeg::MoveTo(p) => self.ctx.move_to(p.x as f64, p.y as f64),
                PathSeg::LineTo(p) => self.ctx.line_to(p.x as f64, p.y as f64),
                PathSeg::CubicTo(c1, c2, end) => self.ctx.bezier_curve_to(
                    c1.x as f64,
                    c1.y as f64,
                    c2.x as f64,
                    c2.y as f64,
                    end.x as f64,
                    end.y as f64,
                ),
            }
        }
    }

    fn circle(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
    }
}

impl Canvas for WebCanvas {
    fn size(&self) -> Size {
        Size::new(self.element.width(), self.element.height())
    }

    fn set_size(&mut self, size: Size) {
        self.element.set_width(size.width);
        self.element.set_height(size.height);
    }

    fn is_attached(&self) -> bool {
        self.element.is_connected()
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        self.apply_stroke(stroke);
        self.trace(path);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.set_fill_paint(paint);
        if self.circle(center, radius) {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.apply_stroke(stroke);
        if self.circle(center, radius) {
            self.ctx.stroke();
        }
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, color: Rgba) {
        self.ctx.set_font(&font.to_css());
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
