//! Recording canvas
//!
//! Keeps the operations of the most recent frame. Used for headless runs and
//! for asserting on what the painters drew.

use glam::Vec2;

use super::canvas::{Canvas, Font, Paint, Path, Stroke};
use super::color::Rgba;
use crate::Size;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    StrokePath { path: Path, stroke: Stroke },
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    Text { text: String, pos: Vec2, font: Font, color: Rgba },
}

/// Canvas that records operations instead of rasterising them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    size: Size,
    attached: bool,
    ops: Vec<DrawOp>,
    /// Number of clears (one per painted frame)
    frames: u64,
}

impl DrawList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            attached: true,
            ..Default::default()
        }
    }

    /// Simulate the surface being removed from the page
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Operations since the last clear (the clear included)
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Recorded text strings, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Recorded filled circles as (center, radius, paint)
    pub fn circles(&self) -> Vec<(Vec2, f32, &Paint)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillCircle {
                    center,
                    radius,
                    paint,
                } => Some((*center, *radius, paint)),
                _ => None,
            })
            .collect()
    }

    /// Recorded stroked paths
    pub fn paths(&self) -> Vec<(&Path, &Stroke)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokePath { path, stroke } => Some((path, stroke)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
        self.ops.clear();
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
        self.frames += 1;
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            stroke: *stroke,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, color: Rgba) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            pos,
            font,
            color,
        });
    }
}
