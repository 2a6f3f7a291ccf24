//! 2D drawing surface abstraction
//!
//! Mirrors the subset of `CanvasRenderingContext2d` the scenes use, so the
//! painters run unchanged against the browser and against [`DrawList`].
//!
//! [`DrawList`]: super::DrawList

use glam::Vec2;

use super::color::Rgba;
use crate::Size;

/// One path segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSeg {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Cubic Bézier: two control points, then the end point
    CubicTo(Vec2, Vec2, Vec2),
}

/// A path built from segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub segs: Vec<PathSeg>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segs.push(PathSeg::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segs.push(PathSeg::LineTo(p));
        self
    }

    pub fn cubic_to(mut self, c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        self.segs.push(PathSeg::CubicTo(c1, c2, end));
        self
    }

    /// Open polyline through `points`
    pub fn polyline(points: &[Vec2]) -> Self {
        let mut segs = Vec::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            segs.push(if i == 0 {
                PathSeg::MoveTo(*p)
            } else {
                PathSeg::LineTo(*p)
            });
        }
        Self { segs }
    }

    /// Single segment from `a` to `b`
    pub fn segment(a: Vec2, b: Vec2) -> Self {
        Self::new().move_to(a).line_to(b)
    }

    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }
}

/// Fill or stroke source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Linear gradient between two points
    Linear {
        from: Vec2,
        to: Vec2,
        start: Rgba,
        end: Rgba,
    },
    /// Radial gradient from `center` (inner colour) out to `radius`
    Radial {
        center: Vec2,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// Stroke style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f32,
    /// Dash and gap length, `None` for a solid line
    pub dash: Option<(f32, f32)>,
    /// Round caps and joins
    pub round: bool,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            paint: Paint::Solid(color),
            width,
            dash: None,
            round: false,
        }
    }

    pub fn dashed(mut self, dash: f32, gap: f32) -> Self {
        self.dash = Some((dash, gap));
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }
}

/// Text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size_px: f32,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size_px: f32) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    pub const fn bold(size_px: f32) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }

    /// CSS font shorthand
    pub fn to_css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px system-ui, sans-serif", weight, self.size_px)
    }
}

/// A 2D drawing surface
pub trait Canvas {
    /// Current pixel size
    fn size(&self) -> Size;

    /// Resize the backing store (clears it, as the browser does)
    fn set_size(&mut self, size: Size);

    /// False once the surface has been detached from its document
    fn is_attached(&self) -> bool {
        true
    }

    /// Clear the whole surface
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);

    fn fill_text(&mut self, text: &str, pos: Vec2, font: Font, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_segments() {
        let path = Path::polyline(&[Vec2::ZERO, Vec2::X, Vec2::ONE]);
        assert_eq!(path.segs.len(), 3);
        assert!(matches!(path.segs[0], PathSeg::MoveTo(_)));
        assert!(matches!(path.segs[2], PathSeg::LineTo(p) if p == Vec2::ONE));
        assert!(Path::polyline(&[]).is_empty());
    }

    #[test]
    fn test_font_css() {
        assert_eq!(Font::bold(16.0).to_css(), "bold 16px system-ui, sans-serif");
        assert_eq!(Font::regular(14.0).to_css(), "14px system-ui, sans-serif");
    }
}
