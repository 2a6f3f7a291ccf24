//! Path generation for recurring primitives

use glam::Vec2;

use super::canvas::Path;
use crate::Size;

/// Grid lines aligned to `origin`, covering the whole canvas
pub fn grid(size: Size, origin: Vec2, spacing: f32) -> Path {
    let mut path = Path::new();
    if spacing <= 0.0 || size.is_empty() {
        return path;
    }
    let (w, h) = (size.width as f32, size.height as f32);

    let mut x = origin.x.rem_euclid(spacing);
    while x < w {
        path = path.move_to(Vec2::new(x, 0.0)).line_to(Vec2::new(x, h));
        x += spacing;
    }
    let mut y = origin.y.rem_euclid(spacing);
    while y < h {
        path = path.move_to(Vec2::new(0.0, y)).line_to(Vec2::new(w, y));
        y += spacing;
    }
    path
}

/// Horizontal and vertical axes crossing at `origin`
pub fn axes(origin: Vec2, half_length: f32) -> Path {
    Path::new()
        .move_to(Vec2::new(origin.x - half_length, origin.y))
        .line_to(Vec2::new(origin.x + half_length, origin.y))
        .move_to(Vec2::new(origin.x, origin.y - half_length))
        .line_to(Vec2::new(origin.x, origin.y + half_length))
}

/// Evenly spaced points on the segment `a..b`, `b` excluded
pub fn segment_points(a: Vec2, b: Vec2, steps: usize) -> impl Iterator<Item = Vec2> {
    (0..steps).map(move |j| a.lerp(b, j as f32 / steps as f32))
}

/// Polyline through projected points, skipping gaps (`None`)
///
/// Each run of consecutive `Some` points becomes its own sub-path.
pub fn broken_polyline(points: impl IntoIterator<Item = Option<Vec2>>) -> Path {
    let mut path = Path::new();
    let mut pen_down = false;
    for p in points {
        match p {
            Some(p) if pen_down => path = path.line_to(p),
            Some(p) => {
                path = path.move_to(p);
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    path
}
