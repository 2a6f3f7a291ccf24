//! 2D function plot sampling
//!
//! Everything here is recomputed from scratch on every update: the curve, the
//! derivative curve and the markers depend only on the canvas size, the
//! selected descriptor and the cursor.

use glam::Vec2;

use super::functions::{FunctionDescriptor, FunctionKind};
use crate::Size;
use crate::consts::HOVER_RADIUS;

/// Axis length as a fraction of the smaller canvas side
pub const AXIS_FRACTION: f32 = 0.8;
/// Markers spread along the visible domain
pub const MARKER_COUNT: usize = 20;
/// Marker radius, idle and hovered
pub const MARKER_RADIUS: f32 = 6.0;
pub const MARKER_RADIUS_ACTIVE: f32 = 8.0;

/// Plot placement on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub origin: Vec2,
    /// Half the axis length (px); also the y clamp
    pub half_axis: f32,
    /// Pixels per domain unit
    pub scale: f32,
}

impl PlotGeometry {
    /// Centered axes sized to the smaller canvas side
    pub fn fit(size: Size, scale: f32) -> Self {
        let axis = size.width.min(size.height) as f32 * AXIS_FRACTION;
        Self {
            origin: size.center(),
            half_axis: axis / 2.0,
            scale,
        }
    }

    /// Canvas point for domain `x` (in px from the origin) under `f`
    pub fn point(&self, dx: f32, f: fn(f32) -> f32) -> Vec2 {
        let y = f(dx / self.scale) * self.scale;
        let y = if y.is_finite() {
            y.clamp(-self.half_axis, self.half_axis)
        } else if y > 0.0 {
            self.half_axis
        } else {
            -self.half_axis
        };
        Vec2::new(self.origin.x + dx, self.origin.y - y)
    }

    /// Domain coordinates of a canvas point
    pub fn to_domain(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            (p.x - self.origin.x) / self.scale,
            (self.origin.y - p.y) / self.scale,
        )
    }
}

/// A sampled marker on the curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    pub active: bool,
}

impl Marker {
    pub fn radius(&self) -> f32 {
        if self.active {
            MARKER_RADIUS_ACTIVE
        } else {
            MARKER_RADIUS
        }
    }
}

/// Sampled plot for one descriptor
#[derive(Debug, Clone)]
pub struct PlotState {
    kinds: Vec<FunctionKind>,
    pub geometry: PlotGeometry,
    pub curve: Vec<Vec2>,
    pub derivative: Vec<Vec2>,
    pub markers: Vec<Marker>,
}

impl PlotState {
    pub fn new(kinds: Vec<FunctionKind>, size: Size, scale: f32) -> Self {
        Self {
            kinds,
            geometry: PlotGeometry::fit(size, scale),
            curve: Vec::new(),
            derivative: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn kinds(&self) -> &[FunctionKind] {
        &self.kinds
    }

    /// Descriptor at `selected` (wrapping)
    pub fn descriptor(&self, selected: usize) -> &'static FunctionDescriptor {
        if self.kinds.is_empty() {
            return FunctionKind::Sigmoid.descriptor();
        }
        self.kinds[selected % self.kinds.len()].descriptor()
    }

    pub fn resize(&mut self, size: Size) {
        self.geometry = PlotGeometry::fit(size, self.geometry.scale);
    }

    /// Resample everything for the current selection and cursor
    pub fn sample(&mut self, selected: usize, cursor: Option<Vec2>, with_derivative: bool) {
        let descriptor = self.descriptor(selected);
        let g = self.geometry;
        let half = g.half_axis.floor() as i32;

        self.curve.clear();
        self.derivative.clear();
        for i in -half..=half {
            self.curve.push(g.point(i as f32, descriptor.eval));
            if with_derivative {
                self.derivative.push(g.point(i as f32, descriptor.derivative));
            }
        }

        self.markers.clear();
        for i in 0..MARKER_COUNT {
            let t = i as f32 / (MARKER_COUNT - 1) as f32;
            let dx = -g.half_axis + 2.0 * g.half_axis * t;
            let pos = g.point(dx, descriptor.eval);
            let active = cursor.is_some_and(|c| c.distance(pos) < HOVER_RADIUS);
            self.markers.push(Marker { pos, active });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLOT_SCALE;

    fn plot() -> PlotState {
        PlotState::new(FunctionKind::ALL.to_vec(), Size::new(800, 500), PLOT_SCALE)
    }

    #[test]
    fn test_geometry_fits_smaller_side() {
        let g = PlotGeometry::fit(Size::new(800, 500), 100.0);
        assert_eq!(g.origin, Vec2::new(400.0, 250.0));
        assert_eq!(g.half_axis, 200.0);
    }

    #[test]
    fn test_y_is_inverted_and_scaled() {
        let g = PlotGeometry::fit(Size::new(800, 500), 100.0);
        let sigmoid = FunctionKind::Sigmoid.descriptor().eval;
        // sigmoid(0) = 0.5 -> 50px above the origin
        assert!((g.point(0.0, sigmoid) - Vec2::new(400.0, 200.0)).length() < 1e-3);
        let p = g.to_domain(Vec2::new(500.0, 150.0));
        assert_eq!(p, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_y_clamped_to_axis() {
        let g = PlotGeometry::fit(Size::new(800, 500), 100.0);
        let exp = FunctionKind::Exponential.descriptor().eval;
        assert_eq!(g.point(200.0, exp).y, 250.0 - 200.0);
        // e^x overflows to inf for large x and is still clamped
        assert_eq!(g.point(1.0e6, exp).y, 50.0);
    }

    #[test]
    fn test_sample_one_point_per_pixel() {
        let mut state = plot();
        state.sample(0, None, false);
        assert_eq!(state.curve.len(), 401);
        assert!(state.derivative.is_empty());
        assert_eq!(state.markers.len(), MARKER_COUNT);
        assert_eq!(state.markers[0].pos.x, 200.0);
        assert_eq!(state.markers[MARKER_COUNT - 1].pos.x, 600.0);

        state.sample(0, None, true);
        assert_eq!(state.derivative.len(), 401);
    }

    #[test]
    fn test_marker_hover() {
        let mut state = plot();
        state.sample(0, None, false);
        let target = state.markers[5].pos;

        state.sample(0, Some(target + Vec2::new(10.0, 10.0)), false);
        assert!(state.markers[5].active);
        assert_eq!(state.markers[5].radius(), MARKER_RADIUS_ACTIVE);
        assert!(!state.markers[15].active);

        state.sample(0, Some(target + Vec2::new(31.0, 0.0)), false);
        assert!(!state.markers[5].active);
    }

    #[test]
    fn test_selection_wraps() {
        let state = plot();
        assert_eq!(state.descriptor(0).kind, FunctionKind::Sigmoid);
        assert_eq!(state.descriptor(9).kind, FunctionKind::Relu);
    }
}
