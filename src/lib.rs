//! Portfolio Scenes - canvas animations for the portfolio site
//!
//! Core modules:
//! - `engine`: Scene engine (frame scheduler, lifecycle, host abstraction)
//! - `input`: Input adapter and per-scene interaction state
//! - `sim`: Scene state (particles, function catalogue, plot sampling)
//! - `renderer`: 2D canvas abstraction and scene painters
//! - `scenes`: The five mounted scenes
//! - `platform`: Browser host and canvas bindings
//! - `settings`: Data-driven scene configuration

pub mod engine;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use engine::{Scene, SceneEngine};
pub use input::{InputEvent, Interaction};
pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// Engine configuration constants
pub mod consts {
    /// Fixed update step (one reference frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Reference frame rate that per-frame velocities are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Maximum update steps per rendered frame
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap honoured by the clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Cursor distance below which a plot marker is active (px)
    pub const HOVER_RADIUS: f32 = 30.0;
    /// Default plot scale (px per unit)
    pub const PLOT_SCALE: f32 = 100.0;
    /// Default friction applied to excess particle velocity
    pub const PARTICLE_DAMPING: f32 = 0.99;
    /// Default cursor influence radius for attract/repel fields (px)
    pub const CURSOR_RADIUS: f32 = 120.0;
}

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point in canvas coordinates
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn as_vec2(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Wrap a coordinate into `[0, extent)`.
///
/// Degenerate extents collapse to 0 so an unsized canvas never produces NaN.
#[inline]
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(5.0, 10.0), 5.0);
        assert_eq!(wrap_coordinate(12.0, 10.0), 2.0);
        assert_eq!(wrap_coordinate(-3.0, 10.0), 7.0);
        assert_eq!(wrap_coordinate(10.0, 10.0), 0.0);
        assert_eq!(wrap_coordinate(-1e-9, 10.0), 0.0);
    }

    #[test]
    fn test_wrap_degenerate_extent() {
        assert_eq!(wrap_coordinate(5.0, 0.0), 0.0);
        assert_eq!(wrap_coordinate(f32::NAN, 10.0), 0.0);
    }

    #[test]
    fn test_size_center() {
        let size = Size::new(800, 600);
        assert_eq!(size.center(), glam::Vec2::new(400.0, 300.0));
        assert!(!size.is_empty());
        assert!(Size::new(0, 10).is_empty());
    }
}
