//! Colour type shared by the painters and the canvas backends

use serde::{Deserialize, Serialize};

/// 8-bit RGB with a float alpha, matching CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse `#rrggbb` (or `rrggbb`). Malformed channels read as 0.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        Self::rgb(channel(0..2), channel(2..4), channel(4..6))
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scale the RGB channels, saturating at 255
    pub fn scale_rgb(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }

    /// CSS colour string for the 2D context
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fixed colours used by the painters
pub mod colors {
    use super::Rgba;

    pub const GRID: Rgba = Rgba::new(200, 200, 200, 0.1);
    pub const AXIS: Rgba = Rgba::new(150, 150, 150, 0.5);
    pub const MARKER_OUTLINE: Rgba = Rgba::new(255, 255, 255, 0.8);
    pub const MARKER_LINK: Rgba = Rgba::new(200, 200, 200, 0.3);
    pub const ACCENT: Rgba = Rgba::new(0, 122, 255, 0.8);
    pub const ACCENT_FADED: Rgba = Rgba::new(0, 122, 255, 0.4);
    pub const CURSOR_HALO: Rgba = Rgba::new(0, 122, 255, 0.05);
    pub const CURSOR_RING: Rgba = Rgba::new(0, 122, 255, 0.2);
    pub const TEXT: Rgba = Rgba::new(50, 50, 50, 0.9);
    pub const TEXT_MUTED: Rgba = Rgba::new(100, 100, 100, 0.8);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const INK: Rgba = Rgba::rgb(0, 0, 0);
    pub const SURFACE_GRID: Rgba = Rgba::new(136, 136, 136, 0.35);
    pub const AXIS_X: Rgba = Rgba::rgb(255, 0, 0);
    pub const AXIS_Y: Rgba = Rgba::rgb(0, 255, 0);
    pub const AXIS_Z: Rgba = Rgba::rgb(0, 0, 255);
    pub const PROBE: Rgba = Rgba::rgb(255, 0, 0);
}
