//! Scene settings
//!
//! Read once at start-up from a JSON block on the page (or the argument of
//! `mount_scene`). Every field has a default, so partial JSON is fine.

use serde::{Deserialize, Serialize};

use crate::sim::functions::FunctionKind;
use crate::sim::particles::{CursorForce, SpawnRanges};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Particle count multiplier (1.0 = configured count)
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Scale a configured particle count, keeping at least one
    pub fn scaled(&self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        ((count as f32 * self.particle_scale()).round() as usize).max(1)
    }
}

/// Overlay element translated by a fraction of the scroll offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayer {
    pub selector: String,
    pub factor: f32,
}

impl ScrollLayer {
    pub fn new(selector: &str, factor: f32) -> Self {
        Self {
            selector: selector.to_string(),
            factor,
        }
    }
}

/// Animated logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    /// Canvas side (px); the logo canvas ignores its container
    pub size: u32,
    /// `#rrggbb`
    pub color: String,
    /// When false the logo is drawn once and never animated
    pub animated: bool,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            size: 300,
            color: "#000000".to_string(),
            animated: true,
        }
    }
}

/// Hero background particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub particles: usize,
    pub spawn: SpawnRanges,
    pub color: String,
    pub cursor: CursorForce,
    pub layers: Vec<ScrollLayer>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particles: 50,
            spawn: SpawnRanges::default(),
            color: "#000000".to_string(),
            cursor: CursorForce::Parallax {
                gain: 2.0,
                normalized: true,
            },
            layers: vec![
                ScrollLayer::new(".hero-title", 0.2),
                ScrollLayer::new(".hero-description", 0.1),
            ],
        }
    }
}

/// Home page network mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub points: usize,
    pub spawn: SpawnRanges,
    /// Link distance (px)
    pub max_distance: f32,
    /// Opacity of a zero-length link
    pub link_opacity: f32,
    pub color: String,
    pub cursor: CursorForce,
    pub layers: Vec<ScrollLayer>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            points: 80,
            spawn: SpawnRanges {
                size: (1.0, 1.0),
                speed: 0.25,
                opacity: (0.2, 0.2),
            },
            max_distance: 150.0,
            link_opacity: 0.1,
            color: "#000000".to_string(),
            cursor: CursorForce::Parallax {
                gain: 0.0002,
                normalized: false,
            },
            layers: vec![
                ScrollLayer::new(".hero-title", 0.2),
                ScrollLayer::new(".hero-subtitle", 0.1),
                ScrollLayer::new(".hero-buttons", 0.15),
            ],
        }
    }
}

/// 2D function plotter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterConfig {
    /// Selection cycle, in order
    pub functions: Vec<FunctionKind>,
    /// Pixels per domain unit
    pub scale: f32,
    pub show_derivative: bool,
    pub show_hint: bool,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            functions: FunctionKind::ALL.to_vec(),
            scale: crate::consts::PLOT_SCALE,
            show_derivative: false,
            show_hint: true,
        }
    }
}

/// Ids of the surface plotter's control elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceControls {
    pub function_select: String,
    pub rotation_speed: String,
    pub animation_speed: String,
    pub play_pause: String,
    pub manual_x: String,
}

impl Default for SurfaceControls {
    fn default() -> Self {
        Self {
            function_select: "function-select".to_string(),
            rotation_speed: "rotation-speed".to_string(),
            animation_speed: "animation-speed".to_string(),
            play_pause: "play-pause".to_string(),
            manual_x: "manual-x".to_string(),
        }
    }
}

/// 3D activation surface plotter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub functions: Vec<FunctionKind>,
    pub animation_speed: f32,
    pub rotation_speed: f32,
    pub controls: SurfaceControls,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            functions: FunctionKind::ACTIVATIONS.to_vec(),
            animation_speed: 50.0,
            rotation_speed: 0.5,
            controls: SurfaceControls::default(),
        }
    }
}

/// All scene settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Disable cursor parallax, scroll layers and logo motion
    pub reduced_motion: bool,
    /// Fixed RNG seed; clock-seeded when absent
    pub seed: Option<u64>,

    pub logo: LogoConfig,
    pub hero: HeroConfig,
    pub network: NetworkConfig,
    pub plotter: PlotterConfig,
    pub surface: SurfaceConfig,
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, falling back to defaults on malformed JSON
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed scene settings: {}", e);
                Self::default()
            }
        }
    }

    /// Cursor force after accessibility overrides
    pub fn effective_cursor(&self, force: CursorForce) -> CursorForce {
        if self.reduced_motion {
            CursorForce::None
        } else {
            force
        }
    }

    /// Scroll layers after accessibility overrides
    pub fn effective_layers<'a>(&self, layers: &'a [ScrollLayer]) -> &'a [ScrollLayer] {
        if self.reduced_motion { &[] } else { layers }
    }

    /// Seed to use when none is configured
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }
}
