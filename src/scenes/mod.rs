//! The mounted scenes
//!
//! Each scene owns its state and implements [`Scene`]; `build` turns a scene
//! kind plus settings into a boxed scene ready for a `SceneEngine`.

pub mod hero;
pub mod logo;
pub mod network;
pub mod plotter;
pub mod surface;

pub use hero::HeroScene;
pub use logo::LogoScene;
pub use network::NetworkScene;
pub use plotter::PlotterScene;
pub use surface::SurfaceScene;

use crate::Settings;
use crate::engine::{LayerOffset, Scene};
use crate::settings::ScrollLayer;

/// Scene kinds, by page role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    Logo,
    Hero,
    Network,
    Plotter,
    Surface,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Logo,
        SceneKind::Hero,
        SceneKind::Network,
        SceneKind::Plotter,
        SceneKind::Surface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Logo => "logo",
            SceneKind::Hero => "hero",
            SceneKind::Network => "network",
            SceneKind::Plotter => "plotter",
            SceneKind::Surface => "surface",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "logo" => Some(SceneKind::Logo),
            "hero" => Some(SceneKind::Hero),
            "network" | "mesh" => Some(SceneKind::Network),
            "plotter" | "plot" => Some(SceneKind::Plotter),
            "surface" | "surface3d" => Some(SceneKind::Surface),
            _ => None,
        }
    }

    /// Canvas element id mounted automatically at start-up
    pub fn canvas_id(&self) -> &'static str {
        match self {
            SceneKind::Logo => "logo-canvas",
            SceneKind::Hero => "hero-canvas",
            SceneKind::Network => "network-canvas",
            SceneKind::Plotter => "plotter-canvas",
            SceneKind::Surface => "surface-canvas",
        }
    }
}

/// Build the scene for `kind`
pub fn build(kind: SceneKind, settings: &Settings, seed: u64) -> Box<dyn Scene> {
    match kind {
        SceneKind::Logo => Box::new(LogoScene::new(settings, seed)),
        SceneKind::Hero => Box::new(HeroScene::new(settings, seed)),
        SceneKind::Network => Box::new(NetworkScene::new(settings, seed)),
        SceneKind::Plotter => Box::new(PlotterScene::new(settings)),
        SceneKind::Surface => Box::new(SurfaceScene::new(settings)),
    }
}

/// Scroll layers offset by `scroll_y`
fn scroll_offsets(layers: &[ScrollLayer], scroll_y: f32) -> Vec<LayerOffset> {
    layers
        .iter()
        .map(|layer| LayerOffset {
            selector: layer.selector.clone(),
            offset_px: scroll_y * layer.factor,
        })
        .collect()
}
