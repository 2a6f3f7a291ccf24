//! Hero background particle field

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::scroll_offsets;
use crate::engine::{Binding, EventKind, LayerOffset, Scene};
use crate::input::Interaction;
use crate::renderer::painters::paint_field;
use crate::renderer::{Canvas, Rgba};
use crate::settings::ScrollLayer;
use crate::sim::particles::{CursorForce, ParticleField, SpawnRanges};
use crate::{Settings, Size};

pub struct HeroScene {
    count: usize,
    spawn: SpawnRanges,
    force: CursorForce,
    color: Rgba,
    layers: Vec<ScrollLayer>,
    rng: Pcg32,
    /// Scattered on the first non-empty resize, once the canvas size is known
    field: Option<ParticleField>,
}

impl HeroScene {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let config = &settings.hero;
        Self {
            count: settings.quality.scaled(config.particles),
            spawn: config.spawn,
            force: settings.effective_cursor(config.cursor),
            color: Rgba::from_hex(&config.color),
            layers: settings.effective_layers(&config.layers).to_vec(),
            rng: Pcg32::seed_from_u64(seed),
            field: None,
        }
    }
}

impl Scene for HeroScene {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn bindings(&self) -> Vec<Binding> {
        // The canvas sits behind the hero content, so the pointer is tracked
        // on the window
        vec![
            Binding::window(EventKind::PointerMove),
            Binding::window(EventKind::Resize),
            Binding::window(EventKind::Scroll),
        ]
    }

    fn resize(&mut self, size: Size, _interaction: &Interaction) {
        match &mut self.field {
            Some(field) => field.resize(size),
            // An unsized canvas would stack every particle on the origin
            None if size.is_empty() => {}
            None => {
                self.field = Some(ParticleField::scatter(
                    self.count,
                    size,
                    &self.spawn,
                    self.force,
                    &mut self.rng,
                ));
            }
        }
    }

    fn update(&mut self, interaction: &Interaction, dt: f32) {
        if let Some(field) = &mut self.field {
            field.step(interaction.cursor, dt);
        }
    }

    fn render(&self, _interaction: &Interaction, canvas: &mut dyn Canvas) {
        match &self.field {
            Some(field) => paint_field(canvas, field, self.color),
            None => canvas.clear(),
        }
    }

    fn layers(&self, interaction: &Interaction) -> Vec<LayerOffset> {
        scroll_offsets(&self.layers, interaction.scroll_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RecordingHost, SceneEngine};
    use crate::input::InputEvent;
    use crate::renderer::DrawList;
    use glam::Vec2;

    fn mounted(settings: &Settings) -> SceneEngine<DrawList, RecordingHost> {
        let host = RecordingHost::new(Some(Size::new(1024, 768)));
        let mut engine = SceneEngine::new(
            Box::new(HeroScene::new(settings, 11)),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();
        engine
    }

    #[test]
    fn test_fifty_particles_fill_the_container() {
        let engine = mounted(&Settings::default());
        assert_eq!(engine.canvas().size(), Size::new(1024, 768));
        assert_eq!(engine.canvas().circles().len(), 50);
    }

    #[test]
    fn test_quality_scales_count() {
        let engine = mounted(&Settings::from_preset(crate::QualityPreset::Low));
        assert_eq!(engine.canvas().circles().len(), 25);
    }

    #[test]
    fn test_scroll_moves_layers() {
        let mut engine = mounted(&Settings::default());
        let log = engine.host().log();
        engine.on_input(InputEvent::Scroll(300.0));
        log.borrow_mut().take_frame();
        engine.on_frame(16.0);

        let log = log.borrow();
        assert!((log.layers[".hero-title"] - 60.0).abs() < 1e-3);
        assert!((log.layers[".hero-description"] - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_unsized_mount_scatters_on_first_real_resize() {
        let mut engine = SceneEngine::new(
            Box::new(HeroScene::new(&Settings::default(), 11)),
            DrawList::new(Size::default()),
            RecordingHost::new(None),
        );
        engine.mount();
        assert!(engine.canvas().circles().is_empty());

        engine.on_input(InputEvent::Resize(Size::new(1024, 768)));
        let circles = engine.canvas().circles();
        assert_eq!(circles.len(), 50);
        let (min, max) = circles.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), (c, _, _)| (min.min(*c), max.max(*c)),
        );
        // Spread over the canvas, not stacked on the origin
        assert!(max.x - min.x > 512.0);
        assert!(max.y - min.y > 384.0);
    }

    #[test]
    fn test_reduced_motion_drops_layers_and_parallax() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let scene = HeroScene::new(&settings, 1);
        assert!(scene.layers.is_empty());
        assert_eq!(scene.force, CursorForce::None);
    }
}
