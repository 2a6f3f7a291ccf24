//! Home page network mesh

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::scroll_offsets;
use crate::engine::{Binding, EventKind, LayerOffset, Scene};
use crate::input::Interaction;
use crate::renderer::painters::paint_network;
use crate::renderer::{Canvas, Rgba};
use crate::settings::ScrollLayer;
use crate::sim::particles::{CursorForce, Link, ParticleField, SpawnRanges};
use crate::{Settings, Size};

pub struct NetworkScene {
    count: usize,
    spawn: SpawnRanges,
    force: CursorForce,
    max_distance: f32,
    link_opacity: f32,
    color: Rgba,
    layers: Vec<ScrollLayer>,
    rng: Pcg32,
    field: Option<ParticleField>,
    links: Vec<Link>,
}

impl NetworkScene {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let config = &settings.network;
        Self {
            count: settings.quality.scaled(config.points),
            spawn: config.spawn,
            force: settings.effective_cursor(config.cursor),
            max_distance: config.max_distance,
            link_opacity: config.link_opacity,
            color: Rgba::from_hex(&config.color),
            layers: settings.effective_layers(&config.layers).to_vec(),
            rng: Pcg32::seed_from_u64(seed),
            field: None,
            links: Vec::new(),
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    fn relink(&mut self) {
        self.links = match &self.field {
            Some(field) => field.links(self.max_distance),
            None => Vec::new(),
        };
    }
}

impl Scene for NetworkScene {
    fn name(&self) -> &'static str {
        "network"
    }

    fn bindings(&self) -> Vec<Binding> {
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
        self.relink();
    }

    fn update(&mut self, interaction: &Interaction, dt: f32) {
        if let Some(field) = &mut self.field {
            field.step(interaction.cursor, dt);
        }
        self.relink();
    }

    fn render(&self, _interaction: &Interaction, canvas: &mut dyn Canvas) {
        match &self.field {
            Some(field) => paint_network(canvas, field, &self.links, self.link_opacity, self.color),
            None => canvas.clear(),
        }
    }

    fn layers(&self, interaction: &Interaction) -> Vec<LayerOffset> {
        scroll_offsets(&self.layers, interaction.scroll_y)
    }
}
