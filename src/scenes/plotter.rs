//! 2D activation function plotter
//!
//! Click (or the arrow keys) cycles through the configured functions, hovering
//! a marker shows its coordinates, `d` toggles the dashed derivative.

use crate::engine::{Binding, EventKind, Scene};
use crate::input::{InputProfile, Interaction};
use crate::renderer::Canvas;
use crate::renderer::painters::paint_plot;
use crate::sim::functions::{FunctionKind, names};
use crate::sim::plot::PlotState;
use crate::{Settings, Size};

pub struct PlotterScene {
    state: PlotState,
    show_derivative: bool,
    show_hint: bool,
}

impl PlotterScene {
    pub fn new(settings: &Settings) -> Self {
        let config = &settings.plotter;
        let kinds = if config.functions.is_empty() {
            FunctionKind::ALL.to_vec()
        } else {
            config.functions.clone()
        };
        Self {
            state: PlotState::new(kinds, Size::default(), config.scale),
            show_derivative: config.show_derivative,
            show_hint: config.show_hint,
        }
    }

    fn resample(&mut self, interaction: &Interaction) {
        self.state
            .sample(interaction.selected, interaction.cursor, interaction.show_derivative);
    }
}

impl Scene for PlotterScene {
    fn name(&self) -> &'static str {
        "plotter"
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::canvas(EventKind::PointerMove),
            Binding::canvas(EventKind::PointerDown),
            Binding::canvas(EventKind::PointerUp),
            Binding::canvas(EventKind::PointerLeave),
            Binding::window(EventKind::Resize),
            Binding::window(EventKind::KeyDown),
        ]
    }

    fn input_profile(&self) -> InputProfile {
        InputProfile {
            choices: names(self.state.kinds()),
            click_advances: true,
            cycle_keys: true,
            derivative_key: true,
            ..Default::default()
        }
    }

    fn initial_interaction(&self) -> Interaction {
        Interaction {
            show_derivative: self.show_derivative,
            ..Interaction::default()
        }
    }

    fn resize(&mut self, size: Size, interaction: &Interaction) {
        self.state.resize(size);
        self.resample(interaction);
    }

    fn update(&mut self, interaction: &Interaction, _dt: f32) {
        self.resample(interaction);
    }

    fn render(&self, interaction: &Interaction, canvas: &mut dyn Canvas) {
        let descriptor = self.state.descriptor(interaction.selected);
        paint_plot(canvas, &self.state, descriptor, interaction, self.show_hint);
    }
}
