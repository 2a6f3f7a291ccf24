//! 3D activation surface plotter
//!
//! Driven by page controls: a function select, rotation and animation speed
//! sliders, a play/pause button and a manual x field.

use crate::engine::{Binding, EventKind, Scene};
use crate::input::{Control, InputProfile, Interaction};
use crate::renderer::Canvas;
use crate::renderer::painters::paint_surface;
use crate::settings::SurfaceControls;
use crate::sim::functions::{FunctionKind, names};
use crate::sim::surface::SurfaceState;
use crate::{Settings, Size};

pub struct SurfaceScene {
    state: SurfaceState,
    controls: SurfaceControls,
    animation_speed: f32,
    rotation_speed: f32,
}

impl SurfaceScene {
    pub fn new(settings: &Settings) -> Self {
        let config = &settings.surface;
        let kinds = if config.functions.is_empty() {
            FunctionKind::ACTIVATIONS.to_vec()
        } else {
            config.functions.clone()
        };
        Self {
            state: SurfaceState::new(kinds, Size::default()),
            controls: config.controls.clone(),
            animation_speed: config.animation_speed,
            rotation_speed: if settings.reduced_motion {
                0.0
            } else {
                config.rotation_speed
            },
        }
    }
}

impl Scene for SurfaceScene {
    fn name(&self) -> &'static str {
        "surface"
    }

    fn bindings(&self) -> Vec<Binding> {
        let c = &self.controls;
        vec![
            Binding::window(EventKind::Resize),
            Binding::window(EventKind::KeyDown),
            Binding::control(&c.function_select, Control::FunctionSelect, EventKind::Change),
            Binding::control(&c.rotation_speed, Control::RotationSpeed, EventKind::Input),
            Binding::control(&c.animation_speed, Control::AnimationSpeed, EventKind::Input),
            Binding::control(&c.play_pause, Control::PlayPause, EventKind::Click),
            Binding::control(&c.manual_x, Control::ManualX, EventKind::Input),
        ]
    }

    fn input_profile(&self) -> InputProfile {
        InputProfile {
            choices: names(self.state.kinds()),
            // The function select owns the selection, so no arrow-key cycling
            playback_key: true,
            ..Default::default()
        }
    }

    fn initial_interaction(&self) -> Interaction {
        Interaction {
            animation_speed: self.animation_speed,
            rotation_speed: self.rotation_speed,
            ..Interaction::default()
        }
    }

    fn resize(&mut self, size: Size, _interaction: &Interaction) {
        self.state.resize(size);
    }

    fn update(&mut self, interaction: &Interaction, dt: f32) {
        self.state.step(
            dt,
            interaction.rotation_speed,
            interaction.animation_speed,
            interaction.playing,
            interaction.manual_x,
        );
    }

    fn render(&self, interaction: &Interaction, canvas: &mut dyn Canvas) {
        let descriptor = self.state.descriptor(interaction.selected);
        paint_surface(canvas, &self.state, descriptor, interaction.selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ListenTarget, RecordingHost, SceneEngine};
    use crate::input::InputEvent;
    use crate::renderer::DrawList;

    fn control(control: Control, value: &str) -> InputEvent {
        InputEvent::Control {
            control,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_binds_every_control() {
        let host = RecordingHost::new(Some(Size::new(800, 500)));
        let log = host.log();
        let mut engine = SceneEngine::new(
            Box::new(SurfaceScene::new(&Settings::default())),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();

        let controls = log
            .borrow()
            .listeners
            .values()
            .filter(|b| matches!(b.target, ListenTarget::Control { .. }))
            .count();
        assert_eq!(controls, 5);
    }

    #[test]
    fn test_controls_drive_the_probe() {
        let host = RecordingHost::new(Some(Size::new(800, 500)));
        let log = host.log();
        let mut engine = SceneEngine::new(
            Box::new(SurfaceScene::new(&Settings::default())),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();

        engine.on_input(control(Control::FunctionSelect, "Sigmoid"));
        engine.on_input(control(Control::PlayPause, ""));
        engine.on_input(control(Control::ManualX, "0"));
        engine.on_input(control(Control::ManualX, "zero"));
        log.borrow_mut().take_frame();
        engine.on_frame(16.0);

        let texts = engine.canvas().texts();
        assert!(texts.contains(&"Sigmoid"));
        assert!(texts.contains(&"f(0.0000) = 0.5000"));
    }

    #[test]
    fn test_selection_only_follows_the_select() {
        let host = RecordingHost::new(Some(Size::new(800, 500)));
        let mut engine = SceneEngine::new(
            Box::new(SurfaceScene::new(&Settings::default())),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();

        assert!(!engine.on_input(InputEvent::Key("ArrowRight".into())));
        assert_eq!(engine.interaction().selected, 0);

        engine.on_input(control(Control::FunctionSelect, "Tanh"));
        let selected = engine.interaction().selected;
        assert!(!engine.on_input(InputEvent::Key("ArrowLeft".into())));
        assert_eq!(engine.interaction().selected, selected);

        assert!(engine.on_input(InputEvent::Key(" ".into())));
        assert!(!engine.interaction().playing);
    }

    #[test]
    fn test_reduced_motion_stops_rotation() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let scene = SurfaceScene::new(&settings);
        assert_eq!(scene.initial_interaction().rotation_speed, 0.0);
    }
}
