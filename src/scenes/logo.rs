//! Animated logo scene

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::engine::{Binding, Scene};
use crate::input::Interaction;
use crate::renderer::painters::paint_logo;
use crate::renderer::{Canvas, Rgba};
use crate::sim::logo::LogoState;
use crate::{Settings, Size};

pub struct LogoScene {
    state: LogoState,
    color: Rgba,
    side: u32,
    animated: bool,
}

impl LogoScene {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let config = &settings.logo;
        let side = config.size.max(1);
        Self {
            state: LogoState::new(side as f32, Pcg32::seed_from_u64(seed)),
            color: Rgba::from_hex(&config.color),
            side,
            animated: config.animated && !settings.reduced_motion,
        }
    }
}

impl Scene for LogoScene {
    fn name(&self) -> &'static str {
        "logo"
    }

    fn bindings(&self) -> Vec<Binding> {
        Vec::new()
    }

    fn fixed_size(&self) -> Option<Size> {
        Some(Size::new(self.side, self.side))
    }

    fn animated(&self) -> bool {
        self.animated
    }

    fn resize(&mut self, _size: Size, _interaction: &Interaction) {}

    fn update(&mut self, _interaction: &Interaction, dt: f32) {
        self.state.step(dt);
    }

    fn render(&self, _interaction: &Interaction, canvas: &mut dyn Canvas) {
        paint_logo(canvas, &self.state, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RecordingHost, SceneEngine};
    use crate::input::InputEvent;
    use crate::renderer::DrawList;

    #[test]
    fn test_logo_keeps_fixed_size() {
        let host = RecordingHost::new(Some(Size::new(1280, 720)));
        let mut engine = SceneEngine::new(
            Box::new(LogoScene::new(&Settings::default(), 3)),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();
        assert_eq!(engine.canvas().size(), Size::new(300, 300));

        engine.on_input(InputEvent::Resize(Size::new(640, 480)));
        assert_eq!(engine.canvas().size(), Size::new(300, 300));
    }

    #[test]
    fn test_static_logo_paints_once() {
        let mut settings = Settings::default();
        settings.logo.animated = false;
        let host = RecordingHost::new(None);
        let log = host.log();
        let mut engine = SceneEngine::new(
            Box::new(LogoScene::new(&settings, 3)),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();

        assert_eq!(engine.canvas().frames(), 1);
        assert!(!engine.is_running());
        assert_eq!(log.borrow().requests, 0);
        engine.on_input(InputEvent::Visibility(true));
        assert_eq!(log.borrow().requests, 0);
    }

    #[test]
    fn test_reduced_motion_freezes_logo() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!LogoScene::new(&settings, 1).animated());
    }
}
