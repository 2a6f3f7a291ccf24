//! Scene engine
//!
//! One engine drives one mounted scene: it owns the scene state, the
//! interaction state, the drawing surface and the host connection.
//! - Frames: host callback -> fixed update steps -> full repaint -> next request
//! - Input: host event -> `Interaction` -> (resize/visibility lifecycle)
//! - Teardown: cancel the pending frame and detach every listener together

pub mod host;
pub mod recording;
pub mod scheduler;

pub use host::{Binding, EventKind, FrameToken, Host, ListenTarget, ListenerId};
pub use recording::{HostLog, RecordingHost};
pub use scheduler::{FrameClock, FrameScheduler};

use crate::Size;
use crate::consts::SIM_DT;
use crate::input::{InputEvent, InputProfile, Interaction};
use crate::renderer::Canvas;

/// Vertical offset for an overlay element
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOffset {
    pub selector: String,
    pub offset_px: f32,
}

/// An animated canvas scene: owned state plus update and render
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Listeners to attach while mounted (visibility is added by the engine)
    fn bindings(&self) -> Vec<Binding>;

    fn input_profile(&self) -> InputProfile {
        InputProfile::default()
    }

    /// Interaction state at mount (caller-supplied defaults)
    fn initial_interaction(&self) -> Interaction {
        Interaction::default()
    }

    /// Fixed canvas size for scenes that ignore their container
    fn fixed_size(&self) -> Option<Size> {
        None
    }

    /// Static scenes are painted on mount and resize only
    fn animated(&self) -> bool {
        true
    }

    /// Re-layout for a new canvas size
    fn resize(&mut self, size: Size, interaction: &Interaction);

    /// Advance by `dt` seconds
    fn update(&mut self, interaction: &Interaction, dt: f32);

    /// Clear and repaint the whole canvas
    fn render(&self, interaction: &Interaction, canvas: &mut dyn Canvas);

    /// Overlay elements to translate after each repaint
    fn layers(&self, _interaction: &Interaction) -> Vec<LayerOffset> {
        Vec::new()
    }
}

/// Drives one scene on one canvas through one host
pub struct SceneEngine<C: Canvas, H: Host> {
    scene: Box<dyn Scene>,
    canvas: C,
    host: H,
    interaction: Interaction,
    profile: InputProfile,
    scheduler: FrameScheduler,
    clock: FrameClock,
    listeners: Vec<ListenerId>,
    mounted: bool,
    /// Paused by the page; visibility changes leave it paused
    paused: bool,
}

impl<C: Canvas, H: Host> SceneEngine<C, H> {
    pub fn new(scene: Box<dyn Scene>, canvas: C, host: H) -> Self {
        let interaction = scene.initial_interaction();
        let profile = scene.input_profile();
        Self {
            scene,
            canvas,
            host,
            interaction,
            profile,
            scheduler: FrameScheduler::default(),
            clock: FrameClock::default(),
            listeners: Vec::new(),
            mounted: false,
            paused: false,
        }
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene.name()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.scheduler.pending()
    }

    /// Attach listeners, size the canvas, paint once and start the loop
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        let mut bindings = self.scene.bindings();
        bindings.push(Binding::document(EventKind::Visibility));
        for binding in &bindings {
            match self.host.listen(binding) {
                Some(id) => self.listeners.push(id),
                None => log::debug!(
                    "{}: no target for {:?} listener",
                    self.scene.name(),
                    binding.kind
                ),
            }
        }
        self.mounted = true;

        let size = self
            .scene
            .fixed_size()
            .or_else(|| self.host.container_size())
            .unwrap_or_else(|| self.canvas.size());
        self.apply_resize(size);

        if self.interaction.visible {
            self.start();
        }
        log::info!(
            "{} mounted ({}x{}, {} listeners)",
            self.scene.name(),
            size.width,
            size.height,
            self.listeners.len()
        );
    }

    /// Resume requesting frames
    pub fn start(&mut self) {
        if !self.mounted || self.paused || !self.scene.animated() || self.scheduler.is_running() {
            return;
        }
        self.clock.reset();
        self.scheduler.start(&mut self.host);
    }

    /// Stop requesting frames (listeners stay attached)
    pub fn stop(&mut self) {
        self.scheduler.stop(&mut self.host);
    }

    /// Stop and stay stopped until `resume`, whatever the document visibility
    pub fn pause(&mut self) {
        self.paused = true;
        self.stop();
    }

    /// Undo `pause`; frames restart once the document is visible
    pub fn resume(&mut self) {
        self.paused = false;
        if self.interaction.visible {
            self.start();
        }
    }

    /// Cancel the pending frame and detach every listener
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.stop(&mut self.host);
        for id in self.listeners.drain(..) {
            self.host.unlisten(id);
        }
        self.mounted = false;
        log::info!("{} unmounted", self.scene.name());
    }

    /// Host frame callback
    pub fn on_frame(&mut self, now_ms: f64) {
        if !self.scheduler.fired() {
            return;
        }
        if !self.canvas.is_attached() {
            log::debug!("{}: surface detached, stopping", self.scene.name());
            self.stop();
            return;
        }

        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            self.scene.update(&self.interaction, SIM_DT);
        }
        self.paint();

        self.scheduler.schedule(&mut self.host);
    }

    /// Host input callback. Returns whether the scene consumed the event.
    pub fn on_input(&mut self, event: InputEvent) -> bool {
        if !self.mounted {
            return false;
        }
        let consumed = self.interaction.apply(&event, &self.profile);
        match event {
            InputEvent::Resize(size) => {
                let size = self.scene.fixed_size().unwrap_or(size);
                self.apply_resize(size);
            }
            InputEvent::Visibility(true) => self.start(),
            InputEvent::Visibility(false) => self.stop(),
            _ => {}
        }
        consumed
    }

    /// Resize the surface and repaint immediately
    fn apply_resize(&mut self, size: Size) {
        if self.canvas.size() != size {
            self.canvas.set_size(size);
        }
        self.scene.resize(size, &self.interaction);
        if self.canvas.is_attached() {
            self.paint();
        }
    }

    fn paint(&mut self) {
        self.scene.render(&self.interaction, &mut self.canvas);
        for layer in self.scene.layers(&self.interaction) {
            self.host.offset_layer(&layer.selector, layer.offset_px);
        }
    }
}

impl<C: Canvas, H: Host> Drop for SceneEngine<C, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Counts updates and paints a marker per frame
    struct CountingScene {
        updates: Rc<RefCell<u32>>,
        fixed: Option<Size>,
    }

    impl Scene for CountingScene {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn bindings(&self) -> Vec<Binding> {
            vec![
                Binding::canvas(EventKind::PointerMove),
                Binding::canvas(EventKind::PointerDown),
                Binding::window(EventKind::Resize),
            ]
        }

        fn input_profile(&self) -> InputProfile {
            InputProfile {
                choices: vec!["a", "b", "c"],
                click_advances: true,
                ..Default::default()
            }
        }

        fn fixed_size(&self) -> Option<Size> {
            self.fixed
        }

        fn resize(&mut self, _size: Size, _interaction: &Interaction) {}

        fn update(&mut self, _interaction: &Interaction, _dt: f32) {
            *self.updates.borrow_mut() += 1;
        }

        fn render(&self, _interaction: &Interaction, canvas: &mut dyn Canvas) {
            canvas.clear();
            canvas.fill_circle(Vec2::ZERO, 1.0, &crate::renderer::colors::INK.into());
        }

        fn layers(&self, interaction: &Interaction) -> Vec<LayerOffset> {
            vec![LayerOffset {
                selector: ".title".into(),
                offset_px: interaction.scroll_y * 0.5,
            }]
        }
    }

    type TestEngine = SceneEngine<DrawList, RecordingHost>;

    fn engine(fixed: Option<Size>) -> (TestEngine, Rc<RefCell<HostLog>>, Rc<RefCell<u32>>) {
        let updates = Rc::new(RefCell::new(0));
        let scene = CountingScene {
            updates: updates.clone(),
            fixed,
        };
        let host = RecordingHost::new(Some(Size::new(640, 480)));
        let log = host.log();
        let engine = SceneEngine::new(Box::new(scene), DrawList::new(Size::default()), host);
        (engine, log, updates)
    }

    /// Fire outstanding frames like the browser would
    fn drive(engine: &mut TestEngine, log: &Rc<RefCell<HostLog>>, frames: u32) {
        for i in 0..frames {
            let fired = log.borrow_mut().take_frame();
            if fired.is_none() {
                break;
            }
            engine.on_frame(i as f64 * 1000.0 / 60.0);
        }
    }

    #[test]
    fn test_mount_sizes_paints_and_schedules() {
        let (mut engine, log, _) = engine(None);
        engine.mount();

        assert_eq!(engine.canvas().size(), Size::new(640, 480));
        assert_eq!(engine.canvas().frames(), 1);
        assert!(engine.is_running());
        // 3 scene bindings + visibility
        assert_eq!(log.borrow().listeners.len(), 4);
        assert_eq!(log.borrow().requests, 1);
    }

    #[test]
    fn test_frames_update_then_render() {
        let (mut engine, log, updates) = engine(None);
        engine.mount();
        drive(&mut engine, &log, 10);

        assert!(*updates.borrow() >= 1);
        assert_eq!(engine.canvas().frames(), 11);
        assert_eq!(log.borrow().overlapping_requests, 0);
        assert!(log.borrow().outstanding.is_some());
    }

    #[test]
    fn test_unmount_cancels_and_detaches() {
        let (mut engine, log, _) = engine(None);
        engine.mount();
        drive(&mut engine, &log, 3);
        engine.unmount();

        let log = log.borrow();
        assert!(log.outstanding.is_none());
        assert!(log.listeners.is_empty());
        assert_eq!(log.subscribes, log.unsubscribes);
        assert_eq!(log.cancels, 1);
        assert!(engine.pending_frame().is_none());
    }

    #[test]
    fn test_no_frames_after_unmount() {
        let (mut engine, log, updates) = engine(None);
        engine.mount();
        let stale = log.borrow().outstanding;
        engine.unmount();
        let before = *updates.borrow();

        // A callback that was already queued by the browser still arrives
        assert!(stale.is_some());
        engine.on_frame(100.0);
        assert_eq!(*updates.borrow(), before);
        assert!(log.borrow().outstanding.is_none());
    }

    #[test]
    fn test_drop_tears_down() {
        let (mut engine, log, _) = engine(None);
        engine.mount();
        drop(engine);

        let log = log.borrow();
        assert!(log.outstanding.is_none());
        assert!(log.listeners.is_empty());
    }

    #[test]
    fn test_unmount_twice_is_noop() {
        let (mut engine, log, _) = engine(None);
        engine.mount();
        engine.unmount();
        engine.unmount();
        assert_eq!(log.borrow().cancels, 1);
    }

    #[test]
    fn test_detached_surface_stops_silently() {
        let (mut engine, log, updates) = engine(None);
        engine.mount();
        engine.canvas_mut().detach();
        drive(&mut engine, &log, 5);

        assert_eq!(*updates.borrow(), 0);
        assert!(!engine.is_running());
        assert!(log.borrow().outstanding.is_none());
    }

    #[test]
    fn test_resize_matches_container_and_repaints() {
        let (mut engine, _log, _) = engine(None);
        engine.mount();
        let frames = engine.canvas().frames();

        engine.on_input(InputEvent::Resize(Size::new(1024, 300)));
        assert_eq!(engine.canvas().size(), Size::new(1024, 300));
        assert_eq!(engine.canvas().frames(), frames + 1);
    }

    #[test]
    fn test_fixed_size_survives_resize() {
        let (mut engine, _log, _) = engine(Some(Size::new(300, 300)));
        engine.mount();
        engine.on_input(InputEvent::Resize(Size::new(1024, 768)));
        assert_eq!(engine.canvas().size(), Size::new(300, 300));
    }

    #[test]
    fn test_visibility_stops_and_restarts() {
        let (mut engine, log, _) = engine(None);
        engine.mount();

        engine.on_input(InputEvent::Visibility(false));
        assert!(!engine.is_running());
        assert!(log.borrow().outstanding.is_none());

        engine.on_input(InputEvent::Visibility(true));
        assert!(engine.is_running());
        assert!(log.borrow().outstanding.is_some());
        assert_eq!(log.borrow().overlapping_requests, 0);
    }

    #[test]
    fn test_pause_survives_visibility_changes() {
        let (mut engine, log, _) = engine(None);
        engine.mount();
        engine.pause();
        assert!(!engine.is_running());

        engine.on_input(InputEvent::Visibility(false));
        engine.on_input(InputEvent::Visibility(true));
        assert!(!engine.is_running());
        assert!(log.borrow().outstanding.is_none());

        engine.resume();
        assert!(engine.is_running());
        assert_eq!(log.borrow().overlapping_requests, 0);
    }

    #[test]
    fn test_resume_while_hidden_waits_for_visibility() {
        let (mut engine, _log, _) = engine(None);
        engine.mount();
        engine.pause();
        engine.on_input(InputEvent::Visibility(false));
        engine.resume();
        assert!(!engine.is_running());
        assert!(!engine.is_paused());

        engine.on_input(InputEvent::Visibility(true));
        assert!(engine.is_running());
    }

    #[test]
    fn test_click_cycles_selection() {
        let (mut engine, _log, _) = engine(None);
        engine.mount();
        for _ in 0..3 {
            engine.on_input(InputEvent::PointerDown);
            engine.on_input(InputEvent::PointerUp);
        }
        assert_eq!(engine.interaction().selected, 0);
        engine.on_input(InputEvent::PointerDown);
        assert_eq!(engine.interaction().selected, 1);
    }

    #[test]
    fn test_input_ignored_before_mount() {
        let (mut engine, _log, _) = engine(None);
        engine.on_input(InputEvent::PointerDown);
        assert_eq!(engine.interaction().selected, 0);
    }

    #[test]
    fn test_layers_follow_scroll() {
        let (mut engine, log, _) = engine(None);
        engine.mount();
        engine.on_input(InputEvent::Scroll(200.0));
        drive(&mut engine, &log, 1);
        assert_eq!(log.borrow().layers.get(".title"), Some(&100.0));
    }
}
