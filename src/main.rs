//! Portfolio Scenes entry point
//!
//! On the web the library's `start` hook mounts the page's scenes. Natively
//! the scenes run headlessly against a recording host, which is handy for
//! checking a settings file: `portfolio-scenes [settings.json] [scene...]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use portfolio_scenes::engine::{RecordingHost, SceneEngine};
    use portfolio_scenes::renderer::{Canvas, DrawList};
    use portfolio_scenes::scenes::{self, SceneKind};
    use portfolio_scenes::{Settings, Size};

    const FRAMES: u32 = 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Portfolio scenes (native) starting...");

    let mut settings = Settings::default();
    let mut kinds = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg.ends_with(".json") {
            match std::fs::read_to_string(&arg) {
                Ok(json) => settings = Settings::from_json_or_default(&json),
                Err(e) => log::warn!("Cannot read {}: {}", arg, e),
            }
        } else {
            match SceneKind::from_name(&arg) {
                Some(kind) => kinds.push(kind),
                None => log::warn!("Unknown scene `{}`", arg),
            }
        }
    }
    if kinds.is_empty() {
        kinds = SceneKind::ALL.to_vec();
    }

    let seed = settings.seed_or(0x5eed);
    for kind in kinds {
        let host = RecordingHost::new(Some(Size::new(1280, 720)));
        let log = host.log();
        let mut engine = SceneEngine::new(
            scenes::build(kind, &settings, seed),
            DrawList::new(Size::default()),
            host,
        );
        engine.mount();

        let mut rendered = 0;
        for i in 0..FRAMES {
            if log.borrow_mut().take_frame().is_none() {
                break;
            }
            engine.on_frame(i as f64 * FRAME_MS);
            rendered += 1;
        }

        let canvas = engine.canvas();
        println!(
            "{:<8} {}x{}  frames {:>3}  circles {:>3}  paths {:>4}  texts {:>2}",
            kind.as_str(),
            canvas.size().width,
            canvas.size().height,
            rendered,
            canvas.circles().len(),
            canvas.paths().len(),
            canvas.texts().len(),
        );
        engine.unmount();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's `start`, this is just to satisfy the compiler
}
