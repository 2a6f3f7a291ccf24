//! JS-facing entry points
//!
//! `start` runs once when the module loads: it installs the logger and panic
//! hook, then mounts every scene whose canvas is on the page. Pages that
//! mount scenes themselves call `mountScene` and keep the returned handle.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, PageTransitionEvent, Window};

use super::web_canvas::WebCanvas;
use super::web_host::{WebEngine, WebHost};
use crate::Settings;
use crate::input::{Control, InputEvent};
use crate::scenes::{self, SceneKind};

/// Element holding page-level settings JSON
const SETTINGS_ELEMENT_ID: &str = "scene-settings";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[derive(Debug, Error)]
pub enum MountError {
    #[error("no browser window")]
    NoWindow,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2D canvas context unavailable")]
    NoContext,
    #[error("unknown scene `{0}`")]
    UnknownScene(String),
    #[error("invalid scene settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl From<MountError> for JsValue {
    fn from(e: MountError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

thread_local! {
    /// Scenes mounted at start-up
    static PAGE_SCENES: RefCell<Vec<SceneHandle>> = const { RefCell::new(Vec::new()) };
}

/// A mounted scene. Dropping the handle tears the scene down.
#[wasm_bindgen]
pub struct SceneHandle {
    engine: Rc<RefCell<WebEngine>>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Scene name
    #[wasm_bindgen(getter)]
    pub fn scene(&self) -> String {
        self.engine
            .try_borrow()
            .map(|engine| engine.scene_name().to_string())
            .unwrap_or_default()
    }

    /// Cancel the pending frame and detach every listener
    pub fn unmount(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.unmount();
        }
    }

    /// Feed a control value without a DOM element (e.g. from a framework)
    #[wasm_bindgen(js_name = setControl)]
    pub fn set_control(&self, name: &str, value: &str) -> Result<(), JsValue> {
        let control = Control::from_name(name)
            .ok_or_else(|| js_sys::Error::new(&format!("unknown control `{name}`")))?;
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.on_input(InputEvent::Control {
                control,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    pub fn pause(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.pause();
        }
    }

    pub fn resume(&self) {
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.resume();
        }
    }
}

fn browser() -> Result<(Window, Document), MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoWindow)?;
    Ok((window, document))
}

/// Settings from the page's settings element plus the reduced-motion query
pub fn load_settings(window: &Window, document: &Document) -> Settings {
    let mut settings = document
        .get_element_by_id(SETTINGS_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .map(|json| Settings::from_json_or_default(&json))
        .unwrap_or_default();
    settings.reduced_motion |= prefers_reduced_motion(window);
    settings
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// Mount `kind` on the canvas with id `canvas_id`
pub fn mount(
    canvas_id: &str,
    kind: SceneKind,
    settings: &Settings,
    seed: u64,
) -> Result<SceneHandle, MountError> {
    let (window, document) = browser()?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| MountError::CanvasNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| MountError::NotACanvas(canvas_id.to_string()))?;
    let surface = WebCanvas::new(canvas.clone())?;
    let scene = scenes::build(kind, settings, seed);

    let engine = Rc::new_cyclic(|weak| {
        let host = WebHost::new(window, document, canvas, weak.clone());
        RefCell::new(WebEngine::new(scene, surface, host))
    });
    engine.borrow_mut().mount();
    Ok(SceneHandle { engine })
}

/// Mount a scene by name; settings come from `settings_json` or the page
#[wasm_bindgen(js_name = mountScene)]
pub fn mount_scene(
    canvas_id: &str,
    scene: &str,
    settings_json: Option<String>,
) -> Result<SceneHandle, JsValue> {
    let kind = SceneKind::from_name(scene).ok_or_else(|| MountError::UnknownScene(scene.into()))?;
    let (window, document) = browser()?;
    let settings = match settings_json {
        Some(json) => {
            let mut settings = Settings::from_json(&json).map_err(MountError::from)?;
            settings.reduced_motion |= prefers_reduced_motion(&window);
            settings
        }
        None => load_settings(&window, &document),
    };
    let seed = settings.seed_or(js_sys::Date::now() as u64);
    Ok(mount(canvas_id, kind, &settings, seed)?)
}

/// Mount every scene whose canvas is present on the page
pub fn mount_page() -> Vec<SceneHandle> {
    let Ok((window, document)) = browser() else {
        log::warn!("No browser window, nothing mounted");
        return Vec::new();
    };
    let settings = load_settings(&window, &document);
    let seed = settings.seed_or(js_sys::Date::now() as u64);

    let mut handles = Vec::new();
    for (i, kind) in SceneKind::ALL.iter().enumerate() {
        let id = kind.canvas_id();
        if document.get_element_by_id(id).is_none() {
            continue;
        }
        match mount(id, *kind, &settings, seed.wrapping_add(i as u64)) {
            Ok(handle) => handles.push(handle),
            Err(e) => log::warn!("Failed to mount {}: {}", kind.as_str(), e),
        }
    }
    handles
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let handles = mount_page();
    log::info!("Mounted {} scene(s)", handles.len());
    PAGE_SCENES.with(|scenes| scenes.borrow_mut().extend(handles));

    // Pages kept in the back/forward cache are only paused, so a restored
    // page resumes its scenes; anything else is torn down
    if let Some(window) = web_sys::window() {
        let on_hide = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            PAGE_SCENES.with(|scenes| {
                let mut scenes = scenes.borrow_mut();
                if event.persisted() {
                    scenes.iter().for_each(SceneHandle::pause);
                } else {
                    for handle in scenes.drain(..) {
                        handle.unmount();
                    }
                }
            });
        });
        let on_show = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if event.persisted() {
                PAGE_SCENES.with(|scenes| scenes.borrow().iter().for_each(SceneHandle::resume));
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
        let _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
        on_hide.forget();
        on_show.forget();
    }
}
