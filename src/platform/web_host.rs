//! `Host` backed by `requestAnimationFrame` and DOM event listeners
//!
//! Every callback holds a `Weak` to its engine and re-enters it through
//! `try_borrow_mut`, so a callback that outlives the engine (or arrives while
//! the engine is busy) is dropped instead of panicking.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Weak;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent, Window,
};

use super::web_canvas::WebCanvas;
use crate::Size;
use crate::engine::{Binding, EventKind, FrameToken, Host, ListenTarget, ListenerId, SceneEngine};
use crate::input::{Control, InputEvent};

pub type WebEngine = SceneEngine<WebCanvas, WebHost>;

/// Run `f` against the engine if it is still alive and not already borrowed
fn with_engine(engine: &Weak<RefCell<WebEngine>>, f: impl FnOnce(&mut WebEngine)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    match engine.try_borrow_mut() {
        Ok(mut engine) => f(&mut engine),
        Err(_) => log::debug!("engine busy, dropping callback"),
    };
}

/// Client size of the canvas container, falling back to the canvas itself
fn client_size(canvas: &HtmlCanvasElement) -> Option<Size> {
    let (w, h) = match canvas.parent_element() {
        Some(parent) if parent.client_width() > 0 && parent.client_height() > 0 => {
            (parent.client_width(), parent.client_height())
        }
        _ => (canvas.client_width(), canvas.client_height()),
    };
    (w > 0 && h > 0).then(|| Size::new(w as u32, h as u32))
}

/// Handles an event decoder needs
#[derive(Clone)]
struct EventContext {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
}

impl EventContext {
    /// Pointer position in canvas pixels
    fn canvas_point(&self, event: &MouseEvent) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        let mut pos = Vec2::new(
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        );
        // CSS size can differ from the backing store
        if rect.width() > 0.0 && rect.height() > 0.0 {
            pos.x *= self.canvas.width() as f32 / rect.width() as f32;
            pos.y *= self.canvas.height() as f32 / rect.height() as f32;
        }
        pos
    }

    fn decode(&self, kind: EventKind, control: Option<Control>, event: &Event) -> Option<InputEvent> {
        if let Some(control) = control {
            return Some(InputEvent::Control {
                control,
                value: control_value(event),
            });
        }
        match kind {
            EventKind::PointerMove => event
                .dyn_ref::<MouseEvent>()
                .map(|e| InputEvent::PointerMove(self.canvas_point(e))),
            EventKind::PointerDown => Some(InputEvent::PointerDown),
            EventKind::PointerUp => Some(InputEvent::PointerUp),
            EventKind::PointerLeave => Some(InputEvent::PointerLeave),
            EventKind::Resize => client_size(&self.canvas).map(InputEvent::Resize),
            EventKind::Scroll => self.window.scroll_y().ok().map(|y| InputEvent::Scroll(y as f32)),
            EventKind::KeyDown => {
                // Keys aimed at a focused form control belong to that control;
                // a focused button turns Space into its own click
                if event.target().is_some_and(|t| is_form_control(&t)) {
                    return None;
                }
                event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|e| InputEvent::Key(e.key()))
            }
            EventKind::Visibility => Some(InputEvent::Visibility(
                self.document.visibility_state() != web_sys::VisibilityState::Hidden,
            )),
            EventKind::Input | EventKind::Change | EventKind::Click => None,
        }
    }
}

fn is_form_control(target: &EventTarget) -> bool {
    target.dyn_ref::<HtmlInputElement>().is_some()
        || target.dyn_ref::<HtmlSelectElement>().is_some()
        || target.dyn_ref::<HtmlTextAreaElement>().is_some()
        || target.dyn_ref::<HtmlButtonElement>().is_some()
}

/// Current value of the element a control listener is attached to
fn control_value(event: &Event) -> String {
    let Some(target) = event.current_target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

struct AttachedListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub struct WebHost {
    context: EventContext,
    engine: Weak<RefCell<WebEngine>>,
    /// Reused for every frame request; lives as long as the host
    on_frame: Closure<dyn FnMut(f64)>,
    listeners: BTreeMap<ListenerId, AttachedListener>,
    next_listener: u32,
}

impl WebHost {
    pub fn new(
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        engine: Weak<RefCell<WebEngine>>,
    ) -> Self {
        let weak = engine.clone();
        let on_frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            with_engine(&weak, |engine| engine.on_frame(time));
        });
        Self {
            context: EventContext {
                window,
                document,
                canvas,
            },
            engine,
            on_frame,
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }

    fn resolve(&self, target: &ListenTarget) -> Option<(EventTarget, Option<Control>)> {
        match target {
            ListenTarget::Canvas => Some((self.context.canvas.clone().into(), None)),
            ListenTarget::Window => Some((self.context.window.clone().into(), None)),
            ListenTarget::Document => Some((self.context.document.clone().into(), None)),
            ListenTarget::Control {
                element_id,
                control,
            } => self
                .context
                .document
                .get_element_by_id(element_id)
                .map(|el| (el.into(), Some(*control))),
        }
    }
}

impl Host for WebHost {
    fn request_frame(&mut self) -> Option<FrameToken> {
        self.context
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .ok()
            .map(FrameToken)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let _ = self.context.window.cancel_animation_frame(token.0);
    }

    fn listen(&mut self, binding: &Binding) -> Option<ListenerId> {
        let (target, control) = self.resolve(&binding.target)?;
        let kind = binding.kind;
        let context = self.context.clone();
        let weak = self.engine.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let Some(input) = context.decode(kind, control, &event) else {
                return;
            };
            let is_key = matches!(input, InputEvent::Key(_));
            with_engine(&weak, |engine| {
                // A consumed shortcut must not also scroll the page
                if engine.on_input(input) && is_key {
                    event.prevent_default();
                }
            });
        });
        let event = kind.dom_name();
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok()?;

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(
            id,
            AttachedListener {
                target,
                event,
                closure,
            },
        );
        Some(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        if let Some(listener) = self.listeners.remove(&id) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }

    fn container_size(&self) -> Option<Size> {
        client_size(&self.context.canvas)
    }

    fn offset_layer(&mut self, selector: &str, offset_px: f32) {
        let Ok(Some(element)) = self.context.document.query_selector(selector) else {
            return;
        };
        if let Ok(element) = element.dyn_into::<HtmlElement>() {
            let _ = element
                .style()
                .set_property("transform", &format!("translateY({offset_px}px)"));
        }
    }
}
