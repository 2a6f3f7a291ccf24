//! Host abstraction
//!
//! The host schedules frame callbacks and delivers input events. The browser
//! implementation lives in `platform`; `RecordingHost` stands in for it in
//! tests and headless runs.

use crate::Size;
use crate::input::Control;

/// Handle of a pending frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub i32);

/// Handle of an attached event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Where a listener is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    Canvas,
    Window,
    Document,
    /// A control element looked up by id
    Control { element_id: String, control: Control },
}

/// Event families a scene can bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    PointerLeave,
    Resize,
    Scroll,
    KeyDown,
    Visibility,
    /// Continuous value change (`input`)
    Input,
    /// Committed value change (`change`)
    Change,
    Click,
}

impl EventKind {
    /// DOM event name
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::PointerMove => "mousemove",
            EventKind::PointerDown => "mousedown",
            EventKind::PointerUp => "mouseup",
            EventKind::PointerLeave => "mouseleave",
            EventKind::Resize => "resize",
            EventKind::Scroll => "scroll",
            EventKind::KeyDown => "keydown",
            EventKind::Visibility => "visibilitychange",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Click => "click",
        }
    }
}

/// One listener a scene wants attached while mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub target: ListenTarget,
    pub kind: EventKind,
}

impl Binding {
    pub fn canvas(kind: EventKind) -> Self {
        Self {
            target: ListenTarget::Canvas,
            kind,
        }
    }

    pub fn window(kind: EventKind) -> Self {
        Self {
            target: ListenTarget::Window,
            kind,
        }
    }

    pub fn document(kind: EventKind) -> Self {
        Self {
            target: ListenTarget::Document,
            kind,
        }
    }

    pub fn control(element_id: impl Into<String>, control: Control, kind: EventKind) -> Self {
        Self {
            target: ListenTarget::Control {
                element_id: element_id.into(),
                control,
            },
            kind,
        }
    }
}

/// Frame scheduling and event delivery
pub trait Host {
    /// Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> Option<FrameToken>;

    /// Cancel a pending request
    fn cancel_frame(&mut self, token: FrameToken);

    /// Attach a listener; `None` when the target does not exist
    fn listen(&mut self, binding: &Binding) -> Option<ListenerId>;

    /// Detach a listener
    fn unlisten(&mut self, id: ListenerId);

    /// Client size of the canvas container
    fn container_size(&self) -> Option<Size>;

    /// Translate an overlay element vertically (scroll parallax)
    fn offset_layer(&mut self, _selector: &str, _offset_px: f32) {}
}
