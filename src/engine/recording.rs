//! Recording host for headless runs and lifecycle tests
//!
//! Frame requests and listener (un)subscriptions are logged into a shared
//! [`HostLog`], so the log stays inspectable after the engine owning the host
//! has been torn down or dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::host::{Binding, FrameToken, Host, ListenerId};
use crate::Size;

/// Everything the host was asked to do
#[derive(Debug, Default)]
pub struct HostLog {
    /// Frame requests made
    pub requests: u32,
    /// Frame requests cancelled
    pub cancels: u32,
    /// Request that has not fired or been cancelled yet
    pub outstanding: Option<FrameToken>,
    /// Times a request was made while another was still outstanding
    pub overlapping_requests: u32,
    /// Currently attached listeners
    pub listeners: BTreeMap<ListenerId, Binding>,
    pub subscribes: u32,
    pub unsubscribes: u32,
    /// Last offset applied per overlay selector
    pub layers: BTreeMap<String, f32>,
}

impl HostLog {
    /// Simulate the browser firing the outstanding frame
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        self.outstanding.take()
    }
}

/// Host that records calls instead of talking to a browser
#[derive(Debug)]
pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
    container: Option<Size>,
    next_token: i32,
    next_listener: u32,
    refuse_frames: bool,
}

impl RecordingHost {
    pub fn new(container: Option<Size>) -> Self {
        Self {
            log: Rc::new(RefCell::new(HostLog::default())),
            container,
            next_token: 1,
            next_listener: 1,
            refuse_frames: false,
        }
    }

    /// Shared handle to the call log
    pub fn log(&self) -> Rc<RefCell<HostLog>> {
        self.log.clone()
    }

    /// Change the reported container size (pair with an `InputEvent::Resize`)
    pub fn set_container(&mut self, size: Size) {
        self.container = Some(size);
    }

    /// Make every subsequent frame request fail
    pub fn refuse_frames(&mut self, refuse: bool) {
        self.refuse_frames = refuse;
    }
}

impl Host for RecordingHost {
    fn request_frame(&mut self) -> Option<FrameToken> {
        if self.refuse_frames {
            return None;
        }
        let token = FrameToken(self.next_token);
        self.next_token += 1;

        let mut log = self.log.borrow_mut();
        log.requests += 1;
        if log.outstanding.is_some() {
            log.overlapping_requests += 1;
        }
        log.outstanding = Some(token);
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut log = self.log.borrow_mut();
        log.cancels += 1;
        if log.outstanding == Some(token) {
            log.outstanding = None;
        }
    }

    fn listen(&mut self, binding: &Binding) -> Option<ListenerId> {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        let mut log = self.log.borrow_mut();
        log.subscribes += 1;
        log.listeners.insert(id, binding.clone());
        Some(id)
    }

    fn unlisten(&mut self, id: ListenerId) {
        let mut log = self.log.borrow_mut();
        if log.listeners.remove(&id).is_some() {
            log.unsubscribes += 1;
        }
    }

    fn container_size(&self) -> Option<Size> {
        self.container
    }

    fn offset_layer(&mut self, selector: &str, offset_px: f32) {
        self.log
            .borrow_mut()
            .layers
            .insert(selector.to_string(), offset_px);
    }
}
