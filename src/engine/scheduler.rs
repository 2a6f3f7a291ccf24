//! Frame scheduling
//!
//! `FrameScheduler` keeps at most one frame request pending; `FrameClock`
//! turns host timestamps into fixed update steps.

use super::host::{FrameToken, Host};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Start/stop state with at most one pending request
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    pending: Option<FrameToken>,
}

impl FrameScheduler {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Begin requesting frames. No-op when already running.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.running {
            return;
        }
        self.running = true;
        self.schedule(host);
    }

    /// Stop and cancel the pending request, if any
    pub fn stop<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.running = false;
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
        }
    }

    /// The host invoked the pending callback. Returns whether to run the frame.
    pub fn fired(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Request the next frame while running
    pub fn schedule<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.running || self.pending.is_some() {
            return;
        }
        self.pending = host.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused a frame request, stopping");
            self.running = false;
        }
    }
}

/// Fixed-step accumulator over host timestamps (milliseconds)
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    accumulator: f32,
}

impl FrameClock {
    /// Forget the previous timestamp so a restart does not see a huge gap
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }

    /// Advance to `now_ms`, returning how many `SIM_DT` steps to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_ms = Some(now_ms);

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop the backlog rather than spiral
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }
}
