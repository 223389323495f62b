//! Animation driver
//!
//! Owns the only mutable animation state (progress, playback state, pending
//! frame) and advances it one fixed step per host frame.
//!
//! ```text
//!   Idle ──start──▶ Playing ──start/pause──▶ Paused
//!                     │  ▲                     │
//!          progress≥1 │  └───────start─────────┘
//!                     ▼
//!                  Finished ──start──▶ Playing (replay from 0)
//!
//!   reset: any ──▶ Idle
//! ```

use serde::Serialize;

use crate::debug_flags::frame_trace_enabled;
use crate::scheduler::{FrameHandle, FrameQueue, FrameScheduler};
use crate::timestep::{is_valid_step, DEFAULT_STEP};
use crate::trajectory::Coefficients;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Everything the render sink needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub progress: f64,
    pub coefficients: Coefficients,
    pub state: PlaybackState,
}

/// Receives a full redraw request
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame),
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

pub struct AnimationDriver<S: FrameScheduler, R: RenderSink> {
    progress: f64,
    state: PlaybackState,
    step: f64,
    coefficients: Coefficients,
    pending: Option<FrameHandle>,
    scheduler: S,
    sink: R,
}

impl<S: FrameScheduler, R: RenderSink> AnimationDriver<S, R> {
    pub fn new(scheduler: S, sink: R) -> Self {
        Self::with_step(DEFAULT_STEP, scheduler, sink)
    }

    /// Driver advancing `step` per tick. A step outside (0, 1] could never
    /// reach the end of the kick, so it falls back to [`DEFAULT_STEP`].
    pub fn with_step(step: f64, scheduler: S, sink: R) -> Self {
        let step = if is_valid_step(step) {
            step
        } else {
            tracing::warn!(step, fallback = DEFAULT_STEP, "invalid step, using default");
            DEFAULT_STEP
        };
        Self {
            progress: 0.0,
            state: PlaybackState::Idle,
            step,
            coefficients: Coefficients::default(),
            pending: None,
            scheduler,
            sink,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_parts(self) -> (S, R) {
        (self.scheduler, self.sink)
    }

    /// Play/pause toggle.
    ///
    /// Idle and Paused resume from the current progress; Playing pauses;
    /// Finished replays from the start.
    pub fn start(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Idle | PlaybackState::Paused => self.play(),
            PlaybackState::Finished => {
                // Replay rather than re-finish at 1.0 with a single clamped tick
                self.progress = 0.0;
                self.play();
            }
        }
    }

    /// Freeze at the current progress. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.transition(PlaybackState::Paused);
    }

    /// Back to Idle at progress 0, from any state
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.progress = 0.0;
        self.transition(PlaybackState::Idle);
        self.redraw();
    }

    /// Replace the curve and redraw at the current progress
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
        self.redraw();
    }

    pub fn redraw(&mut self) {
        let frame = self.frame();
        self.sink.render(&frame);
    }

    pub fn frame(&self) -> Frame {
        Frame {
            progress: self.progress,
            coefficients: self.coefficients,
            state: self.state,
        }
    }

    /// Host callback for a frame requested earlier. Revoked or stale handles
    /// are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending != Some(handle) {
            tracing::trace!(handle = handle.id(), "ignoring stale frame");
            return;
        }
        self.pending = None;
        self.tick();
    }

    /// Advance one step. Only acts while playing; returns the state after
    /// the tick.
    pub fn tick(&mut self) -> PlaybackState {
        if self.state != PlaybackState::Playing {
            return self.state;
        }
        // At most one frame is ever outstanding
        self.cancel_pending();

        self.progress += self.step;
        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.transition(PlaybackState::Finished);
            self.redraw();
            return self.state;
        }

        if frame_trace_enabled() {
            tracing::trace!(progress = self.progress, "tick");
        }
        self.redraw();
        self.pending = Some(self.scheduler.request_frame());
        self.state
    }

    fn play(&mut self) {
        self.transition(PlaybackState::Playing);
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, progress = self.progress, "playback");
            self.state = next;
        }
    }
}

impl<R: RenderSink> AnimationDriver<FrameQueue, R> {
    /// Drain one host frame. Returns how many callbacks fired.
    pub fn pump_frame(&mut self) -> usize {
        let due = self.scheduler.take_due();
        let fired = due.len();
        for handle in due {
            self.on_frame(handle);
        }
        fired
    }

    /// Pump frames until nothing is scheduled or `max_frames` have passed.
    /// Returns the number of frames pumped.
    pub fn run_until_idle(&mut self, max_frames: u64) -> u64 {
        let mut frames = 0;
        while frames < max_frames && !self.scheduler.is_idle() {
            self.pump_frame();
            frames += 1;
        }
        frames
    }
}
