//! Frame scheduling
//!
//! The driver never talks to a concrete timer. It asks a [`FrameScheduler`]
//! for "one more frame" and gets back a [`FrameHandle`] it can revoke. Hosts
//! back the trait with whatever frame primitive they have.
//!
//! [`FrameQueue`] is the host-paced implementation used by the CLI and tests:
//! the host drains due handles once per refresh and feeds them back to the
//! driver.

use std::time::Duration;

use crate::timestep::REFERENCE_REFRESH_HZ;

/// Revocable token for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    /// Ask for a callback on the next host frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Revoke a pending request. Returns false if it already fired or was
    /// cancelled before.
    fn cancel_frame(&mut self, handle: FrameHandle) -> bool;
}

/// Host-paced queue of frame requests
#[derive(Debug, Clone)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameHandle>,
    frames_elapsed: u64,
    refresh_hz: u32,
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self::new(REFERENCE_REFRESH_HZ)
    }
}

impl FrameQueue {
    pub fn new(refresh_hz: u32) -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
            frames_elapsed: 0,
            refresh_hz,
        }
    }

    /// Advance one host frame and hand back everything due on it
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        self.frames_elapsed += 1;
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.frames_elapsed
    }

    pub fn refresh_hz(&self) -> u32 {
        self.refresh_hz
    }

    /// Simulated wall time covered by the frames drained so far
    pub fn elapsed(&self) -> Duration {
        if self.refresh_hz == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames_elapsed as f64 / self.refresh_hz as f64)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        self.pending.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut queue = FrameQueue::default();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.pending(), 2);
    }

    #[test]
    fn test_cancelled_handle_never_due() {
        let mut queue = FrameQueue::default();
        let a = queue.request_frame();
        let b = queue.request_frame();

        assert!(queue.cancel_frame(a));
        assert!(!queue.cancel_frame(a), "double cancel reports false");

        assert_eq!(queue.take_due(), vec![b]);
        assert!(queue.is_idle());
        assert!(!queue.cancel_frame(b), "fired handle cannot be cancelled");
    }

    #[test]
    fn test_elapsed_tracks_drained_frames() {
        let mut queue = FrameQueue::new(50);
        for _ in 0..25 {
            queue.take_due();
        }
        assert_eq!(queue.frames_elapsed(), 25);
        assert_eq!(queue.elapsed(), Duration::from_millis(500));
        assert_eq!(FrameQueue::new(0).elapsed(), Duration::ZERO);
    }
}
