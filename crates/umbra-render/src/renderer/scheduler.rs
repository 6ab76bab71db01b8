use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::RenderError;

/// Token for one scheduled refresh.
///
/// The host passes it back to [`refresh`](super::refresh) when the refresh
/// fires. Tokens are unique per scheduler.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host per-refresh callback scheduler.
pub trait Scheduler {
    /// Arranges for a single refresh callback at the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraws a request. A cancelled request is either never delivered or
    /// ignored on delivery.
    fn cancel_frame(&mut self, request: FrameRequest);
}

#[derive(Debug, Default)]
struct ManualQueue {
    next_id: u64,
    pending: VecDeque<FrameRequest>,
    cancelled: Vec<FrameRequest>,
}

/// Scheduler driven by hand, for tools and tests.
///
/// Clones share one queue, so a clone kept outside the renderer can inspect
/// and fire the requests the renderer makes.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet delivered or cancelled, oldest first.
    pub fn pending(&self) -> Vec<FrameRequest> {
        self.queue.borrow().pending.iter().copied().collect()
    }

    pub fn cancelled(&self) -> Vec<FrameRequest> {
        self.queue.borrow().cancelled.clone()
    }

    /// Removes and returns the oldest pending request.
    pub fn next(&self) -> Option<FrameRequest> {
        self.queue.borrow_mut().pending.pop_front()
    }

    /// Delivers the oldest pending request to the active renderer.
    ///
    /// Returns `None` when nothing was scheduled.
    pub fn run_next(&self) -> Option<Result<bool, RenderError>> {
        let request = self.next()?;
        Some(super::refresh(request))
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let mut q = self.queue.borrow_mut();
        q.next_id += 1;
        let request = FrameRequest(q.next_id);
        q.pending.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let mut q = self.queue.borrow_mut();
        q.pending.retain(|r| *r != request);
        q.cancelled.push(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_queue() {
        let outside = ManualScheduler::new();
        let mut inside = outside.clone();
        let a = inside.request_frame();
        let b = inside.request_frame();
        assert_ne!(a, b);
        inside.cancel_frame(a);
        assert_eq!(outside.pending(), vec![b]);
        assert_eq!(outside.cancelled(), vec![a]);
        assert_eq!(outside.next(), Some(b));
        assert_eq!(outside.next(), None);
    }
}
