use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

use crate::renderer::{FrameRequest, Scheduler};

/// The one outstanding request between `request_redraw` and the matching
/// `RedrawRequested` event. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct RedrawSlot {
    next_id: Rc<Cell<u64>>,
    pending: Rc<Cell<Option<FrameRequest>>>,
}

impl RedrawSlot {
    fn issue(&self) -> FrameRequest {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let request = FrameRequest::new(id);
        self.pending.set(Some(request));
        request
    }

    fn cancel(&self, request: FrameRequest) {
        if self.pending.get() == Some(request) {
            self.pending.set(None);
        }
    }

    pub(crate) fn take(&self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

/// [`Scheduler`] backed by `Window::request_redraw`.
///
/// winit coalesces redraw requests, so only the newest token is kept; the
/// runtime takes it when `RedrawRequested` arrives and hands it to
/// [`refresh`](crate::renderer::refresh).
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    window: Arc<Window>,
    slot: RedrawSlot,
}

impl WindowScheduler {
    pub(crate) fn new(window: Arc<Window>, slot: RedrawSlot) -> Self {
        Self { window, slot }
    }
}

impl Scheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let request = self.slot.issue();
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.slot.cancel(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_replaces_older_one() {
        let slot = RedrawSlot::default();
        let first = slot.issue();
        let second = slot.issue();
        assert_ne!(first, second);
        assert_eq!(slot.take(), Some(second));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn cancelling_a_superseded_request_keeps_the_current_one() {
        let slot = RedrawSlot::default();
        let first = slot.issue();
        let second = slot.issue();
        slot.cancel(first);
        assert_eq!(slot.take(), Some(second));
    }

    #[test]
    fn cancelled_request_is_not_delivered() {
        let slot = RedrawSlot::default();
        let request = slot.issue();
        slot.cancel(request);
        assert_eq!(slot.take(), None);
    }
}
