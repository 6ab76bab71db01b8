use std::fmt;

use crate::context::{ContextManager, DrawCall, GraphicsContext};
use crate::error::RenderError;

use super::BatchKind;

/// A command type that can be submitted as one batched draw call.
pub trait Primitive: Clone + fmt::Debug {
    const KIND: BatchKind;

    fn draw_call(batch: &[Self]) -> DrawCall<'_>;
}

/// Pending queue of one primitive kind.
///
/// `flush` submits the whole queue in insertion order and always leaves it
/// empty, also when the submission fails.
#[derive(Debug, Clone)]
pub struct Batcher<P> {
    pending: Vec<P>,
}

impl<P> Default for Batcher<P> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<P> Batcher<P> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn queue(&mut self, cmd: P) {
        self.pending.push(cmd);
    }

    #[inline]
    pub fn pending(&self) -> &[P] {
        &self.pending
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops pending commands without submitting them.
    pub fn discard(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Hands the pending queue to `submit` and clears it.
    ///
    /// An empty queue never reaches `submit`. Returns the number of commands
    /// handed over.
    pub fn submit_with<F>(&mut self, submit: F) -> Result<usize, RenderError>
    where
        F: FnOnce(&[P]) -> Result<(), RenderError>,
    {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let n = self.pending.len();
        let result = submit(&self.pending);
        self.pending.clear();
        result.map(|()| n)
    }
}

impl<P: Primitive> Batcher<P> {
    pub fn flush<G: GraphicsContext>(
        &mut self,
        ctx: &mut ContextManager<G>,
    ) -> Result<usize, RenderError> {
        let n = self.submit_with(|batch| ctx.submit(P::draw_call(batch)))?;
        if n > 0 {
            log::trace!("flushed {n} {} command(s)", P::KIND);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextEvent, RecordingContext};
    use crate::coords::{Camera, Vec2};
    use crate::paint::palette;
    use crate::primitives::CircleCmd;

    fn manager() -> ContextManager<RecordingContext> {
        let mut ctx = ContextManager::new(RecordingContext::default(), palette::SPACE_CLEAR);
        ctx.set_projection(Camera::default()).unwrap();
        ctx.clear().unwrap();
        ctx.context_mut().clear_events();
        ctx
    }

    #[test]
    fn empty_flush_submits_nothing() {
        let mut ctx = manager();
        let mut batch: Batcher<CircleCmd> = Batcher::new();
        assert_eq!(batch.flush(&mut ctx).unwrap(), 0);
        assert!(ctx.context().events().is_empty());
    }

    #[test]
    fn flush_submits_in_queue_order_and_empties() {
        let mut ctx = manager();
        let mut batch = Batcher::new();
        for r in [3.0, 1.0, 2.0] {
            batch.queue(CircleCmd::filled(Vec2::zero(), r, palette::MINE));
        }
        assert_eq!(batch.flush(&mut ctx).unwrap(), 3);
        assert!(batch.is_empty());
        assert_eq!(
            ctx.context().events(),
            &[ContextEvent::Draw { kind: Some(BatchKind::Circle), count: 3 }]
        );
        let radii: Vec<f32> = ctx.context().circles().iter().map(|c| c.radius).collect();
        assert_eq!(radii, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn failed_flush_still_clears() {
        let mut ctx = manager();
        ctx.context_mut().fail_next_draw(BatchKind::Circle);
        let mut batch = Batcher::new();
        batch.queue(CircleCmd::filled(Vec2::zero(), 1.0, palette::MINE));
        assert!(batch.flush(&mut ctx).is_err());
        assert!(batch.is_empty());
    }
}
