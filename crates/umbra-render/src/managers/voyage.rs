use crate::entities::VoyageRenderer;
use crate::primitives::PrimitiveSink;
use crate::scene::Voyage;
use crate::time::FrameContext;

#[derive(Debug, Clone, Default)]
pub struct VoyageRenderManager {
    renderer: VoyageRenderer,
}

impl VoyageRenderManager {
    pub fn new(renderer: VoyageRenderer) -> Self {
        Self { renderer }
    }

    /// Queues every voyage in flight at the frame timestamp. Returns how many
    /// were in flight.
    pub fn queue_voyages(&self, voyages: &[Voyage], frame: &FrameContext, sink: &mut dyn PrimitiveSink) -> usize {
        let mut in_flight = 0;
        for voyage in voyages {
            if self.renderer.queue_voyage(voyage, frame, sink) {
                in_flight += 1;
            }
        }
        in_flight
    }
}
