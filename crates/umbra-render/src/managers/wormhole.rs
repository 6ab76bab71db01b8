use crate::coords::{Camera, Rect};
use crate::entities::WormholeRenderer;
use crate::primitives::PrimitiveSink;
use crate::scene::Wormhole;

#[derive(Debug, Clone, Default)]
pub struct WormholeRenderManager {
    renderer: WormholeRenderer,
}

impl WormholeRenderManager {
    pub fn new(renderer: WormholeRenderer) -> Self {
        Self { renderer }
    }

    /// Queues wormholes whose span touches the visible world.
    pub fn queue_wormholes(&self, wormholes: &[Wormhole], camera: &Camera, sink: &mut dyn PrimitiveSink) -> usize {
        let visible = camera.visible_world().inflate(self.renderer.mouth_radius);
        let mut queued = 0;
        for w in wormholes {
            let span = Rect::from_origin_size(w.from, w.to - w.from).normalized().inflate(1.0);
            if span.overlaps(visible) {
                self.renderer.queue_wormhole(w, sink);
                queued += 1;
            }
        }
        queued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::primitives::Batches;

    #[test]
    fn distant_wormholes_are_skipped() {
        let camera = Camera::new(Vec2::zero(), 1.0, Viewport::new(100.0, 100.0));
        let wormholes = [
            Wormhole { from: Vec2::new(-10.0, 0.0), to: Vec2::new(10.0, 0.0) },
            Wormhole { from: Vec2::new(900.0, 900.0), to: Vec2::new(950.0, 990.0) },
            // Crosses the view without either mouth being visible.
            Wormhole { from: Vec2::new(-500.0, 0.0), to: Vec2::new(500.0, 0.0) },
        ];
        let mut sink = Batches::default();
        assert_eq!(WormholeRenderManager::default().queue_wormholes(&wormholes, &camera, &mut sink), 2);
        assert_eq!(sink.line.len(), 2);
        assert_eq!(sink.circle.len(), 4);
    }
}
