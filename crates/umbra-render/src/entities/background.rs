use crate::context::{ContextManager, DrawCall, GraphicsContext};
use crate::coords::Rect;
use crate::error::RenderError;
use crate::paint::{Color, palette};
use crate::scene::{Chunk, SpaceType};

/// World-space quad of one explored chunk.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChunkQuad {
    pub rect: Rect,
    pub color: Color,
}

/// Draws explored chunks straight to the primary surface.
///
/// Not batched: the background is submitted the moment it is drawn, before
/// anything else is queued, so it is always the bottom layer.
#[derive(Debug, Default)]
pub struct BackgroundRenderer {
    quads: Vec<ChunkQuad>,
}

impl BackgroundRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn space_color(space: SpaceType) -> Color {
        match space {
            SpaceType::Nebula => palette::NEBULA,
            SpaceType::Space => palette::SPACE,
            SpaceType::DeepSpace => palette::DEEP_SPACE,
            SpaceType::DeadSpace => palette::DEAD_SPACE,
        }
    }

    /// Draws the chunks that intersect the visible world. Returns how many
    /// were drawn; zero chunks is a no-op.
    pub fn draw_chunks<G: GraphicsContext>(
        &mut self,
        chunks: &[Chunk],
        ctx: &mut ContextManager<G>,
    ) -> Result<usize, RenderError> {
        let visible = ctx.camera().visible_world();

        self.quads.clear();
        self.quads.extend(
            chunks
                .iter()
                .filter(|c| c.rect().overlaps(visible))
                .map(|c| ChunkQuad { rect: c.rect(), color: Self::space_color(c.space) }),
        );

        ctx.submit(DrawCall::Background(&self.quads))?;
        Ok(self.quads.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextEvent, RecordingContext};
    use crate::coords::{Camera, Vec2};

    fn manager() -> ContextManager<RecordingContext> {
        let mut ctx = ContextManager::new(RecordingContext::default(), palette::SPACE_CLEAR);
        ctx.set_projection(Camera::default()).unwrap();
        ctx.clear().unwrap();
        ctx.context_mut().clear_events();
        ctx
    }

    fn chunk(x: f32, y: f32, space: SpaceType) -> Chunk {
        Chunk { origin: Vec2::new(x, y), side: 16.0, space }
    }

    #[test]
    fn no_chunks_is_a_no_op() {
        let mut ctx = manager();
        let mut bg = BackgroundRenderer::new();
        assert_eq!(bg.draw_chunks(&[], &mut ctx).unwrap(), 0);
        assert!(ctx.context().events().is_empty());
    }

    #[test]
    fn off_screen_chunks_are_culled() {
        let mut ctx = manager();
        let mut bg = BackgroundRenderer::new();
        let chunks = [
            chunk(0.0, 0.0, SpaceType::Nebula),
            chunk(10_000.0, 0.0, SpaceType::DeepSpace),
            chunk(-16.0, -16.0, SpaceType::DeadSpace),
        ];
        assert_eq!(bg.draw_chunks(&chunks, &mut ctx).unwrap(), 2);
        assert_eq!(ctx.context().events(), &[ContextEvent::Draw { kind: None, count: 2 }]);
        assert_eq!(ctx.context().chunks()[1].color, palette::DEAD_SPACE);
    }
}
