//! Graphics context manager: owns the backend, the projection and the frame
//! clear.
//!
//! Backends implement [`GraphicsContext`]. The orchestrator only talks to the
//! backend through [`ContextManager`], which keeps the camera's viewport in
//! sync with the real surface and derives both projections from it.

mod recording;

pub use recording::{ContextEvent, RecordingContext};

use glam::Mat4;

use crate::coords::{Camera, Viewport};
use crate::entities::ChunkQuad;
use crate::error::RenderError;
use crate::overlay::DrawList;
use crate::paint::Color;
use crate::primitives::{
    BatchKind, CircleCmd, GlyphAtlas, LineCmd, PlanetCmd, RectCmd, SpriteCmd, TextCmd,
};

/// One batched submission to the primary surface.
#[derive(Debug)]
pub enum DrawCall<'a> {
    /// Explored chunks, drawn immediately below every batch.
    Background(&'a [ChunkQuad]),
    Lines(&'a [LineCmd]),
    Planets(&'a [PlanetCmd]),
    Circles(&'a [CircleCmd]),
    Rects(&'a [RectCmd]),
    Text {
        commands: &'a [TextCmd],
        glyphs: &'a mut GlyphAtlas,
    },
    Sprites(&'a [SpriteCmd]),
}

impl DrawCall<'_> {
    /// Batch layer of this call; `None` for the immediate background draw.
    pub fn kind(&self) -> Option<BatchKind> {
        match self {
            DrawCall::Background(_) => None,
            DrawCall::Lines(_) => Some(BatchKind::Line),
            DrawCall::Planets(_) => Some(BatchKind::Planet),
            DrawCall::Circles(_) => Some(BatchKind::Circle),
            DrawCall::Rects(_) => Some(BatchKind::Rect),
            DrawCall::Text { .. } => Some(BatchKind::Text),
            DrawCall::Sprites(_) => Some(BatchKind::Sprite),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DrawCall::Background(c) => c.len(),
            DrawCall::Lines(c) => c.len(),
            DrawCall::Planets(c) => c.len(),
            DrawCall::Circles(c) => c.len(),
            DrawCall::Rects(c) => c.len(),
            DrawCall::Text { commands, .. } => commands.len(),
            DrawCall::Sprites(c) => c.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transforms uploaded at the start of every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub camera: Camera,
    pub world_to_clip: Mat4,
    pub screen_to_clip: Mat4,
}

impl Projection {
    pub fn from_camera(camera: Camera) -> Self {
        Self {
            camera,
            world_to_clip: camera.projection(),
            screen_to_clip: camera.screen_projection(),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_camera(Camera::default())
    }
}

/// Low-level rendering backend for the primary surface.
///
/// Call protocol per frame: `set_projection`, `clear`, any number of `draw`,
/// `present`. A `draw` or `present` without a preceding `clear` fails with
/// [`RenderError::NoActiveFrame`].
pub trait GraphicsContext {
    /// Current surface size in logical pixels.
    fn viewport(&self) -> Viewport;

    fn set_projection(&mut self, projection: &Projection) -> Result<(), RenderError>;

    /// Begins the frame by clearing the primary surface.
    fn clear(&mut self, color: Color) -> Result<(), RenderError>;

    fn draw(&mut self, call: DrawCall<'_>) -> Result<(), RenderError>;

    /// Composites `overlay` above everything drawn this frame and shows the result.
    fn present(&mut self, overlay: &mut DrawList, glyphs: &mut GlyphAtlas) -> Result<(), RenderError>;
}

pub struct ContextManager<G> {
    context: G,
    projection: Projection,
    clear_color: Color,
}

impl<G: GraphicsContext> ContextManager<G> {
    pub fn new(context: G, clear_color: Color) -> Self {
        Self { context, projection: Projection::default(), clear_color }
    }

    #[inline]
    pub fn context(&self) -> &G {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut G {
        &mut self.context
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.context.viewport()
    }

    /// Camera of the current frame, with the surface's viewport.
    #[inline]
    pub fn camera(&self) -> Camera {
        self.projection.camera
    }

    #[inline]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    /// Recomputes both projections for `camera` and uploads them.
    ///
    /// The camera's viewport is replaced by the backend's surface size.
    pub fn set_projection(&mut self, camera: Camera) -> Result<(), RenderError> {
        let camera = camera.with_viewport(self.context.viewport().clamped());
        self.projection = Projection::from_camera(camera);
        self.context.set_projection(&self.projection)
    }

    pub fn clear(&mut self) -> Result<(), RenderError> {
        self.context.clear(self.clear_color)
    }

    /// Forwards a batch to the backend. Empty calls are dropped here.
    pub fn submit(&mut self, call: DrawCall<'_>) -> Result<(), RenderError> {
        if call.is_empty() {
            return Ok(());
        }
        self.context.draw(call)
    }

    pub fn present(&mut self, overlay: &mut DrawList, glyphs: &mut GlyphAtlas) -> Result<(), RenderError> {
        self.context.present(overlay, glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::palette;

    #[test]
    fn projection_uses_surface_viewport() {
        let mut ctx = ContextManager::new(
            RecordingContext::new(Viewport::new(400.0, 200.0)),
            palette::SPACE_CLEAR,
        );
        let camera = Camera::new(Vec2::new(10.0, 0.0), 2.0, Viewport::new(1.0, 1.0));
        ctx.set_projection(camera).unwrap();

        assert_eq!(ctx.camera().viewport, Viewport::new(400.0, 200.0));
        assert_eq!(
            ctx.context().events(),
            &[ContextEvent::SetProjection(camera.with_viewport(Viewport::new(400.0, 200.0)))]
        );

        let clip = ctx.projection().world_to_clip.project_point3(glam::Vec3::new(10.0, 0.0, 0.0));
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
    }

    #[test]
    fn empty_submissions_never_reach_the_backend() {
        let mut ctx = ContextManager::new(RecordingContext::default(), palette::SPACE_CLEAR);
        ctx.submit(DrawCall::Lines(&[])).unwrap();
        assert!(ctx.context().events().is_empty());
    }

    #[test]
    fn drawing_before_clear_is_rejected() {
        let mut ctx = ContextManager::new(RecordingContext::default(), palette::SPACE_CLEAR);
        let line = [LineCmd::new(Vec2::zero(), Vec2::new(1.0, 0.0), 1.0, palette::BORDER)];
        assert!(matches!(ctx.submit(DrawCall::Lines(&line)), Err(RenderError::NoActiveFrame)));
        ctx.clear().unwrap();
        assert!(ctx.submit(DrawCall::Lines(&line)).is_ok());
    }
}
