use crate::coords::{Camera, Viewport};
use crate::entities::ChunkQuad;
use crate::error::RenderError;
use crate::overlay::{DrawItem, DrawList};
use crate::paint::Color;
use crate::primitives::{
    BatchKind, CircleCmd, GlyphAtlas, LineCmd, PlanetCmd, RectCmd, SpriteCmd, TextCmd,
};

use super::{DrawCall, GraphicsContext, Projection};

/// One operation observed by a [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEvent {
    SetProjection(Camera),
    Clear(Color),
    /// `kind` is `None` for the background.
    Draw { kind: Option<BatchKind>, count: usize },
    /// Overlay items in the order they were composited.
    Present { overlay: Vec<DrawItem> },
}

/// Headless [`GraphicsContext`] that records every call.
///
/// Used for tools without a GPU and for exercising the full draw phase in
/// tests. The log holds the current frame only: `set_projection` opens a
/// frame and drops whatever the previous one recorded.
#[derive(Debug)]
pub struct RecordingContext {
    viewport: Viewport,
    events: Vec<ContextEvent>,
    frame_open: bool,
    presents: usize,
    fail_kind: Option<BatchKind>,

    chunks: Vec<ChunkQuad>,
    lines: Vec<LineCmd>,
    planets: Vec<PlanetCmd>,
    circles: Vec<CircleCmd>,
    rects: Vec<RectCmd>,
    texts: Vec<TextCmd>,
    sprites: Vec<SpriteCmd>,
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new(Viewport::new(1280.0, 720.0))
    }
}

impl RecordingContext {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            events: Vec::new(),
            frame_open: false,
            presents: 0,
            fail_kind: None,
            chunks: Vec::new(),
            lines: Vec::new(),
            planets: Vec::new(),
            circles: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            sprites: Vec::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Makes the next draw of `kind` fail with a backend error.
    pub fn fail_next_draw(&mut self, kind: BatchKind) {
        self.fail_kind = Some(kind);
    }

    #[inline]
    pub fn events(&self) -> &[ContextEvent] {
        &self.events
    }

    /// Batch layers in the order they reached the backend.
    pub fn draw_order(&self) -> Vec<Option<BatchKind>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ContextEvent::Draw { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Frames presented since construction.
    #[inline]
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Overlay of the most recent present.
    pub fn last_overlay(&self) -> Option<&[DrawItem]> {
        self.events.iter().rev().find_map(|e| match e {
            ContextEvent::Present { overlay } => Some(overlay.as_slice()),
            _ => None,
        })
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
        self.chunks.clear();
        self.lines.clear();
        self.planets.clear();
        self.circles.clear();
        self.rects.clear();
        self.texts.clear();
        self.sprites.clear();
    }

    pub fn chunks(&self) -> &[ChunkQuad] {
        &self.chunks
    }

    pub fn lines(&self) -> &[LineCmd] {
        &self.lines
    }

    pub fn planets(&self) -> &[PlanetCmd] {
        &self.planets
    }

    pub fn circles(&self) -> &[CircleCmd] {
        &self.circles
    }

    pub fn rects(&self) -> &[RectCmd] {
        &self.rects
    }

    pub fn texts(&self) -> &[TextCmd] {
        &self.texts
    }

    pub fn sprites(&self) -> &[SpriteCmd] {
        &self.sprites
    }
}

impl GraphicsContext for RecordingContext {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_projection(&mut self, projection: &Projection) -> Result<(), RenderError> {
        self.clear_events();
        self.events.push(ContextEvent::SetProjection(projection.camera));
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        self.frame_open = true;
        self.events.push(ContextEvent::Clear(color));
        Ok(())
    }

    fn draw(&mut self, call: DrawCall<'_>) -> Result<(), RenderError> {
        if !self.frame_open {
            return Err(RenderError::NoActiveFrame);
        }
        let kind = call.kind();
        if kind.is_some() && kind == self.fail_kind {
            self.fail_kind = None;
            return Err(RenderError::Backend(format!("injected failure in {:?} draw", kind)));
        }
        self.events.push(ContextEvent::Draw { kind, count: call.len() });

        match call {
            DrawCall::Background(c) => self.chunks.extend_from_slice(c),
            DrawCall::Lines(c) => self.lines.extend_from_slice(c),
            DrawCall::Planets(c) => self.planets.extend_from_slice(c),
            DrawCall::Circles(c) => self.circles.extend_from_slice(c),
            DrawCall::Rects(c) => self.rects.extend_from_slice(c),
            DrawCall::Text { commands, .. } => self.texts.extend_from_slice(commands),
            DrawCall::Sprites(c) => self.sprites.extend_from_slice(c),
        }
        Ok(())
    }

    fn present(&mut self, overlay: &mut DrawList, _glyphs: &mut GlyphAtlas) -> Result<(), RenderError> {
        if !self.frame_open {
            return Err(RenderError::NoActiveFrame);
        }
        self.frame_open = false;
        self.presents += 1;
        let overlay = overlay.iter_in_paint_order().cloned().collect();
        self.events.push(ContextEvent::Present { overlay });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextManager;
    use crate::paint::palette;

    fn frame(ctx: &mut ContextManager<RecordingContext>, lines: &[LineCmd]) {
        ctx.set_projection(Camera::default()).unwrap();
        ctx.clear().unwrap();
        ctx.submit(DrawCall::Lines(lines)).unwrap();
        ctx.context_mut().present(&mut DrawList::new(), &mut GlyphAtlas::new()).unwrap();
    }

    #[test]
    fn log_holds_only_the_latest_frame() {
        let mut ctx = ContextManager::new(RecordingContext::default(), palette::SPACE_CLEAR);
        let line = LineCmd::new(Default::default(), Default::default(), 1.0, palette::BORDER);

        for _ in 0..50 {
            frame(&mut ctx, &[line, line]);
        }

        let rec = ctx.context();
        assert_eq!(rec.presents(), 50);
        assert_eq!(rec.lines().len(), 2);
        assert_eq!(rec.events().len(), 4);
        assert!(matches!(rec.events()[0], ContextEvent::SetProjection(_)));
    }
}
