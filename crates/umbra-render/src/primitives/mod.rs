//! Primitive batchers: queue during the frame, flush once in a fixed order.
//!
//! Every batcher keeps its pending commands in insertion order and submits
//! them to the graphics context in one call. Visual stacking across batchers
//! is decided only by [`FLUSH_ORDER`]; the order in which entity renderers
//! queue into different batchers has no effect on the output.

mod batcher;
mod circle;
mod glyphs;
mod line;
mod planet;
mod rect;
mod sprite;
mod text;

pub use batcher::{Batcher, Primitive};
pub use circle::CircleCmd;
pub use glyphs::{ATLAS_SIZE, FontId, GlyphAtlas, GlyphQuad, GlyphRun};
pub use line::LineCmd;
pub use planet::PlanetCmd;
pub use rect::RectCmd;
pub use sprite::{SpriteCmd, SpriteId};
pub use text::{TextAlign, TextBatcher, TextCmd};

use std::fmt;

/// One flushable layer of the primary surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BatchKind {
    Line,
    /// Dedicated batch owned by the planet render manager.
    Planet,
    Circle,
    Rect,
    Text,
    Sprite,
}

/// Flush sequence of the primary surface, bottom layer first.
///
/// A later entry is drawn on top of an earlier one. A new batch kind must be
/// given an explicit slot here.
pub const FLUSH_ORDER: [BatchKind; 6] = [
    BatchKind::Line,
    BatchKind::Planet,
    BatchKind::Circle,
    BatchKind::Rect,
    BatchKind::Text,
    BatchKind::Sprite,
];

impl BatchKind {
    /// Position of this kind in [`FLUSH_ORDER`].
    pub const fn layer(self) -> usize {
        match self {
            BatchKind::Line => 0,
            BatchKind::Planet => 1,
            BatchKind::Circle => 2,
            BatchKind::Rect => 3,
            BatchKind::Text => 4,
            BatchKind::Sprite => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BatchKind::Line => "line",
            BatchKind::Planet => "planet",
            BatchKind::Circle => "circle",
            BatchKind::Rect => "rect",
            BatchKind::Text => "text",
            BatchKind::Sprite => "sprite",
        }
    }
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Access to the shared primitive batchers.
///
/// Entity renderers and managers receive this for the duration of a queue
/// call; they never see the orchestrator itself and never flush.
pub trait PrimitiveSink {
    fn lines(&mut self) -> &mut Batcher<LineCmd>;
    fn circles(&mut self) -> &mut Batcher<CircleCmd>;
    fn rects(&mut self) -> &mut Batcher<RectCmd>;
    fn texts(&mut self) -> &mut TextBatcher;
    fn sprites(&mut self) -> &mut Batcher<SpriteCmd>;
}

/// The five shared batchers, owned by the orchestrator.
#[derive(Debug, Default)]
pub struct Batches {
    pub line: Batcher<LineCmd>,
    pub circle: Batcher<CircleCmd>,
    pub rect: Batcher<RectCmd>,
    pub text: TextBatcher,
    pub sprite: Batcher<SpriteCmd>,
}

impl Batches {
    pub fn new(glyphs: GlyphAtlas) -> Self {
        Self {
            line: Batcher::new(),
            circle: Batcher::new(),
            rect: Batcher::new(),
            text: TextBatcher::new(glyphs),
            sprite: Batcher::new(),
        }
    }

    /// Total number of commands waiting for a flush.
    pub fn pending(&self) -> usize {
        self.line.len() + self.circle.len() + self.rect.len() + self.text.len() + self.sprite.len()
    }

    /// Drops every pending command. Returns how many were dropped.
    pub fn discard(&mut self) -> usize {
        self.line.discard()
            + self.circle.discard()
            + self.rect.discard()
            + self.text.discard()
            + self.sprite.discard()
    }

    #[inline]
    pub fn glyphs_mut(&mut self) -> &mut GlyphAtlas {
        self.text.glyphs_mut()
    }
}

impl PrimitiveSink for Batches {
    fn lines(&mut self) -> &mut Batcher<LineCmd> {
        &mut self.line
    }

    fn circles(&mut self) -> &mut Batcher<CircleCmd> {
        &mut self.circle
    }

    fn rects(&mut self) -> &mut Batcher<RectCmd> {
        &mut self.rect
    }

    fn texts(&mut self) -> &mut TextBatcher {
        &mut self.text
    }

    fn sprites(&mut self) -> &mut Batcher<SpriteCmd> {
        &mut self.sprite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::palette;

    #[test]
    fn flush_order_layers_match_their_positions() {
        for (i, kind) in FLUSH_ORDER.iter().enumerate() {
            assert_eq!(kind.layer(), i, "{kind} is out of place");
        }
    }

    #[test]
    fn discard_empties_every_batch() {
        let mut batches = Batches::default();
        batches.lines().queue(LineCmd::new(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, palette::BORDER));
        batches.circles().queue(CircleCmd::filled(Vec2::zero(), 2.0, palette::MINE));
        batches.texts().queue(TextCmd::new("hi", Vec2::zero(), 12.0, palette::LABEL));
        assert_eq!(batches.pending(), 3);
        assert_eq!(batches.discard(), 3);
        assert_eq!(batches.pending(), 0);
    }
}
