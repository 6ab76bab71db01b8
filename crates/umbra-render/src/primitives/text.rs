use crate::context::{ContextManager, DrawCall, GraphicsContext};
use crate::coords::Vec2;
use crate::error::RenderError;
use crate::paint::Color;

use super::{BatchKind, Batcher, FontId, GlyphAtlas, GlyphRun};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Label anchored to a world point.
///
/// The anchor follows the camera; `offset` and `size` are screen pixels so
/// labels keep their size while zooming.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub anchor: Vec2,
    pub offset: Vec2,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub font: FontId,
}

impl TextCmd {
    pub fn new(text: impl Into<String>, anchor: Vec2, size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            anchor,
            offset: Vec2::zero(),
            size,
            color,
            align: TextAlign::Left,
            font: FontId::DEFAULT,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    #[inline]
    pub fn run(&self) -> GlyphRun<'_> {
        GlyphRun {
            text: &self.text,
            font: self.font,
            size: self.size,
            color: self.color,
            align: self.align,
        }
    }
}

/// Text batcher. Owns the glyph atlas that backends rasterise into.
#[derive(Debug, Default)]
pub struct TextBatcher {
    batch: Batcher<TextCmd>,
    glyphs: GlyphAtlas,
}

impl TextBatcher {
    pub fn new(glyphs: GlyphAtlas) -> Self {
        Self { batch: Batcher::new(), glyphs }
    }

    /// Empty strings are dropped at queue time.
    #[inline]
    pub fn queue(&mut self, cmd: TextCmd) {
        if !cmd.text.is_empty() {
            self.batch.queue(cmd);
        }
    }

    #[inline]
    pub fn pending(&self) -> &[TextCmd] {
        self.batch.pending()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.batch.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn discard(&mut self) -> usize {
        self.batch.discard()
    }

    #[inline]
    pub fn glyphs(&self) -> &GlyphAtlas {
        &self.glyphs
    }

    #[inline]
    pub fn glyphs_mut(&mut self) -> &mut GlyphAtlas {
        &mut self.glyphs
    }

    pub fn flush<G: GraphicsContext>(
        &mut self,
        ctx: &mut ContextManager<G>,
    ) -> Result<usize, RenderError> {
        let glyphs = &mut self.glyphs;
        let n = self
            .batch
            .submit_with(|commands| ctx.submit(DrawCall::Text { commands, glyphs }))?;
        if n > 0 {
            log::trace!("flushed {n} {} command(s)", BatchKind::Text);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::palette;

    #[test]
    fn empty_labels_are_not_queued() {
        let mut text = TextBatcher::default();
        text.queue(TextCmd::new("", Vec2::zero(), 12.0, palette::LABEL));
        text.queue(TextCmd::new("L4", Vec2::zero(), 12.0, palette::LABEL).centered());
        assert_eq!(text.len(), 1);
        assert_eq!(text.pending()[0].align, TextAlign::Center);
    }
}
