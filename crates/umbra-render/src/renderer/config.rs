use crate::context::GraphicsContext;
use crate::coords::Viewport;
use crate::paint::{Color, palette};
use crate::primitives::GlyphAtlas;

/// Construction-time settings of the orchestrator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RendererConfig {
    pub clear_color: Color,
    /// Frame summaries are logged at debug level every `debug_interval`
    /// frames. Zero disables them.
    pub debug_interval: u64,
    /// Planet labels are only drawn for bodies at least this large on screen, in pixels.
    pub label_min_screen_radius: f32,
    pub miner_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: palette::SPACE_CLEAR,
            debug_interval: 120,
            label_min_screen_radius: 8.0,
            miner_color: palette::MINER,
        }
    }
}

/// The three drawing surfaces handed to the orchestrator.
pub struct Surfaces<G> {
    /// Hardware-accelerated primary surface.
    pub primary: G,
    /// Size of the overlay layered above the primary surface.
    pub overlay: Viewport,
    /// Off-screen glyph buffer used by the text primitive.
    pub glyphs: GlyphAtlas,
}

impl<G: GraphicsContext> Surfaces<G> {
    /// Overlay sized like the primary surface, empty glyph atlas.
    pub fn new(primary: G) -> Self {
        let overlay = primary.viewport();
        Self { primary, overlay, glyphs: GlyphAtlas::new() }
    }

    pub fn with_glyphs(mut self, glyphs: GlyphAtlas) -> Self {
        self.glyphs = glyphs;
        self
    }
}
