use std::collections::{HashMap, HashSet};
use std::fmt;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::error::RenderError;
use crate::paint::Color;

use super::TextAlign;

/// Side length of the square R8 glyph atlas, in texels.
pub const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1;

/// Handle to a font loaded into a [`GlyphAtlas`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// First font loaded into the atlas.
    pub const DEFAULT: FontId = FontId(0);
}

/// One line of text to lay out.
#[derive(Debug, Copy, Clone)]
pub struct GlyphRun<'a> {
    pub text: &'a str,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

/// Screen-space quad sampling one glyph from the atlas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphQuad {
    pub min: Vec2,
    pub max: Vec2,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: Color,
}

#[derive(Debug, Copy, Clone)]
struct AtlasRegion {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Off-screen glyph surface used by the text primitive.
///
/// Glyphs are rasterised with fontdue on first use and shelf-packed into a
/// CPU-side R8 buffer. `generation` changes whenever new texels are written;
/// GPU backends re-upload the atlas when it differs from what they hold.
pub struct GlyphAtlas {
    fonts: Vec<fontdue::Font>,
    layout: Layout<()>,
    regions: HashMap<GlyphRasterConfig, AtlasRegion>,

    // allocated on the first rasterised glyph
    pixels: Vec<u8>,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
    generation: u64,

    warned_oversize: bool,
    warned_fonts: HashSet<FontId>,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            regions: HashMap::new(),
            pixels: Vec::new(),
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
            generation: 0,
            warned_oversize: false,
            warned_fonts: HashSet::new(),
        }
    }
}

impl fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("fonts", &self.fonts.len())
            .field("glyphs", &self.regions.len())
            .field("generation", &self.generation)
            .field("full", &self.full)
            .finish()
    }
}

impl GlyphAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType or OpenType font. The first font loaded becomes
    /// [`FontId::DEFAULT`].
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, RenderError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RenderError::Font(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    #[inline]
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Bumped every time texels are added.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Atlas texels, row-major, `ATLAS_SIZE` bytes per row. `None` until the
    /// first glyph has been rasterised.
    pub fn pixels(&self) -> Option<&[u8]> {
        if self.pixels.is_empty() { None } else { Some(&self.pixels) }
    }

    /// Lays out `run` with its first line's top edge at `origin.y` and
    /// appends one quad per visible glyph to `out`.
    ///
    /// `origin.x` is the left edge, centre or right edge depending on
    /// `run.align`. Returns the number of quads appended.
    pub fn layout(&mut self, run: GlyphRun<'_>, origin: Vec2, out: &mut Vec<GlyphQuad>) -> usize {
        let index = run.font.0;
        if index >= self.fonts.len() {
            if self.warned_fonts.insert(run.font) {
                log::warn!("GlyphAtlas: unknown {:?}; text using it is skipped", run.font);
            }
            return 0;
        }

        self.layout.reset(&LayoutSettings { x: origin.x, y: origin.y, ..LayoutSettings::default() });
        self.layout.append(self.fonts.as_slice(), &TextStyle::new(run.text, run.size, index));

        // Copy positions out so the layout borrow ends before the atlas is mutated.
        let placed: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let right = placed.iter().map(|&(_, x, _, w, _)| x + w as f32).fold(origin.x, f32::max);
        let shift = match run.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -(right - origin.x) * 0.5,
            TextAlign::Right => -(right - origin.x),
        };

        let before = out.len();
        for (key, x, y, w, h) in placed {
            let Some(region) = self.region_for(index, key) else {
                continue;
            };
            let min = Vec2::new((x + shift).round(), y.round());
            out.push(GlyphQuad {
                min,
                max: min + Vec2::new(w as f32, h as f32),
                uv_min: region.uv_min,
                uv_max: region.uv_max,
                color: run.color,
            });
        }
        out.len() - before
    }

    fn region_for(&mut self, font: usize, key: GlyphRasterConfig) -> Option<AtlasRegion> {
        if let Some(region) = self.regions.get(&key) {
            return Some(*region);
        }
        let (metrics, bitmap) = self.fonts.get(font)?.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let region = self.place(&bitmap, metrics.width as u32, metrics.height as u32)?;
        self.regions.insert(key, region);
        Some(region)
    }

    /// Shelf-packs a `w × h` coverage bitmap into the atlas.
    fn place(&mut self, bitmap: &[u8], w: u32, h: u32) -> Option<AtlasRegion> {
        if self.full {
            return None;
        }

        // A glyph that cannot fit on an empty shelf would spill into the next row.
        let max_side = ATLAS_SIZE - 2 * GLYPH_PADDING;
        if w > max_side || h > max_side {
            if !self.warned_oversize {
                self.warned_oversize = true;
                log::warn!(
                    "GlyphAtlas: {w}x{h} glyph exceeds the {ATLAS_SIZE}x{ATLAS_SIZE} atlas; oversized glyphs are skipped"
                );
            }
            return None;
        }

        // Advance to a new shelf when the glyph doesn't fit horizontally.
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!(
                "GlyphAtlas: atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be rendered"
            );
            self.full = true;
            return None;
        }

        if self.pixels.is_empty() {
            self.pixels = vec![0; (ATLAS_SIZE * ATLAS_SIZE) as usize];
        }

        let gx = self.cursor_x;
        let gy = self.cursor_y;
        let stride = ATLAS_SIZE as usize;
        for (row, src) in bitmap.chunks_exact(w as usize).take(h as usize).enumerate() {
            let start = (gy as usize + row) * stride + gx as usize;
            self.pixels[start..start + w as usize].copy_from_slice(src);
        }

        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        self.generation += 1;

        let size = ATLAS_SIZE as f32;
        Some(AtlasRegion {
            uv_min: [gx as f32 / size, gy as f32 / size],
            uv_max: [(gx + w) as f32 / size, (gy + h) as f32 / size],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::palette;

    fn run(text: &str) -> GlyphRun<'_> {
        GlyphRun { text, font: FontId::DEFAULT, size: 14.0, color: palette::LABEL, align: TextAlign::Left }
    }

    #[test]
    fn unknown_font_lays_out_nothing() {
        let mut atlas = GlyphAtlas::new();
        let mut out = Vec::new();
        assert_eq!(atlas.layout(run("abc"), Vec2::zero(), &mut out), 0);
        assert_eq!(atlas.layout(run("def"), Vec2::zero(), &mut out), 0);
        assert!(out.is_empty());
        assert_eq!(atlas.warned_fonts.len(), 1);
        assert!(atlas.pixels().is_none());
    }

    #[test]
    fn garbage_font_bytes_are_rejected() {
        let mut atlas = GlyphAtlas::new();
        assert!(matches!(atlas.load_font(b"not a font"), Err(RenderError::Font(_))));
        assert_eq!(atlas.font_count(), 0);
    }

    #[test]
    fn shelf_packing_wraps_and_copies_texels() {
        let mut atlas = GlyphAtlas::new();
        let a = atlas.place(&[7; 2000 * 10], 2000, 10).unwrap();
        assert_eq!(a.uv_min[1], 1.0 / ATLAS_SIZE as f32);
        assert_eq!(atlas.generation(), 1);

        // Doesn't fit next to the first glyph: starts a new shelf below it.
        let b = atlas.place(&[9; 100 * 4], 100, 4).unwrap();
        assert_eq!(b.uv_min, [1.0 / ATLAS_SIZE as f32, 12.0 / ATLAS_SIZE as f32]);

        let pixels = atlas.pixels().unwrap();
        let stride = ATLAS_SIZE as usize;
        assert_eq!(pixels[stride + 1], 7);
        assert_eq!(pixels[12 * stride + 1], 9);
        assert_eq!(pixels[0], 0);
    }

    #[test]
    fn full_atlas_refuses_further_glyphs() {
        let mut atlas = GlyphAtlas::new();
        assert!(atlas.place(&vec![1; 10 * 2040], 10, 2040).is_some());
        assert!(atlas.place(&vec![1; 2040 * 10], 2040, 10).is_none());
        assert!(atlas.place(&[1; 4], 2, 2).is_none());
    }

    #[test]
    fn oversized_glyph_is_skipped_without_touching_texels() {
        let mut atlas = GlyphAtlas::new();
        assert!(atlas.place(&vec![5; 3000 * 2], 3000, 2).is_none());
        assert!(atlas.place(&vec![5; 2 * 2047], 2, 2047).is_none());
        assert!(atlas.warned_oversize);
        assert_eq!(atlas.generation(), 0);
        assert!(atlas.pixels().is_none());

        // The atlas stays usable and the largest legal glyph still fits.
        let side = ATLAS_SIZE - 2 * GLYPH_PADDING;
        let r = atlas.place(&vec![3; side as usize * 2], side, 2).unwrap();
        assert!(r.uv_max[0] <= 1.0);
        let pixels = atlas.pixels().unwrap();
        let stride = ATLAS_SIZE as usize;
        assert_eq!(pixels[stride + side as usize], 3);
        assert_eq!(pixels[stride + side as usize + 1], 0);
        assert_eq!(pixels[3 * stride + 10], 0);
    }
}
