//! Overlay surface: a screen-space draw list composited over the primary
//! surface at present time.
//!
//! The overlay is cleared at the start of every frame. The renderer draws its
//! own indicators at [`ZIndex::INDICATORS`]; plugins receive an
//! [`OverlayCanvas`] at [`ZIndex::PLUGINS`] and never touch the primary
//! surface.

mod canvas;
mod cmd;
mod key;
mod list;
mod z_index;

pub use canvas::OverlayCanvas;
pub use cmd::{CircleShape, LineShape, OverlayCmd, RectShape, Stroke, TextShape};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;

use crate::coords::Viewport;

#[derive(Debug, Default)]
pub struct Overlay {
    list: DrawList,
    viewport: Viewport,
}

impl Overlay {
    pub fn new(viewport: Viewport) -> Self {
        Self { list: DrawList::new(), viewport }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Drops last frame's contents and adopts the current surface size.
    pub fn clear(&mut self, viewport: Viewport) {
        self.list.clear();
        self.viewport = viewport;
    }

    /// Opens a drawing handle at layer `z`.
    pub fn canvas(&mut self, z: ZIndex) -> OverlayCanvas<'_> {
        OverlayCanvas::new(&mut self.list, z, self.viewport)
    }

    #[inline]
    pub fn list(&self) -> &DrawList {
        &self.list
    }

    #[inline]
    pub fn list_mut(&mut self) -> &mut DrawList {
        &mut self.list
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;

    #[test]
    fn canvas_records_at_its_layer() {
        let mut overlay = Overlay::new(Viewport::new(800.0, 600.0));
        {
            let mut canvas = overlay.canvas(ZIndex::PLUGINS);
            canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::opaque(1.0, 0.0, 0.0));
            canvas.set_layer(ZIndex::INDICATORS);
            canvas.line(Vec2::zero(), Vec2::new(5.0, 5.0), 1.0, Color::opaque(0.0, 1.0, 0.0));
            canvas.text("", Vec2::zero(), 12.0, Color::opaque(1.0, 1.0, 1.0));
        }
        let layers: Vec<_> = overlay.list().items().iter().map(|i| i.key.z).collect();
        assert_eq!(layers, vec![ZIndex::PLUGINS, ZIndex::INDICATORS]);
    }

    #[test]
    fn clear_adopts_new_viewport() {
        let mut overlay = Overlay::new(Viewport::new(800.0, 600.0));
        overlay.canvas(ZIndex::PLUGINS).fill_circle(Vec2::zero(), 3.0, Color::opaque(1.0, 1.0, 1.0));
        overlay.clear(Viewport::new(1024.0, 768.0));
        assert!(overlay.is_empty());
        assert_eq!(overlay.viewport(), Viewport::new(1024.0, 768.0));
        assert_eq!(overlay.canvas(ZIndex::PLUGINS).viewport(), Viewport::new(1024.0, 768.0));
    }
}
