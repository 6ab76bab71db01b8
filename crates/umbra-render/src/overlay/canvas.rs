use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;
use crate::primitives::FontId;

use super::{
    CircleShape, DrawList, LineShape, OverlayCmd, RectShape, Stroke, TextShape, ZIndex,
};

/// Immediate-mode drawing handle onto the overlay surface.
///
/// Every call records one [`OverlayCmd`] at the canvas' current layer.
/// Coordinates are screen pixels (top-left origin).
pub struct OverlayCanvas<'a> {
    list: &'a mut DrawList,
    z: ZIndex,
    viewport: Viewport,
}

impl<'a> OverlayCanvas<'a> {
    pub(crate) fn new(list: &'a mut DrawList, z: ZIndex, viewport: Viewport) -> Self {
        Self { list, z, viewport }
    }

    /// Size of the overlay surface.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn layer(&self) -> ZIndex {
        self.z
    }

    /// Moves subsequent commands to another layer.
    #[inline]
    pub fn set_layer(&mut self, z: ZIndex) {
        self.z = z;
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(OverlayCmd::Rect(RectShape { rect, fill: Some(color), stroke: None }));
    }

    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.push(OverlayCmd::Rect(RectShape {
            rect,
            fill: None,
            stroke: Some(Stroke::new(width, color)),
        }));
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(OverlayCmd::Circle(CircleShape {
            center,
            radius,
            fill: Some(color),
            stroke: None,
        }));
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.push(OverlayCmd::Circle(CircleShape {
            center,
            radius,
            fill: None,
            stroke: Some(Stroke::new(width, color)),
        }));
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(OverlayCmd::Line(LineShape { from, to, stroke: Stroke::new(width, color) }));
    }

    /// Draws `text` with its top-left corner at `origin` in the default font.
    pub fn text(&mut self, text: impl Into<String>, origin: Vec2, size: f32, color: Color) {
        self.text_with_font(text, origin, size, color, FontId::DEFAULT);
    }

    pub fn text_with_font(
        &mut self,
        text: impl Into<String>,
        origin: Vec2,
        size: f32,
        color: Color,
        font: FontId,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.push(OverlayCmd::Text(TextShape { text, origin, size, color, font }));
    }

    /// Restricts subsequent commands to `rect` until the matching [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.list.pop_clip();
    }

    #[inline]
    fn push(&mut self, cmd: OverlayCmd) {
        self.list.push(self.z, cmd);
    }
}
