use crate::context::DrawCall;
use crate::coords::Rect;
use crate::paint::Color;

use super::{BatchKind, Primitive};

/// World-space axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
    /// `Some(px)` draws only an outline of that width.
    pub stroke: Option<f32>,
}

impl RectCmd {
    #[inline]
    pub fn filled(rect: Rect, color: Color) -> Self {
        Self { rect, color, stroke: None }
    }

    #[inline]
    pub fn outline(rect: Rect, width: f32, color: Color) -> Self {
        Self { rect, color, stroke: Some(width) }
    }
}

impl Primitive for RectCmd {
    const KIND: BatchKind = BatchKind::Rect;

    fn draw_call(batch: &[Self]) -> DrawCall<'_> {
        DrawCall::Rects(batch)
    }
}
