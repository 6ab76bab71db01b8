use crate::context::DrawCall;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{BatchKind, Primitive};

/// World-space segment with a constant on-screen width.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in screen pixels.
    pub width: f32,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn new(from: Vec2, to: Vec2, width: f32, color: Color) -> Self {
        Self { from, to, width, color }
    }
}

impl Primitive for LineCmd {
    const KIND: BatchKind = BatchKind::Line;

    fn draw_call(batch: &[Self]) -> DrawCall<'_> {
        DrawCall::Lines(batch)
    }
}
