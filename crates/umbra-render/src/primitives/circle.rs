use crate::context::DrawCall;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{BatchKind, Primitive};

/// World-space disc or ring.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    /// World units.
    pub radius: f32,
    pub color: Color,
    /// `Some(px)` draws only an outline of that width.
    pub stroke: Option<f32>,
}

impl CircleCmd {
    #[inline]
    pub fn filled(center: Vec2, radius: f32, color: Color) -> Self {
        Self { center, radius, color, stroke: None }
    }

    #[inline]
    pub fn outline(center: Vec2, radius: f32, width: f32, color: Color) -> Self {
        Self { center, radius, color, stroke: Some(width) }
    }
}

impl Primitive for CircleCmd {
    const KIND: BatchKind = BatchKind::Circle;

    fn draw_call(batch: &[Self]) -> DrawCall<'_> {
        DrawCall::Circles(batch)
    }
}
