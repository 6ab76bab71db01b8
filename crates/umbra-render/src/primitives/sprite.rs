use crate::context::DrawCall;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{BatchKind, Primitive};

/// Index of a cell in the sprite sheet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SpriteId(pub u32);

/// Sprite centred on a world point, sized in screen pixels so it stays
/// legible at every zoom level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteCmd {
    pub sprite: SpriteId,
    pub center: Vec2,
    pub size: f32,
    pub tint: Color,
}

impl SpriteCmd {
    #[inline]
    pub fn new(sprite: SpriteId, center: Vec2, size: f32, tint: Color) -> Self {
        Self { sprite, center, size, tint }
    }
}

impl Primitive for SpriteCmd {
    const KIND: BatchKind = BatchKind::Sprite;

    fn draw_call(batch: &[Self]) -> DrawCall<'_> {
        DrawCall::Sprites(batch)
    }
}
