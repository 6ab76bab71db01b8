use crate::context::DrawCall;
use crate::coords::Vec2;
use crate::paint::Color;

use super::{BatchKind, Primitive};

/// Shaded planet body. Queued only by the planet render manager.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlanetCmd {
    pub center: Vec2,
    /// World units.
    pub radius: f32,
    pub color: Color,
    /// Owner-coloured rim, if owned.
    pub rim: Option<Color>,
    /// Noise seed for surface detail.
    pub seed: u32,
    /// Rotation phase in radians, derived from the frame timestamp.
    pub phase: f32,
    /// Fill level of the energy band, `[0, 1]`.
    pub energy: f32,
}

impl Primitive for PlanetCmd {
    const KIND: BatchKind = BatchKind::Planet;

    fn draw_call(batch: &[Self]) -> DrawCall<'_> {
        DrawCall::Planets(batch)
    }
}
