use crate::coords::Vec2;
use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, PrimitiveSink};
use crate::scene::Location;

use super::hash01;

/// Asteroid field: a seeded cluster of rocks, more of them at higher levels.
#[derive(Debug, Clone)]
pub struct MineRenderer {
    pub color: Color,
}

impl Default for MineRenderer {
    fn default() -> Self {
        Self { color: palette::MINE }
    }
}

impl MineRenderer {
    pub fn queue_mine(&self, loc: &Location, sink: &mut dyn PrimitiveSink) -> usize {
        let planet = &loc.planet;
        let count = 3 + u32::from(planet.level);
        for i in 0..count {
            let angle = hash01(planet.seed, 2 * i) * std::f32::consts::TAU;
            let dist = planet.radius * hash01(planet.seed, 2 * i + 1).sqrt();
            let size = planet.radius * (0.12 + 0.1 * hash01(planet.seed ^ 0xA5A5, i));
            let center = loc.coords + Vec2::from_angle(angle) * dist;
            sink.circles().queue(CircleCmd::filled(center, size, self.color));
        }
        count as usize
    }
}
