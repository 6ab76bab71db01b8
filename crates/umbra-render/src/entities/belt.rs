use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, PrimitiveSink};
use crate::scene::Location;

/// Dust belt around level 5+ planets: a wide faint band plus a thin edge.
#[derive(Debug, Clone)]
pub struct BeltRenderer {
    pub min_level: u8,
    pub color: Color,
}

impl Default for BeltRenderer {
    fn default() -> Self {
        Self { min_level: 5, color: palette::BELT }
    }
}

impl BeltRenderer {
    pub fn queue_belt(&self, loc: &Location, sink: &mut dyn PrimitiveSink) -> bool {
        let planet = &loc.planet;
        if planet.level < self.min_level {
            return false;
        }
        let radius = planet.radius * (2.4 + 0.1 * f32::from(planet.level - self.min_level));
        let circles = sink.circles();
        circles.queue(CircleCmd::outline(loc.coords, radius, 6.0, self.color.fade(0.5)));
        circles.queue(CircleCmd::outline(loc.coords, radius, 1.0, self.color));
        true
    }
}
