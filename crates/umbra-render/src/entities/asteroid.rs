use crate::coords::Vec2;
use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, PrimitiveSink};
use crate::scene::Location;
use crate::time::FrameContext;

use super::{hash01, turn_angle};

/// Small moons circling high-level planets.
#[derive(Debug, Clone)]
pub struct AsteroidRenderer {
    pub min_level: u8,
    pub color: Color,
}

impl Default for AsteroidRenderer {
    fn default() -> Self {
        Self { min_level: 4, color: palette::ASTEROID }
    }
}

impl AsteroidRenderer {
    /// One moon per level above `min_level - 1`. Returns the number queued.
    pub fn queue_asteroids(&self, loc: &Location, frame: &FrameContext, sink: &mut dyn PrimitiveSink) -> usize {
        let planet = &loc.planet;
        if planet.level < self.min_level {
            return 0;
        }
        let count = u32::from(planet.level - self.min_level + 1);
        for i in 0..count {
            let jitter = hash01(planet.seed, i);
            let orbit = planet.radius * (1.6 + 0.35 * i as f32 + 0.2 * jitter);
            let period = 8.0 + 4.0 * f64::from(i) + f64::from(jitter) * 3.0;
            let angle = turn_angle(frame.timestamp, period) + jitter * std::f32::consts::TAU;
            let center = loc.coords + Vec2::from_angle(angle) * orbit;
            sink.circles().queue(CircleCmd::filled(center, planet.radius * 0.12, self.color));
        }
        count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Batches;
    use crate::scene::{LocationId, Planet, PlanetKind};

    fn loc(level: u8) -> Location {
        Location {
            id: LocationId(1),
            coords: Vec2::new(5.0, 5.0),
            planet: Planet::new(PlanetKind::Planet, level, 2.0).with_seed(99),
        }
    }

    #[test]
    fn low_level_planets_have_no_moons() {
        let mut sink = Batches::default();
        let frame = FrameContext::at(1, 0.0);
        assert_eq!(AsteroidRenderer::default().queue_asteroids(&loc(3), &frame, &mut sink), 0);
        assert!(sink.circle.is_empty());
    }

    #[test]
    fn moons_orbit_outside_the_body() {
        let mut sink = Batches::default();
        let frame = FrameContext::at(1, 1_700_000_000.0);
        assert_eq!(AsteroidRenderer::default().queue_asteroids(&loc(6), &frame, &mut sink), 3);
        for moon in sink.circle.pending() {
            assert!(moon.center.distance(Vec2::new(5.0, 5.0)) > 2.0);
        }
    }
}
