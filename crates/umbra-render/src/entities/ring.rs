use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, PrimitiveSink};
use crate::scene::Location;

/// One thin ring per purchased upgrade.
#[derive(Debug, Clone)]
pub struct RingRenderer {
    pub color: Color,
    pub spacing: f32,
}

impl Default for RingRenderer {
    fn default() -> Self {
        Self { color: palette::RING, spacing: 0.22 }
    }
}

impl RingRenderer {
    pub fn queue_rings(&self, loc: &Location, sink: &mut dyn PrimitiveSink) -> usize {
        let planet = &loc.planet;
        for i in 0..planet.upgrades {
            let radius = planet.radius * (1.25 + self.spacing * f32::from(i));
            sink.circles().queue(CircleCmd::outline(loc.coords, radius, 1.5, self.color));
        }
        usize::from(planet.upgrades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::primitives::Batches;
    use crate::scene::{LocationId, Planet, PlanetKind};

    #[test]
    fn rings_grow_outwards() {
        let mut planet = Planet::new(PlanetKind::Planet, 2, 4.0);
        planet.upgrades = 3;
        let loc = Location { id: LocationId(7), coords: Vec2::zero(), planet };

        let mut sink = Batches::default();
        assert_eq!(RingRenderer::default().queue_rings(&loc, &mut sink), 3);
        let radii: Vec<f32> = sink.circle.pending().iter().map(|c| c.radius).collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        assert!(sink.circle.pending().iter().all(|c| c.stroke.is_some()));
    }
}
