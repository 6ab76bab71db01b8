use crate::paint::{Color, palette};
use crate::primitives::{Batcher, PlanetCmd};
use crate::scene::Location;
use crate::time::FrameContext;

use super::turn_angle;

/// Queues the shaded body of a regular planet into the planet batch.
#[derive(Debug, Clone)]
pub struct PlanetRenderer {
    /// Body tint per level, index 0..=9.
    pub level_colors: [Color; 10],
}

impl Default for PlanetRenderer {
    fn default() -> Self {
        Self {
            level_colors: [
                Color::from_hex(0x6b6f80),
                Color::from_hex(0x5a8f6a),
                Color::from_hex(0x4f8fb0),
                Color::from_hex(0x8f6fc0),
                Color::from_hex(0xc08f4f),
                Color::from_hex(0xc05f5f),
                Color::from_hex(0xd0c060),
                Color::from_hex(0x60d0c0),
                Color::from_hex(0xe0e0ff),
                Color::from_hex(0xffffff),
            ],
        }
    }
}

impl PlanetRenderer {
    pub fn queue_planet(&self, loc: &Location, frame: &FrameContext, batch: &mut Batcher<PlanetCmd>) {
        let planet = &loc.planet;
        // Bigger planets turn slower; the seed spreads periods so neighbours drift apart.
        let period = 20.0 + f64::from(planet.level) * 6.0 + f64::from(planet.seed % 13);
        batch.queue(PlanetCmd {
            center: loc.coords,
            radius: planet.radius,
            color: self.level_colors[usize::from(planet.level.min(9))],
            rim: planet.owner.map(|o| o.color),
            seed: planet.seed,
            phase: turn_angle(frame.timestamp, period),
            energy: planet.energy_fraction(),
        });
    }

    /// Body colour of unowned planets of `level`, for legends and tooltips.
    pub fn color_for(&self, level: u8) -> Color {
        self.level_colors.get(usize::from(level)).copied().unwrap_or(palette::UNOWNED)
    }
}
