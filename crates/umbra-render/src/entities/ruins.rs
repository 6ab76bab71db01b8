use crate::coords::{Rect, Vec2};
use crate::paint::{Color, palette};
use crate::primitives::{PrimitiveSink, RectCmd};
use crate::scene::Location;

use super::hash01;

/// Foundation blocks scattered over the site.
#[derive(Debug, Clone)]
pub struct RuinsRenderer {
    pub color: Color,
}

impl Default for RuinsRenderer {
    fn default() -> Self {
        Self { color: palette::RUINS }
    }
}

impl RuinsRenderer {
    pub fn queue_ruins(&self, loc: &Location, sink: &mut dyn PrimitiveSink) -> usize {
        let planet = &loc.planet;
        let blocks = 2 + u32::from(planet.level / 2);
        let rects = sink.rects();
        rects.queue(RectCmd::outline(Rect::from_center(loc.coords, planet.radius), 1.0, self.color));
        for i in 0..blocks {
            let offset = Vec2::new(
                (hash01(planet.seed, 3 * i) - 0.5) * planet.radius * 1.4,
                (hash01(planet.seed, 3 * i + 1) - 0.5) * planet.radius * 1.4,
            );
            let half = planet.radius * (0.1 + 0.15 * hash01(planet.seed, 3 * i + 2));
            rects.queue(RectCmd::filled(Rect::from_center(loc.coords + offset, half), self.color.fade(0.8)));
        }
        blocks as usize + 1
    }
}
