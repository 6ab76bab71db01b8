use crate::coords::Rect;
use crate::paint::{Color, palette};
use crate::primitives::{PrimitiveSink, RectCmd};
use crate::scene::Location;
use crate::time::FrameContext;

use super::turn_angle;

/// Nested frames pulsing out of the rip.
#[derive(Debug, Clone)]
pub struct SpacetimeRipRenderer {
    pub color: Color,
    pub layers: u32,
    /// Seconds per pulse.
    pub period: f64,
}

impl Default for SpacetimeRipRenderer {
    fn default() -> Self {
        Self { color: palette::RIP, layers: 3, period: 4.0 }
    }
}

impl SpacetimeRipRenderer {
    pub fn queue_rip(&self, loc: &Location, frame: &FrameContext, sink: &mut dyn PrimitiveSink) {
        let radius = loc.planet.radius;
        let pulse = 0.5 + 0.5 * turn_angle(frame.timestamp, self.period).sin();
        let rects = sink.rects();
        for i in 0..self.layers {
            let t = (i as f32 + pulse) / self.layers as f32;
            let half = radius * (0.5 + t);
            rects.queue(RectCmd::outline(Rect::from_center(loc.coords, half), 1.5, self.color.fade(1.0 - t * 0.7)));
        }
        rects.queue(RectCmd::filled(Rect::from_center(loc.coords, radius * 0.4), self.color));
    }
}
