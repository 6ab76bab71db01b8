use crate::coords::Vec2;
use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, LineCmd, PrimitiveSink};
use crate::scene::Location;
use crate::time::FrameContext;

use super::turn_angle;

/// Bright core with two rotating jets.
#[derive(Debug, Clone)]
pub struct QuasarRenderer {
    pub color: Color,
    /// Seconds per jet revolution.
    pub period: f64,
}

impl Default for QuasarRenderer {
    fn default() -> Self {
        Self { color: palette::QUASAR, period: 30.0 }
    }
}

impl QuasarRenderer {
    pub fn queue_quasar(&self, loc: &Location, frame: &FrameContext, sink: &mut dyn PrimitiveSink) {
        let planet = &loc.planet;
        let dir = Vec2::from_angle(turn_angle(frame.timestamp, self.period));
        let jet = dir * planet.radius * 3.0;

        let lines = sink.lines();
        lines.queue(LineCmd::new(loc.coords, loc.coords + jet, 2.0, self.color.fade(0.7)));
        lines.queue(LineCmd::new(loc.coords, loc.coords - jet, 2.0, self.color.fade(0.7)));

        let circles = sink.circles();
        circles.queue(CircleCmd::filled(loc.coords, planet.radius * 0.6, self.color));
        circles.queue(CircleCmd::outline(loc.coords, planet.radius, 1.0, self.color.fade(0.5)));
    }
}
