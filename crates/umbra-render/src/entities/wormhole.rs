use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, LineCmd, PrimitiveSink};
use crate::scene::Wormhole;

#[derive(Debug, Clone)]
pub struct WormholeRenderer {
    pub color: Color,
    /// Endpoint marker radius in world units.
    pub mouth_radius: f32,
}

impl Default for WormholeRenderer {
    fn default() -> Self {
        Self { color: palette::WORMHOLE, mouth_radius: 1.5 }
    }
}

impl WormholeRenderer {
    pub fn queue_wormhole(&self, wormhole: &Wormhole, sink: &mut dyn PrimitiveSink) {
        sink.lines().queue(LineCmd::new(wormhole.from, wormhole.to, 2.0, self.color.fade(0.6)));
        let circles = sink.circles();
        circles.queue(CircleCmd::outline(wormhole.from, self.mouth_radius, 2.0, self.color));
        circles.queue(CircleCmd::outline(wormhole.to, self.mouth_radius, 2.0, self.color));
    }
}
