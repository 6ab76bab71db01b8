use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, PrimitiveSink};
use crate::scene::Location;

/// What is left of a destroyed planet.
#[derive(Debug, Clone)]
pub struct BlackDomainRenderer {
    pub fill: Color,
    pub rim: Color,
}

impl Default for BlackDomainRenderer {
    fn default() -> Self {
        Self { fill: palette::BLACK_DOMAIN, rim: palette::BLACK_DOMAIN_RIM }
    }
}

impl BlackDomainRenderer {
    pub fn queue_black_domain(&self, loc: &Location, sink: &mut dyn PrimitiveSink) {
        let radius = loc.planet.radius * 1.5;
        let circles = sink.circles();
        circles.queue(CircleCmd::filled(loc.coords, radius, self.fill));
        circles.queue(CircleCmd::outline(loc.coords, radius, 2.0, self.rim));
    }
}
