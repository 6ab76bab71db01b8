use crate::coords::Vec2;
use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, LineCmd, PrimitiveSink, TextCmd};
use crate::scene::Voyage;
use crate::time::FrameContext;

/// Energy in flight: the route, the fleet dot and its payload.
#[derive(Debug, Clone)]
pub struct VoyageRenderer {
    pub color: Color,
    pub fleet_radius: f32,
    pub label_size: f32,
}

impl Default for VoyageRenderer {
    fn default() -> Self {
        Self { color: palette::VOYAGE, fleet_radius: 0.8, label_size: 12.0 }
    }
}

impl VoyageRenderer {
    /// Queues `voyage` as seen at the frame timestamp. Voyages that have not
    /// departed or have already landed queue nothing.
    pub fn queue_voyage(&self, voyage: &Voyage, frame: &FrameContext, sink: &mut dyn PrimitiveSink) -> bool {
        let Some(position) = voyage.position(frame.timestamp) else {
            return false;
        };
        let color = voyage.owner.map_or(self.color, |o| o.color);

        sink.lines().queue(LineCmd::new(voyage.from, voyage.to, 1.0, color.fade(0.4)));
        sink.circles().queue(CircleCmd::filled(position, self.fleet_radius, color));
        sink.texts().queue(
            TextCmd::new(format!("{:.0}", voyage.energy), position, self.label_size, palette::LABEL)
                .with_offset(Vec2::new(0.0, -self.label_size - 4.0))
                .centered(),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Batches;

    fn voyage() -> Voyage {
        Voyage {
            id: 3,
            from: Vec2::zero(),
            to: Vec2::new(10.0, 0.0),
            departure: 100.0,
            arrival: 110.0,
            energy: 42.4,
            owner: None,
        }
    }

    #[test]
    fn in_flight_voyage_uses_frame_timestamp() {
        let mut sink = Batches::default();
        assert!(VoyageRenderer::default().queue_voyage(&voyage(), &FrameContext::at(1, 105.0), &mut sink));
        assert_eq!(sink.circle.pending()[0].center, Vec2::new(5.0, 0.0));
        assert_eq!(sink.text.pending()[0].text, "42");
        assert_eq!(sink.line.len(), 1);
    }

    #[test]
    fn landed_voyage_queues_nothing() {
        let mut sink = Batches::default();
        assert!(!VoyageRenderer::default().queue_voyage(&voyage(), &FrameContext::at(1, 110.0), &mut sink));
        assert_eq!(sink.pending(), 0);
    }
}
