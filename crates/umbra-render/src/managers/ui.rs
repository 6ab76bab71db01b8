use crate::coords::{Camera, Rect, Vec2};
use crate::overlay::{Overlay, ZIndex};
use crate::paint::{Color, palette};
use crate::primitives::{CircleCmd, LineCmd, PrimitiveSink, RectCmd};
use crate::scene::UiState;

/// Selection, hover and pointer indicators.
#[derive(Debug, Clone)]
pub struct UiRenderManager {
    pub miner_color: Color,
    /// Miner marker radius in screen pixels.
    pub miner_radius: f32,
}

impl Default for UiRenderManager {
    fn default() -> Self {
        Self { miner_color: palette::MINER, miner_radius: 7.0 }
    }
}

impl UiRenderManager {
    pub fn new(miner_color: Color) -> Self {
        Self { miner_color, ..Self::default() }
    }

    /// Queues every batched UI element, in draw-phase order.
    pub fn queue_all(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        self.queue_border(ui, sink);
        self.queue_selection_range(ui, sink);
        self.queue_selection_rect(ui, sink);
        self.queue_hover_rect(ui, sink);
        self.queue_pointer_path(ui, sink);
    }

    /// Edge of the playable world.
    pub fn queue_border(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        if ui.world_radius > 0.0 {
            sink.circles().queue(CircleCmd::outline(Vec2::zero(), ui.world_radius, 2.0, palette::BORDER));
        }
    }

    pub fn queue_selection_range(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        if let (Some(selected), Some(range)) = (ui.selected, ui.selected_range) {
            sink.circles().queue(CircleCmd::outline(selected.center, range, 1.0, palette::RANGE));
        }
    }

    pub fn queue_selection_rect(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        if let Some(selected) = ui.selected {
            let rect = Rect::from_center(selected.center, selected.radius * 1.3);
            sink.rects().queue(RectCmd::outline(rect, 1.0, palette::SELECTION));
        }
    }

    pub fn queue_hover_rect(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        if let Some(hovering) = ui.hovering {
            let rect = Rect::from_center(hovering.center, hovering.radius * 1.3);
            sink.rects().queue(RectCmd::outline(rect, 1.0, palette::HOVER));
        }
    }

    /// Line from the selected planet to the pointer.
    pub fn queue_pointer_path(&self, ui: &UiState, sink: &mut dyn PrimitiveSink) {
        if let (Some(selected), Some(pointer)) = (ui.selected, ui.pointer) {
            sink.lines().queue(LineCmd::new(selected.center, pointer, 1.0, palette::POINTER_PATH));
        }
    }

    /// Draws the miner straight onto the overlay so it sits above every batch.
    pub fn draw_miner(&self, ui: &UiState, camera: &Camera, overlay: &mut Overlay) -> bool {
        let Some(miner) = ui.miner else {
            return false;
        };
        let p = camera.world_to_screen(miner);
        let r = self.miner_radius;
        let mut canvas = overlay.canvas(ZIndex::INDICATORS);
        canvas.stroke_circle(p, r, 2.0, self.miner_color);
        canvas.line(p - Vec2::new(r * 1.6, 0.0), p - Vec2::new(r * 0.6, 0.0), 1.5, self.miner_color);
        canvas.line(p + Vec2::new(r * 0.6, 0.0), p + Vec2::new(r * 1.6, 0.0), 1.5, self.miner_color);
        canvas.line(p - Vec2::new(0.0, r * 1.6), p - Vec2::new(0.0, r * 0.6), 1.5, self.miner_color);
        canvas.line(p + Vec2::new(0.0, r * 0.6), p + Vec2::new(0.0, r * 1.6), 1.5, self.miner_color);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Viewport;
    use crate::overlay::OverlayCmd;
    use crate::primitives::Batches;
    use crate::scene::Highlight;

    fn busy_ui() -> UiState {
        UiState {
            world_radius: 500.0,
            selected: Some(Highlight { center: Vec2::new(1.0, 1.0), radius: 2.0 }),
            selected_range: Some(40.0),
            hovering: Some(Highlight { center: Vec2::new(9.0, 9.0), radius: 1.0 }),
            pointer: Some(Vec2::new(20.0, 0.0)),
            miner: Some(Vec2::zero()),
        }
    }

    #[test]
    fn idle_ui_queues_nothing() {
        let mut sink = Batches::default();
        UiRenderManager::default().queue_all(&UiState::default(), &mut sink);
        assert_eq!(sink.pending(), 0);
    }

    #[test]
    fn busy_ui_queues_into_matching_batches() {
        let mut sink = Batches::default();
        UiRenderManager::default().queue_all(&busy_ui(), &mut sink);
        assert_eq!(sink.circle.len(), 2);
        assert_eq!(sink.rect.len(), 2);
        assert_eq!(sink.line.len(), 1);
        assert_eq!(sink.rect.pending()[0].color, palette::SELECTION);
    }

    #[test]
    fn miner_goes_to_the_overlay_in_screen_space() {
        let mut overlay = Overlay::new(Viewport::new(200.0, 100.0));
        let camera = Camera::new(Vec2::zero(), 1.0, Viewport::new(200.0, 100.0));
        assert!(UiRenderManager::default().draw_miner(&busy_ui(), &camera, &mut overlay));

        let first = &overlay.list().items()[0];
        assert_eq!(first.key.z, ZIndex::INDICATORS);
        match &first.cmd {
            OverlayCmd::Circle(c) => assert_eq!(c.center, Vec2::new(100.0, 50.0)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(!UiRenderManager::default().draw_miner(&UiState::default(), &camera, &mut overlay));
    }
}
