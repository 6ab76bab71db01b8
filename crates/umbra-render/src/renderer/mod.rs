//! Frame orchestrator.
//!
//! [`Renderer`] owns every sub-renderer and runs the draw phase. The
//! process-wide lifecycle (`initialize`, `destroy`, `refresh`) lives in the
//! registry; hosts drive it through a [`Scheduler`].
//!
//! Draw phase, in order:
//! 1. projection upload
//! 2. overlay clear, then primary clear
//! 3. scene snapshot
//! 4. background (immediate)
//! 5. UI queues, then the miner straight onto the overlay
//! 6. voyages
//! 7. wormholes
//! 8. planets
//! 9. flush every batch in [`FLUSH_ORDER`]
//! 10. plugin hook on the overlay
//! 11. present

mod config;
mod registry;
mod scheduler;
mod stats;

pub use config::{RendererConfig, Surfaces};
pub use registry::{
    RendererHandle, debug, destroy, frame_count, initialize, initialize_with_config, instance,
    is_active, refresh,
};
pub use scheduler::{FrameRequest, ManualScheduler, Scheduler};
pub use stats::FrameStats;

use crate::context::{ContextManager, GraphicsContext};
use crate::entities::BackgroundRenderer;
use crate::error::RenderError;
use crate::managers::{
    PlanetRenderManager, UiRenderManager, VoyageRenderManager, WormholeRenderManager,
};
use crate::overlay::{Overlay, ZIndex};
use crate::primitives::{BatchKind, Batches, FLUSH_ORDER};
use crate::scene::StateProvider;
use crate::time::{FrameClock, FrameContext, FrameCounter};

pub struct Renderer<G> {
    config: RendererConfig,

    context: ContextManager<G>,
    overlay: Overlay,

    batches: Batches,

    background: BackgroundRenderer,
    ui: UiRenderManager,
    voyages: VoyageRenderManager,
    wormholes: WormholeRenderManager,
    planets: PlanetRenderManager,

    state: Box<dyn StateProvider>,
    clock: FrameClock,
    scheduler: Box<dyn Scheduler>,
    pending: Option<FrameRequest>,
    last_stats: FrameStats,
}

impl<G: GraphicsContext> Renderer<G> {
    /// Builds the orchestrator without installing or starting it.
    ///
    /// Construction order: context manager and overlay, then the shared
    /// batchers, then the entity renderers and managers that queue into them.
    pub fn new(
        surfaces: Surfaces<G>,
        state: Box<dyn StateProvider>,
        scheduler: Box<dyn Scheduler>,
        config: RendererConfig,
    ) -> Self {
        let context = ContextManager::new(surfaces.primary, config.clear_color);
        let overlay = Overlay::new(surfaces.overlay);
        let batches = Batches::new(surfaces.glyphs);

        Self {
            config,
            context,
            overlay,
            batches,
            background: BackgroundRenderer::new(),
            ui: UiRenderManager::new(config.miner_color),
            voyages: VoyageRenderManager::default(),
            wormholes: WormholeRenderManager::default(),
            planets: PlanetRenderManager::new(config.label_min_screen_radius),
            state,
            clock: FrameClock::new(),
            scheduler,
            pending: None,
            last_stats: FrameStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    #[inline]
    pub fn frame_counter(&self) -> FrameCounter {
        self.clock.counter()
    }

    /// True on frames where `frame_count % interval == 0`. Always false for
    /// `interval == 0`.
    #[inline]
    pub fn debug(&self, interval: u64) -> bool {
        is_debug_frame(self.frame_count(), interval)
    }

    #[inline]
    pub fn last_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    #[inline]
    pub fn context(&self) -> &ContextManager<G> {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut ContextManager<G> {
        &mut self.context
    }

    #[inline]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[inline]
    pub fn state(&self) -> &dyn StateProvider {
        self.state.as_ref()
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut dyn StateProvider {
        self.state.as_mut()
    }

    /// Commands queued but not yet flushed, across all batches.
    pub fn pending_commands(&self) -> usize {
        self.batches.pending() + self.planets.pending().len()
    }

    #[inline]
    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Asks the host for the next refresh unless one is already pending.
    pub(crate) fn schedule(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }

    /// Claims `request` if it is the one this renderer is waiting for.
    pub(crate) fn accept(&mut self, request: FrameRequest) -> bool {
        if self.pending == Some(request) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// One loop iteration without rescheduling: tick the clock once, then
    /// run the draw phase with that frame's context.
    pub fn step(&mut self) -> Result<FrameStats, RenderError> {
        let frame = self.clock.tick();
        self.draw_frame(&frame)
    }

    /// Runs the draw phase for `frame`.
    ///
    /// On failure every pending batch is dropped so nothing leaks into the
    /// next frame.
    pub fn draw_frame(&mut self, frame: &FrameContext) -> Result<FrameStats, RenderError> {
        match self.draw_phase(frame) {
            Ok(stats) => {
                if self.debug(self.config.debug_interval) {
                    log::debug!("{stats}");
                }
                self.last_stats = stats;
                Ok(stats)
            }
            Err(e) => {
                let dropped = self.batches.discard() + self.planets.discard();
                if dropped > 0 {
                    log::warn!("dropped {dropped} queued command(s) of faulted frame {}", frame.frame);
                }
                Err(e)
            }
        }
    }

    fn draw_phase(&mut self, frame: &FrameContext) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats { frame: frame.frame, ..FrameStats::default() };

        self.context.set_projection(self.state.camera())?;
        let camera = self.context.camera();

        self.overlay.clear(self.context.viewport());
        self.context.clear()?;

        let scene = self.state.locations_and_chunks();
        stats.locations = scene.locations.len();

        stats.chunks = self.background.draw_chunks(scene.chunks, &mut self.context)?;

        let ui = self.state.ui_state();
        self.ui.queue_all(&ui, &mut self.batches);
        self.ui.draw_miner(&ui, &camera, &mut self.overlay);

        stats.voyages = self.voyages.queue_voyages(self.state.voyages(), frame, &mut self.batches);
        stats.wormholes = self.wormholes.queue_wormholes(self.state.wormholes(), &camera, &mut self.batches);

        self.planets.queue_planets(&scene, frame, &camera, &mut self.batches);

        for kind in FLUSH_ORDER {
            stats.flushed[kind.layer()] = self.flush(kind)?;
        }

        if let Some(plugins) = self.state.plugin_manager() {
            let mut canvas = self.overlay.canvas(ZIndex::PLUGINS);
            plugins.draw_all_running_plugins(&mut canvas);
            stats.plugin_ran = true;
        }
        stats.overlay_items = self.overlay.len();

        self.context.present(self.overlay.list_mut(), self.batches.glyphs_mut())?;
        Ok(stats)
    }

    fn flush(&mut self, kind: BatchKind) -> Result<usize, RenderError> {
        let ctx = &mut self.context;
        match kind {
            BatchKind::Line => self.batches.line.flush(ctx),
            BatchKind::Planet => self.planets.flush(ctx),
            BatchKind::Circle => self.batches.circle.flush(ctx),
            BatchKind::Rect => self.batches.rect.flush(ctx),
            BatchKind::Text => self.batches.text.flush(ctx),
            BatchKind::Sprite => self.batches.sprite.flush(ctx),
        }
    }
}

#[inline]
pub(crate) fn is_debug_frame(frame_count: u64, interval: u64) -> bool {
    interval != 0 && frame_count % interval == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextEvent, RecordingContext};
    use crate::coords::{Camera, Rect, Vec2, Viewport};
    use crate::overlay::{OverlayCanvas, OverlayCmd};
    use crate::paint::palette;
    use crate::scene::{
        Chunk, Highlight, Location, LocationId, Planet, PlanetKind, PluginManager, SceneState,
        SpaceType, UiState, Voyage, Wormhole,
    };

    struct Hud;

    impl PluginManager for Hud {
        fn draw_all_running_plugins(&mut self, canvas: &mut OverlayCanvas<'_>) {
            canvas.fill_rect(Rect::new(4.0, 4.0, 40.0, 12.0), palette::LABEL);
        }
    }

    fn camera() -> Camera {
        Camera::new(Vec2::zero(), 4.0, Viewport::new(800.0, 600.0))
    }

    fn renderer(state: SceneState) -> Renderer<RecordingContext> {
        let surfaces = Surfaces::new(RecordingContext::new(Viewport::new(800.0, 600.0)));
        Renderer::new(surfaces, Box::new(state), Box::new(ManualScheduler::new()), RendererConfig::default())
    }

    /// A scene that puts something into every batch.
    fn busy_scene() -> SceneState {
        let mut planet = Planet::new(PlanetKind::Planet, 2, 3.0).with_owner(palette::MINER);
        planet.artifacts = 1;

        let mut state = SceneState::new(camera());
        state.chunks.push(Chunk { origin: Vec2::new(-16.0, -16.0), side: 32.0, space: SpaceType::Space });
        state.locations.push(Location { id: LocationId(1), coords: Vec2::new(10.0, 5.0), planet });
        state.ui = UiState {
            world_radius: 60.0,
            selected: Some(Highlight { center: Vec2::new(10.0, 5.0), radius: 3.0 }),
            pointer: Some(Vec2::new(-20.0, 0.0)),
            miner: Some(Vec2::new(0.0, 0.0)),
            ..UiState::default()
        };
        state.voyages.push(Voyage {
            id: 9,
            from: Vec2::new(10.0, 5.0),
            to: Vec2::new(-30.0, 5.0),
            departure: 0.0,
            arrival: 100.0,
            energy: 12.0,
            owner: None,
        });
        state.wormholes.push(Wormhole { from: Vec2::new(-5.0, -5.0), to: Vec2::new(5.0, -5.0) });
        state
    }

    #[test]
    fn layers_follow_flush_order_not_queue_order() {
        let mut r = renderer(busy_scene());
        let stats = r.draw_frame(&FrameContext::at(1, 50.0)).unwrap();

        assert_eq!(
            r.context().context().draw_order(),
            vec![
                None,
                Some(BatchKind::Line),
                Some(BatchKind::Planet),
                Some(BatchKind::Circle),
                Some(BatchKind::Rect),
                Some(BatchKind::Text),
                Some(BatchKind::Sprite),
            ]
        );
        assert_eq!(stats.chunks, 1);
        assert_eq!(stats.voyages, 1);
        assert_eq!(stats.wormholes, 1);
        assert!(FLUSH_ORDER.iter().all(|&k| stats.flushed(k) > 0));
    }

    #[test]
    fn frame_opens_with_projection_and_clear_and_ends_with_present() {
        let mut r = renderer(busy_scene());
        r.draw_frame(&FrameContext::at(1, 50.0)).unwrap();

        let events = r.context().context().events();
        assert!(matches!(events[0], ContextEvent::SetProjection(c) if c.scale == 4.0));
        assert_eq!(events[1], ContextEvent::Clear(palette::SPACE_CLEAR));
        assert!(matches!(events.last(), Some(ContextEvent::Present { .. })));
    }

    #[test]
    fn no_commands_survive_a_frame() {
        let mut r = renderer(busy_scene());
        r.draw_frame(&FrameContext::at(1, 50.0)).unwrap();
        assert_eq!(r.pending_commands(), 0);
    }

    #[test]
    fn plugin_output_is_composited_above_the_miner() {
        let mut r = renderer(busy_scene().with_plugins(Box::new(Hud)));
        let stats = r.draw_frame(&FrameContext::at(1, 50.0)).unwrap();
        assert!(stats.plugin_ran);

        let overlay = r.context().context().last_overlay().unwrap();
        assert!(overlay.len() > 1);
        let last = overlay.last().unwrap();
        assert_eq!(last.key.z, ZIndex::PLUGINS);
        assert!(matches!(last.cmd, OverlayCmd::Rect(_)));
        assert!(overlay[..overlay.len() - 1].iter().all(|i| i.key.z == ZIndex::INDICATORS));
        assert_eq!(stats.overlay_items, overlay.len());
    }

    #[test]
    fn empty_scene_without_plugins_runs_clean() {
        let mut r = renderer(SceneState::new(camera()));
        let stats = r.draw_frame(&FrameContext::at(1, 0.0)).unwrap();

        let rec = r.context().context();
        assert!(rec.draw_order().is_empty());
        assert_eq!(rec.presents(), 1);
        assert_eq!(rec.last_overlay(), Some(&[][..]));
        assert_eq!(stats.total_flushed(), 0);
        assert!(!stats.plugin_ran);
        assert_eq!(r.pending_commands(), 0);
    }

    #[test]
    fn faulted_frame_drops_its_queues() {
        let mut r = renderer(busy_scene());
        r.context_mut().context_mut().fail_next_draw(BatchKind::Circle);
        assert!(matches!(r.draw_frame(&FrameContext::at(1, 50.0)), Err(RenderError::Backend(_))));
        assert_eq!(r.pending_commands(), 0);

        // Next frame redraws from scratch.
        r.context_mut().context_mut().clear_events();
        r.draw_frame(&FrameContext::at(2, 51.0)).unwrap();
        assert_eq!(r.context().context().draw_order().len(), 7);
    }

    #[test]
    fn voyages_use_the_frame_timestamp() {
        let mut r = renderer(busy_scene());
        r.draw_frame(&FrameContext::at(1, 25.0)).unwrap();
        let fleet = r.context().context().circles().iter().find(|c| c.radius == 0.8).copied();
        assert_eq!(fleet.map(|c| c.center), Some(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn debug_helper_matches_frame_multiples() {
        assert!(is_debug_frame(0, 120));
        assert!(is_debug_frame(240, 120));
        assert!(!is_debug_frame(119, 120));
        assert!(!is_debug_frame(5, 0));

        let mut r = renderer(SceneState::new(camera()));
        assert!(r.debug(120));
        r.step().unwrap();
        assert!(!r.debug(120));
        assert!(r.debug(1));
    }
}
