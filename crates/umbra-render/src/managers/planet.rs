use crate::context::{ContextManager, GraphicsContext};
use crate::coords::{Camera, Vec2};
use crate::entities::{
    AsteroidRenderer, BeltRenderer, BlackDomainRenderer, MineRenderer, PlanetRenderer,
    QuasarRenderer, RingRenderer, RuinsRenderer, SpacetimeRipRenderer,
};
use crate::error::RenderError;
use crate::paint::palette;
use crate::primitives::{Batcher, PlanetCmd, PrimitiveSink, SpriteCmd, SpriteId, TextCmd};
use crate::scene::{Location, PlanetKind, SceneSnapshot};
use crate::time::FrameContext;

/// Sprite sheet cell used for artifacts parked on a planet.
pub const ARTIFACT_SPRITE: SpriteId = SpriteId(0);

/// Everything drawn at a location.
///
/// Planet bodies go into the manager's own batch; moons, belts, rings and the
/// other location kinds go into the shared batchers.
#[derive(Debug)]
pub struct PlanetRenderManager {
    batch: Batcher<PlanetCmd>,

    planet: PlanetRenderer,
    asteroid: AsteroidRenderer,
    belt: BeltRenderer,
    mine: MineRenderer,
    quasar: QuasarRenderer,
    rip: SpacetimeRipRenderer,
    ruins: RuinsRenderer,
    ring: RingRenderer,
    black_domain: BlackDomainRenderer,

    label_min_screen_radius: f32,
    label_size: f32,
    artifact_size: f32,
}

impl PlanetRenderManager {
    pub fn new(label_min_screen_radius: f32) -> Self {
        Self {
            batch: Batcher::new(),
            planet: PlanetRenderer::default(),
            asteroid: AsteroidRenderer::default(),
            belt: BeltRenderer::default(),
            mine: MineRenderer::default(),
            quasar: QuasarRenderer::default(),
            rip: SpacetimeRipRenderer::default(),
            ruins: RuinsRenderer::default(),
            ring: RingRenderer::default(),
            black_domain: BlackDomainRenderer::default(),
            label_min_screen_radius,
            label_size: 12.0,
            artifact_size: 14.0,
        }
    }

    /// Pending planet bodies.
    #[inline]
    pub fn pending(&self) -> &[PlanetCmd] {
        self.batch.pending()
    }

    /// Queues every visible location of the snapshot. Returns how many
    /// locations were queued.
    pub fn queue_planets(
        &mut self,
        scene: &SceneSnapshot<'_>,
        frame: &FrameContext,
        camera: &Camera,
        sink: &mut dyn PrimitiveSink,
    ) -> usize {
        let mut queued = 0;
        for loc in scene.locations {
            // Belts and moons reach well past the body.
            if !camera.is_visible(loc.coords, loc.planet.radius * 3.0) {
                continue;
            }
            self.queue_location(loc, frame, camera, sink);
            queued += 1;
        }
        queued
    }

    fn queue_location(&mut self, loc: &Location, frame: &FrameContext, camera: &Camera, sink: &mut dyn PrimitiveSink) {
        let planet = &loc.planet;
        if planet.destroyed {
            self.black_domain.queue_black_domain(loc, sink);
            return;
        }

        match planet.kind {
            PlanetKind::Planet => {
                self.planet.queue_planet(loc, frame, &mut self.batch);
                self.belt.queue_belt(loc, sink);
                self.asteroid.queue_asteroids(loc, frame, sink);
            }
            PlanetKind::AsteroidField => {
                self.mine.queue_mine(loc, sink);
            }
            PlanetKind::Ruins => {
                self.ruins.queue_ruins(loc, sink);
            }
            PlanetKind::SpacetimeRip => self.rip.queue_rip(loc, frame, sink),
            PlanetKind::Quasar => self.quasar.queue_quasar(loc, frame, sink),
        }
        self.ring.queue_rings(loc, sink);
        self.queue_artifacts(loc, camera, sink);
        self.queue_label(loc, camera, sink);
    }

    fn queue_artifacts(&self, loc: &Location, camera: &Camera, sink: &mut dyn PrimitiveSink) {
        let count = loc.planet.artifacts;
        if count == 0 {
            return;
        }
        let step = camera.pixels_to_world(self.artifact_size + 2.0);
        let above = loc.planet.radius + camera.pixels_to_world(self.artifact_size);
        let first = -step * f32::from(count - 1) * 0.5;
        for i in 0..count {
            let center = loc.coords + Vec2::new(first + step * f32::from(i), above);
            sink.sprites().queue(SpriteCmd::new(ARTIFACT_SPRITE, center, self.artifact_size, palette::LABEL));
        }
    }

    fn queue_label(&self, loc: &Location, camera: &Camera, sink: &mut dyn PrimitiveSink) {
        let screen_radius = camera.world_to_screen_distance(loc.planet.radius);
        if screen_radius <= self.label_min_screen_radius {
            return;
        }
        let text = match loc.planet.owner {
            Some(_) => format!("L{} {:.0}", loc.planet.level, loc.planet.energy),
            None => format!("L{}", loc.planet.level),
        };
        sink.texts().queue(
            TextCmd::new(text, loc.coords, self.label_size, palette::LABEL)
                .with_offset(Vec2::new(0.0, screen_radius + 4.0))
                .centered(),
        );
    }

    /// Submits the planet batch. Called only by the orchestrator, at the
    /// planet slot of the flush order.
    pub fn flush<G: GraphicsContext>(&mut self, ctx: &mut ContextManager<G>) -> Result<usize, RenderError> {
        self.batch.flush(ctx)
    }

    pub fn discard(&mut self) -> usize {
        self.batch.discard()
    }
}

impl Default for PlanetRenderManager {
    fn default() -> Self {
        Self::new(8.0)
    }
}
