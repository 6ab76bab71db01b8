//! Procedurally generated scene for the viewer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use umbra_render::coords::{Camera, Vec2};
use umbra_render::paint::Color;
use umbra_render::scene::{
    Chunk, Highlight, Location, LocationId, Planet, PlanetKind, PluginManager, SceneSnapshot,
    SpaceType, StateProvider, UiState, Voyage, Wormhole,
};

use crate::hud::Hud;
use crate::view::ViewControl;

const WORLD_RADIUS: f32 = 600.0;
const CHUNK_SIDE: f32 = 50.0;
const PLANETS: usize = 90;
const VOYAGES: usize = 14;
const WORMHOLES: usize = 3;

const PLAYERS: [Color; 3] = [
    Color::opaque(0.2, 0.8, 0.4),
    Color::opaque(0.9, 0.5, 0.1),
    Color::opaque(0.3, 0.5, 1.0),
];

pub struct DemoScene {
    view: Rc<RefCell<ViewControl>>,
    locations: Vec<Location>,
    chunks: Vec<Chunk>,
    voyages: Vec<Voyage>,
    wormholes: Vec<Wormhole>,
    miner: Vec2,
    hud: Hud,
}

impl DemoScene {
    pub fn generate(seed: u64, view: Rc<RefCell<ViewControl>>) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let locations = generate_locations(&mut rng);
        let chunks = generate_chunks(&mut rng);
        let voyages = generate_voyages(&mut rng, &locations, unix_now());
        let wormholes = (0..WORMHOLES)
            .map(|_| Wormhole {
                from: locations[rng.gen_range(0..locations.len())].coords,
                to: locations[rng.gen_range(0..locations.len())].coords,
            })
            .filter(|w| w.from != w.to)
            .collect();

        log::info!(
            "demo scene: {} locations, {} chunks, {} voyages",
            locations.len(),
            chunks.len(),
            voyages.len()
        );

        Self {
            view,
            locations,
            chunks,
            voyages,
            wormholes,
            miner: Vec2::new(120.0, -80.0),
            hud: Hud::default(),
        }
    }

    /// Location whose body contains `p`, with some slack for tiny planets.
    fn hit(&self, p: Vec2) -> Option<&Location> {
        self.locations
            .iter()
            .filter(|l| !l.planet.destroyed)
            .find(|l| l.coords.distance(p) <= l.planet.radius.max(4.0))
    }
}

impl StateProvider for DemoScene {
    fn camera(&self) -> Camera {
        self.view.borrow().camera()
    }

    fn locations_and_chunks(&self) -> SceneSnapshot<'_> {
        SceneSnapshot::new(&self.locations, &self.chunks)
    }

    fn ui_state(&self) -> UiState {
        let view = self.view.borrow();
        let pointer = view.pointer_world();
        let highlight = |l: &Location| Highlight { center: l.coords, radius: l.planet.radius };

        let selected = view.click().and_then(|p| self.hit(p));
        UiState {
            world_radius: WORLD_RADIUS,
            selected: selected.map(highlight),
            selected_range: selected.map(|l| 40.0 + 12.0 * f32::from(l.planet.level)),
            hovering: pointer.and_then(|p| self.hit(p)).map(highlight),
            pointer,
            miner: Some(self.miner),
        }
    }

    fn voyages(&self) -> &[Voyage] {
        &self.voyages
    }

    fn wormholes(&self) -> &[Wormhole] {
        &self.wormholes
    }

    fn plugin_manager(&mut self) -> Option<&mut dyn PluginManager> {
        Some(&mut self.hud)
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn random_point(rng: &mut StdRng, radius: f32) -> Vec2 {
    let r = radius * rng.r#gen::<f32>().sqrt();
    Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU)) * r
}

fn generate_locations(rng: &mut StdRng) -> Vec<Location> {
    (0..PLANETS)
        .map(|i| {
            let kind = match rng.gen_range(0..100) {
                0..=69 => PlanetKind::Planet,
                70..=81 => PlanetKind::AsteroidField,
                82..=89 => PlanetKind::Ruins,
                90..=95 => PlanetKind::SpacetimeRip,
                _ => PlanetKind::Quasar,
            };
            let level: u8 = rng.gen_range(0..=9);
            let mut planet = Planet::new(kind, level, 2.0 + 1.3 * f32::from(level))
                .with_seed(rng.r#gen())
                .with_energy(0.0, 100.0 * f32::from(level + 1));
            planet.energy = planet.energy_cap * rng.r#gen::<f32>();
            planet.upgrades = rng.gen_range(0..=3);
            planet.artifacts = if rng.gen_bool(0.15) { rng.gen_range(1..=2) } else { 0 };
            planet.destroyed = rng.gen_bool(0.03);
            if rng.gen_bool(0.25) {
                planet = planet.with_owner(PLAYERS[rng.gen_range(0..PLAYERS.len())]);
            }

            Location {
                id: LocationId(i as u64),
                coords: random_point(rng, WORLD_RADIUS - 20.0),
                planet,
            }
        })
        .collect()
}

fn generate_chunks(rng: &mut StdRng) -> Vec<Chunk> {
    let cells = (WORLD_RADIUS / CHUNK_SIDE).ceil() as i32;
    let mut chunks = Vec::new();
    for gy in -cells..cells {
        for gx in -cells..cells {
            let origin = Vec2::new(gx as f32 * CHUNK_SIDE, gy as f32 * CHUNK_SIDE);
            let center = origin + Vec2::new(CHUNK_SIDE * 0.5, CHUNK_SIDE * 0.5);
            let d = center.length() / WORLD_RADIUS;
            // Unexplored chunks are left out entirely.
            if d > 1.0 || rng.gen_bool(0.12) {
                continue;
            }
            let space = match d + rng.gen_range(-0.08..0.08) {
                x if x < 0.3 => SpaceType::Nebula,
                x if x < 0.65 => SpaceType::Space,
                x if x < 0.9 => SpaceType::DeepSpace,
                _ => SpaceType::DeadSpace,
            };
            chunks.push(Chunk { origin, side: CHUNK_SIDE, space });
        }
    }
    chunks
}

fn generate_voyages(rng: &mut StdRng, locations: &[Location], now: f64) -> Vec<Voyage> {
    let owned: Vec<&Location> = locations
        .iter()
        .filter(|l| l.planet.owner.is_some() && !l.planet.destroyed)
        .collect();
    if owned.is_empty() {
        return Vec::new();
    }

    (0..VOYAGES as u64)
        .map(|id| {
            let from = owned[rng.gen_range(0..owned.len())];
            let to = &locations[rng.gen_range(0..locations.len())];
            let departure = now - rng.gen_range(0.0..30.0);
            Voyage {
                id,
                from: from.coords,
                to: to.coords,
                departure,
                arrival: departure + rng.gen_range(45.0..240.0),
                energy: rng.gen_range(10.0..500.0),
                owner: from.planet.owner,
            }
        })
        .filter(|v| v.from != v.to)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> DemoScene {
        DemoScene::generate(7, Rc::new(RefCell::new(ViewControl::default())))
    }

    #[test]
    fn generation_is_deterministic() {
        let a = scene();
        let b = scene();
        assert_eq!(a.locations, b.locations);
        assert_eq!(a.chunks, b.chunks);
    }

    #[test]
    fn everything_stays_inside_the_world() {
        let s = scene();
        assert_eq!(s.locations.len(), PLANETS);
        assert!(s.locations.iter().all(|l| l.coords.length() <= WORLD_RADIUS));
        assert!(s.chunks.iter().all(|c| c.side == CHUNK_SIDE));
    }

    #[test]
    fn clicking_a_planet_selects_it() {
        let s = scene();
        let target = s.locations.iter().find(|l| !l.planet.destroyed).map(|l| l.coords);
        s.view.borrow_mut().select_at(target);
        let ui = s.ui_state();
        assert!(ui.selected.is_some());
        assert_eq!(ui.world_radius, WORLD_RADIUS);
    }
}
