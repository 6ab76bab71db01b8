use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Stable identifier of a map location.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocationId(pub u64);

/// What occupies a location. Each kind is drawn by a different entity renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PlanetKind {
    Planet,
    AsteroidField,
    Ruins,
    SpacetimeRip,
    Quasar,
}

/// Player that owns a planet or a voyage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Owner {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub kind: PlanetKind,
    /// 0..=9.
    pub level: u8,
    /// Body radius in world units.
    pub radius: f32,
    pub owner: Option<Owner>,
    pub energy: f32,
    pub energy_cap: f32,
    /// Number of purchased upgrades; one ring each.
    pub upgrades: u8,
    /// Artifacts parked on the planet; one sprite each.
    pub artifacts: u8,
    /// Destroyed planets are drawn as black domains and nothing else.
    pub destroyed: bool,
    /// Per-planet noise seed for procedural detail.
    pub seed: u32,
}

impl Planet {
    pub fn new(kind: PlanetKind, level: u8, radius: f32) -> Self {
        Self {
            kind,
            level: level.min(9),
            radius,
            owner: None,
            energy: 0.0,
            energy_cap: 0.0,
            upgrades: 0,
            artifacts: 0,
            destroyed: false,
            seed: 0,
        }
    }

    pub fn with_owner(mut self, color: Color) -> Self {
        self.owner = Some(Owner { color });
        self
    }

    pub fn with_energy(mut self, energy: f32, energy_cap: f32) -> Self {
        self.energy = energy;
        self.energy_cap = energy_cap;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Energy as a fraction of capacity, in `[0, 1]`.
    pub fn energy_fraction(&self) -> f32 {
        if self.energy_cap <= 0.0 {
            0.0
        } else {
            (self.energy / self.energy_cap).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    /// World position of the planet centre.
    pub coords: Vec2,
    pub planet: Planet,
}

/// Background biome of an explored chunk.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SpaceType {
    Nebula,
    Space,
    DeepSpace,
    DeadSpace,
}

/// Explored square of the map, drawn as background.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Chunk {
    /// Minimum (bottom-left) world corner.
    pub origin: Vec2,
    /// Side length in world units.
    pub side: f32,
    pub space: SpaceType,
}

impl Chunk {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, Vec2::new(self.side, self.side))
    }
}

/// Energy in flight between two planets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Voyage {
    pub id: u64,
    pub from: Vec2,
    pub to: Vec2,
    /// Unix seconds.
    pub departure: f64,
    /// Unix seconds.
    pub arrival: f64,
    pub energy: f32,
    pub owner: Option<Owner>,
}

impl Voyage {
    /// Fraction of the trip completed at `timestamp`, or `None` when the
    /// voyage has not departed yet or has already landed.
    pub fn progress(&self, timestamp: f64) -> Option<f32> {
        let span = self.arrival - self.departure;
        if span <= 0.0 || timestamp < self.departure || timestamp >= self.arrival {
            return None;
        }
        Some(((timestamp - self.departure) / span) as f32)
    }

    /// Current world position of the fleet at `timestamp`.
    pub fn position(&self, timestamp: f64) -> Option<Vec2> {
        self.progress(timestamp).map(|t| self.from.lerp(self.to, t))
    }
}

/// Link between two planets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Wormhole {
    pub from: Vec2,
    pub to: Vec2,
}

/// Highlighted planet: centre and body radius in world units.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Highlight {
    pub center: Vec2,
    pub radius: f32,
}

/// UI state read by the UI overlay manager each frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UiState {
    /// Radius of the playable world; drawn as the border. Zero hides it.
    pub world_radius: f32,
    pub selected: Option<Highlight>,
    /// Send range of the selected planet in world units.
    pub selected_range: Option<f32>,
    pub hovering: Option<Highlight>,
    /// Pointer position in world units.
    pub pointer: Option<Vec2>,
    /// Position of the explorer ("miner") in world units.
    pub miner: Option<Vec2>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voyage() -> Voyage {
        Voyage {
            id: 1,
            from: Vec2::new(0.0, 0.0),
            to: Vec2::new(100.0, 0.0),
            departure: 1_000.0,
            arrival: 1_010.0,
            energy: 50.0,
            owner: None,
        }
    }

    #[test]
    fn voyage_progress_is_linear_in_time() {
        let v = voyage();
        assert_eq!(v.progress(1_000.0), Some(0.0));
        assert_eq!(v.progress(1_005.0), Some(0.5));
        assert_eq!(v.position(1_005.0), Some(Vec2::new(50.0, 0.0)));
    }

    #[test]
    fn voyage_outside_its_window_is_not_in_flight() {
        let v = voyage();
        assert_eq!(v.progress(999.0), None);
        assert_eq!(v.progress(1_010.0), None);
    }

    #[test]
    fn energy_fraction_handles_zero_capacity() {
        let p = Planet::new(PlanetKind::Planet, 1, 2.0);
        assert_eq!(p.energy_fraction(), 0.0);
        assert_eq!(p.with_energy(30.0, 60.0).energy_fraction(), 0.5);
    }

    #[test]
    fn planet_level_is_capped() {
        assert_eq!(Planet::new(PlanetKind::Quasar, 42, 1.0).level, 9);
    }
}
