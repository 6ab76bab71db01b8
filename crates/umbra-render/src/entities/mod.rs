//! Entity renderers: translate one kind of domain object into primitive
//! queue calls.
//!
//! None of these flush. Apart from the background, which draws immediately,
//! they only push commands into the batchers they are handed.

mod asteroid;
mod background;
mod belt;
mod black_domain;
mod mine;
mod planet;
mod quasar;
mod ring;
mod ruins;
mod spacetime_rip;
mod voyage;
mod wormhole;

pub use asteroid::AsteroidRenderer;
pub use background::{BackgroundRenderer, ChunkQuad};
pub use belt::BeltRenderer;
pub use black_domain::BlackDomainRenderer;
pub use mine::MineRenderer;
pub use planet::PlanetRenderer;
pub use quasar::QuasarRenderer;
pub use ring::RingRenderer;
pub use ruins::RuinsRenderer;
pub use spacetime_rip::SpacetimeRipRenderer;
pub use voyage::VoyageRenderer;
pub use wormhole::WormholeRenderer;

use std::f32::consts::TAU;

/// Angle in `[0, TAU)` of something that turns once every `period` seconds.
///
/// Computed in `f64` so large Unix timestamps keep sub-frame precision.
pub(crate) fn turn_angle(timestamp: f64, period: f64) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    (timestamp / period).rem_euclid(1.0) as f32 * TAU
}

/// Deterministic `[0, 1)` value for the `n`-th detail of a seeded entity.
pub(crate) fn hash01(seed: u32, n: u32) -> f32 {
    let mut x = seed ^ n.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    (x >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_angle_wraps_each_period() {
        assert_eq!(turn_angle(0.0, 10.0), 0.0);
        assert!((turn_angle(2.5, 10.0) - TAU / 4.0).abs() < 1e-5);
        assert!((turn_angle(12.5, 10.0) - TAU / 4.0).abs() < 1e-5);
        assert_eq!(turn_angle(5.0, 0.0), 0.0);
    }

    #[test]
    fn hash01_is_stable_and_in_range() {
        for n in 0..64 {
            let v = hash01(1234, n);
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, hash01(1234, n));
        }
        assert_ne!(hash01(1, 0), hash01(2, 0));
    }
}
