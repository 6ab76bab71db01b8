//! Fixed colours of the space map.

use super::Color;

pub const SPACE_CLEAR: Color = Color::opaque(0.0, 0.0, 0.0);

pub const NEBULA: Color = Color::opaque(0.05, 0.07, 0.22);
pub const SPACE: Color = Color::opaque(0.03, 0.03, 0.12);
pub const DEEP_SPACE: Color = Color::opaque(0.01, 0.01, 0.05);
pub const DEAD_SPACE: Color = Color::opaque(0.02, 0.08, 0.03);

pub const BORDER: Color = Color::opaque(0.6, 0.6, 0.6);
pub const SELECTION: Color = Color::opaque(1.0, 1.0, 1.0);
pub const HOVER: Color = Color::from_premul(0.7, 0.7, 0.7, 0.7);
pub const RANGE: Color = Color::from_premul(0.35, 0.35, 0.45, 0.5);
pub const POINTER_PATH: Color = Color::from_premul(0.8, 0.8, 0.8, 0.8);
pub const MINER: Color = Color::opaque(1.0, 0.35, 0.2);

pub const UNOWNED: Color = Color::opaque(0.55, 0.55, 0.6);
pub const VOYAGE: Color = Color::from_premul(0.6, 0.6, 0.6, 0.6);
pub const WORMHOLE: Color = Color::opaque(0.7, 0.25, 0.9);
pub const QUASAR: Color = Color::opaque(0.75, 0.85, 1.0);
pub const RIP: Color = Color::opaque(0.95, 0.3, 0.6);
pub const RUINS: Color = Color::opaque(0.7, 0.55, 0.35);
pub const ASTEROID: Color = Color::opaque(0.5, 0.45, 0.4);
pub const MINE: Color = Color::opaque(0.8, 0.8, 0.85);
pub const RING: Color = Color::from_premul(0.6, 0.6, 0.3, 0.6);
pub const BELT: Color = Color::from_premul(0.35, 0.3, 0.25, 0.5);
pub const BLACK_DOMAIN: Color = Color::opaque(0.0, 0.0, 0.0);
pub const BLACK_DOMAIN_RIM: Color = Color::opaque(0.3, 0.0, 0.0);
pub const LABEL: Color = Color::opaque(0.9, 0.9, 0.9);
