//! Coordinate and geometry types shared by the orchestrator, entity renderers
//! and backends.
//!
//! Two spaces are in play:
//! - world units: game coordinates, origin at the world centre, +Y up
//! - screen pixels: logical pixels, origin top-left, +Y down
//!
//! [`Camera`] converts between them and produces the projection matrix that
//! the graphics context uploads at the start of every frame.

mod camera;
mod rect;
mod vec2;
mod viewport;

pub use camera::Camera;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
