//! Render managers: group entity renderers and decide what to queue each frame.
//!
//! Managers receive the shared batchers as a [`PrimitiveSink`] per call and
//! never flush them. The planet manager owns the planet batch and exposes a
//! `flush` passthrough that only the orchestrator calls, at the planet slot
//! of [`FLUSH_ORDER`].
//!
//! [`PrimitiveSink`]: crate::primitives::PrimitiveSink
//! [`FLUSH_ORDER`]: crate::primitives::FLUSH_ORDER

mod planet;
mod ui;
mod voyage;
mod wormhole;

pub use planet::PlanetRenderManager;
pub use ui::UiRenderManager;
pub use voyage::VoyageRenderManager;
pub use wormhole::WormholeRenderManager;
