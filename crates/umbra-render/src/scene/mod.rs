//! Scene data consumed by the renderer.
//!
//! Everything here is owned by the external game/UI state. The renderer only
//! borrows it for the duration of a frame through [`StateProvider`].

mod entities;
mod provider;
mod snapshot;
mod state;

pub use entities::{
    Chunk, Highlight, Location, LocationId, Owner, Planet, PlanetKind, SpaceType, UiState, Voyage,
    Wormhole,
};
pub use provider::{PluginManager, StateProvider};
pub use snapshot::SceneSnapshot;
pub use state::SceneState;
