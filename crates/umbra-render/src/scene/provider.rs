use crate::coords::Camera;
use crate::overlay::OverlayCanvas;

use super::{SceneSnapshot, UiState, Voyage, Wormhole};

/// External owner of game and UI state.
///
/// The renderer calls these once per frame, in draw-phase order, and only
/// holds the returned borrows until the call that produced them is no longer
/// needed.
pub trait StateProvider {
    /// Camera for this frame; read before anything is cleared.
    fn camera(&self) -> Camera;

    /// Visible locations and explored chunks.
    fn locations_and_chunks(&self) -> SceneSnapshot<'_>;

    fn ui_state(&self) -> UiState {
        UiState::default()
    }

    fn voyages(&self) -> &[Voyage] {
        &[]
    }

    fn wormholes(&self) -> &[Wormhole] {
        &[]
    }

    /// Plugin subsystem, if one is loaded.
    fn plugin_manager(&mut self) -> Option<&mut dyn PluginManager> {
        None
    }
}

/// Plugin host. Plugins only ever see the overlay surface.
pub trait PluginManager {
    /// Called once per frame, after every batch has been flushed.
    fn draw_all_running_plugins(&mut self, canvas: &mut OverlayCanvas<'_>);
}
