use crate::coords::Camera;

use super::{
    Chunk, Location, PluginManager, SceneSnapshot, StateProvider, UiState, Voyage, Wormhole,
};

/// Plain owned scene that implements [`StateProvider`].
///
/// Suitable for tools, tests and demos that build the whole scene up front.
#[derive(Default)]
pub struct SceneState {
    pub camera: Camera,
    pub locations: Vec<Location>,
    pub chunks: Vec<Chunk>,
    pub ui: UiState,
    pub voyages: Vec<Voyage>,
    pub wormholes: Vec<Wormhole>,
    pub plugins: Option<Box<dyn PluginManager>>,
}

impl SceneState {
    pub fn new(camera: Camera) -> Self {
        Self { camera, ..Self::default() }
    }

    pub fn with_plugins(mut self, plugins: Box<dyn PluginManager>) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

impl StateProvider for SceneState {
    fn camera(&self) -> Camera {
        self.camera
    }

    fn locations_and_chunks(&self) -> SceneSnapshot<'_> {
        SceneSnapshot::new(&self.locations, &self.chunks)
    }

    fn ui_state(&self) -> UiState {
        self.ui
    }

    fn voyages(&self) -> &[Voyage] {
        &self.voyages
    }

    fn wormholes(&self) -> &[Wormhole] {
        &self.wormholes
    }

    fn plugin_manager(&mut self) -> Option<&mut dyn PluginManager> {
        match self.plugins.as_mut() {
            Some(plugins) => Some(plugins.as_mut()),
            None => None,
        }
    }
}
