use super::{Chunk, Location};

/// Read-only view of the visible scene for one frame.
///
/// Borrowed from the state provider; never copied or kept across frames.
#[derive(Debug, Copy, Clone, Default)]
pub struct SceneSnapshot<'a> {
    pub locations: &'a [Location],
    pub chunks: &'a [Chunk],
}

impl<'a> SceneSnapshot<'a> {
    #[inline]
    pub fn new(locations: &'a [Location], chunks: &'a [Chunk]) -> Self {
        Self { locations, chunks }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.chunks.is_empty()
    }
}
