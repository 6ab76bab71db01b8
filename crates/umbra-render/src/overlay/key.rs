use super::ZIndex;

/// Paint position of one overlay item.
///
/// Items compare by layer first and by submission sequence within a layer,
/// so a plugin drawing at [`ZIndex::PLUGINS`] always lands above the miner
/// indicator regardless of when either was recorded. Field order drives the
/// derived ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    /// Submission sequence within the frame's overlay.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_beats_submission_sequence() {
        let plugin_first = SortKey::new(ZIndex::PLUGINS, 0);
        let miner_later = SortKey::new(ZIndex::INDICATORS, 7);
        assert!(miner_later < plugin_first);
        assert!(SortKey::new(ZIndex::INDICATORS, 1) < SortKey::new(ZIndex::INDICATORS, 2));
    }
}
