/// Z-ordering key for overlay items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Renderer-owned indicators (the miner).
    pub const INDICATORS: ZIndex = ZIndex(0);
    /// Default layer for plugin output, above every renderer-owned indicator.
    pub const PLUGINS: ZIndex = ZIndex(100);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
