use std::fmt;

use crate::primitives::{BatchKind, FLUSH_ORDER};

/// What one draw phase did.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub chunks: usize,
    pub locations: usize,
    pub voyages: usize,
    pub wormholes: usize,
    /// Commands submitted per layer, indexed by [`BatchKind::layer`].
    pub flushed: [usize; FLUSH_ORDER.len()],
    pub overlay_items: usize,
    pub plugin_ran: bool,
}

impl FrameStats {
    #[inline]
    pub fn flushed(&self, kind: BatchKind) -> usize {
        self.flushed[kind.layer()]
    }

    pub fn total_flushed(&self) -> usize {
        self.flushed.iter().sum()
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {}: {} chunk(s), {} location(s), {} voyage(s), {} wormhole(s); flushed",
            self.frame, self.chunks, self.locations, self.voyages, self.wormholes
        )?;
        for kind in FLUSH_ORDER {
            write!(f, " {kind}={}", self.flushed(kind))?;
        }
        write!(
            f,
            "; overlay {} item(s), plugins {}",
            self.overlay_items,
            if self.plugin_ran { "ran" } else { "absent" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_layers_in_flush_order() {
        let mut stats = FrameStats { frame: 240, ..FrameStats::default() };
        stats.flushed[BatchKind::Planet.layer()] = 7;
        let line = stats.to_string();
        assert!(line.starts_with("frame 240:"));
        assert!(line.contains("line=0 planet=7 circle=0 rect=0 text=0 sprite=0"));
        assert!(line.ends_with("plugins absent"));
        assert_eq!(stats.total_flushed(), 7);
    }
}
