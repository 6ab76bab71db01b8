//! Frame timing.
//!
//! One [`FrameClock`] per renderer. `tick()` is called exactly once at the top
//! of every loop iteration; the resulting [`FrameContext`] is handed to every
//! consumer of that frame so nothing re-samples the clock mid-frame.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameContext, FrameCounter};
