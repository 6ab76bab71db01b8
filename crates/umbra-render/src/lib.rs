//! Umbra render crate.
//!
//! A per-frame 2D render orchestrator for a space-exploration game view:
//! entity renderers queue primitives into shared batchers, the
//! [`renderer::Renderer`] flushes them in a fixed layer order through a
//! [`context::GraphicsContext`], and screen-space UI and plugin output is
//! composited on top through the [`overlay`].

pub mod context;
pub mod coords;
pub mod entities;
pub mod error;
pub mod gpu;
pub mod logging;
pub mod managers;
pub mod overlay;
pub mod paint;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod time;
pub mod window;

pub use error::RenderError;
