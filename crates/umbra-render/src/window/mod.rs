//! winit host: owns the event loop and window, and delivers the renderer's
//! scheduled refreshes on `RedrawRequested`.

mod runtime;
mod scheduler;

pub use runtime::{App, AppControl, Runtime, RuntimeConfig};
pub use scheduler::WindowScheduler;
