//! wgpu backend: device and surface ownership plus the [`WgpuContext`]
//! graphics context that draws batches and composites the overlay.

mod context;
mod device;
mod init;
mod instances;
mod pipeline;
mod surface;

pub use context::WgpuContext;
pub use device::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
