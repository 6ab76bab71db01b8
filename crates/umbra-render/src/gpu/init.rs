/// Knobs for [`Gpu::new`](super::Gpu::new), fixed for the lifetime of the window.
///
/// Defaults target the map renderer: an sRGB swapchain so palette colours
/// match the recording backend, and FIFO presentation so one redraw request
/// maps to one displayed frame.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub prefer_srgb: bool,
    /// FIFO paces `refresh` to the display.
    pub present_mode: wgpu::PresentMode,
    /// Falls back to the first supported mode when unset or unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,
    /// Frames the surface may queue ahead of the one being recorded.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Uncapped presentation for profiling the draw phase.
    pub fn unthrottled() -> Self {
        Self { present_mode: wgpu::PresentMode::AutoNoVsync, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unthrottled_only_changes_pacing() {
        let init = GpuInit::unthrottled();
        assert_eq!(init.present_mode, wgpu::PresentMode::AutoNoVsync);
        assert!(init.prefer_srgb);
        assert_eq!(init.desired_maximum_frame_latency, GpuInit::default().desired_maximum_frame_latency);
    }
}
