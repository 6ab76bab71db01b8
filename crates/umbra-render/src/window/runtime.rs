use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::gpu::{Gpu, GpuInit, WgpuContext};
use crate::renderer;

use super::scheduler::{RedrawSlot, WindowScheduler};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "umbra".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application hooks driven by [`Runtime`].
pub trait App: 'static {
    /// Called once the window and GPU exist. Expected to install a renderer
    /// with [`renderer::initialize`], which schedules the first frame.
    fn start(&mut self, context: WgpuContext, scheduler: WindowScheduler) -> Result<()>;

    /// Sees every window event before the runtime does.
    fn on_window_event(&mut self, _event: &WindowEvent) -> AppControl {
        AppControl::Continue
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    pub fn run<A: App>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState { config, gpu_init, app, window: None, slot: RedrawSlot::default() };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        renderer::destroy();
        Ok(())
    }
}

struct RuntimeState<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,
    window: Option<Arc<Window>>,
    slot: RedrawSlot,
}

impl<A: App> RuntimeState<A> {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(event_loop.create_window(attrs).context("failed to create window")?);
        let gpu = pollster::block_on(Gpu::new(window.clone(), self.gpu_init.clone()))
            .context("GPU initialization failed")?;

        self.window = Some(window.clone());
        let scheduler = WindowScheduler::new(window, self.slot.clone());
        self.app.start(WgpuContext::new(gpu), scheduler)
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        renderer::destroy();
        self.window = None;
        event_loop.exit();
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        let resized = renderer::instance::<WgpuContext>()
            .and_then(|handle| handle.with(|r| r.context_mut().context_mut().resize(size)));
        if resized.is_none() {
            log::debug!("resize to {}x{} with no renderer to apply it", size.width, size.height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(request) = self.slot.take() else {
            return;
        };

        // Frame faults are logged by the registry; only a lost device ends the loop.
        match renderer::refresh(request) {
            Ok(_) => {}
            Err(e) if e.is_frame_fault() => {}
            Err(e) => log::error!("refresh of {request:?} rejected: {e}"),
        }

        let fatal = renderer::instance::<WgpuContext>()
            .and_then(|handle| handle.with(|r| r.context().context().is_fatal()))
            .unwrap_or(false);
        if fatal {
            log::error!("surface is unrecoverable; shutting down");
            self.shutdown(event_loop);
        }
    }
}

impl<A: App> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);

        if let Err(e) = self.start(event_loop) {
            log::error!("failed to start: {e:#}");
            self.shutdown(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().is_none_or(|w| w.id() != window_id) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
