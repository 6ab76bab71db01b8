mod demo;
mod hud;
mod view;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use umbra_render::context::GraphicsContext;
use umbra_render::gpu::{GpuInit, WgpuContext};
use umbra_render::logging::{LoggingConfig, init_logging};
use umbra_render::primitives::GlyphAtlas;
use umbra_render::renderer::{self, RendererConfig, Surfaces};
use umbra_render::window::{App, AppControl, Runtime, RuntimeConfig, WindowScheduler};
use winit::event::WindowEvent;

use demo::DemoScene;
use view::ViewControl;

const SEED: u64 = 0x5eed_0f_57a75;

struct Viewer {
    view: Rc<RefCell<ViewControl>>,
}

impl App for Viewer {
    fn start(&mut self, context: WgpuContext, scheduler: WindowScheduler) -> Result<()> {
        let mut glyphs = GlyphAtlas::new();
        match load_font() {
            Some(bytes) => {
                glyphs.load_font(&bytes).context("system font could not be parsed")?;
            }
            None => log::warn!("no system font found; labels are disabled"),
        }

        self.view.borrow_mut().set_viewport(context.viewport());
        let scene = DemoScene::generate(SEED, self.view.clone());
        let surfaces = Surfaces::new(context).with_glyphs(glyphs);

        renderer::initialize_with_config(
            surfaces,
            Box::new(scene),
            Box::new(scheduler),
            RendererConfig::default(),
        )?;
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        self.view.borrow_mut().handle(event)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let viewer = Viewer { view: Rc::new(RefCell::new(ViewControl::default())) };
    let config = RuntimeConfig { title: "umbra".to_string(), ..RuntimeConfig::default() };
    // `--unthrottled` drops vsync to measure raw frame cost.
    let gpu = if std::env::args().any(|a| a == "--unthrottled") {
        GpuInit::unthrottled()
    } else {
        GpuInit::default()
    };
    Runtime::run(config, gpu, viewer)
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
