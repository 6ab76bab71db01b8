use std::time::Instant;

use umbra_render::coords::{Rect, Vec2};
use umbra_render::overlay::OverlayCanvas;
use umbra_render::paint::Color;
use umbra_render::renderer;
use umbra_render::scene::PluginManager;

const SAMPLE_FRAMES: u64 = 60;

const PANEL: Color = Color::from_premul(0.0, 0.0, 0.0, 0.55);
const PANEL_EDGE: Color = Color::from_premul(0.4, 0.4, 0.5, 0.8);
const TEXT: Color = Color::opaque(0.85, 0.85, 0.9);

/// Stand-in plugin: a small status panel in the top-left corner.
pub struct Hud {
    window_start: Instant,
    fps: f32,
}

impl Default for Hud {
    fn default() -> Self {
        Self { window_start: Instant::now(), fps: 0.0 }
    }
}

impl PluginManager for Hud {
    fn draw_all_running_plugins(&mut self, canvas: &mut OverlayCanvas<'_>) {
        if renderer::debug(SAMPLE_FRAMES) {
            let elapsed = self.window_start.elapsed().as_secs_f32();
            if elapsed > 0.0 {
                self.fps = SAMPLE_FRAMES as f32 / elapsed;
            }
            self.window_start = Instant::now();
        }

        let panel = Rect::new(10.0, 10.0, 170.0, 46.0);
        canvas.fill_rect(panel, PANEL);
        canvas.stroke_rect(panel, 1.0, PANEL_EDGE);

        canvas.push_clip(panel.inflate(-4.0));
        let frame = renderer::frame_count().unwrap_or(0);
        canvas.text(format!("frame {frame}"), Vec2::new(18.0, 16.0), 14.0, TEXT);
        canvas.text(format!("{:.0} fps", self.fps), Vec2::new(18.0, 34.0), 14.0, TEXT);
        canvas.pop_clip();
    }
}
