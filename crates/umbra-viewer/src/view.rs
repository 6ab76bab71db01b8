use umbra_render::coords::{Camera, Vec2, Viewport};
use umbra_render::window::AppControl;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const MIN_SCALE: f32 = 0.05;
const MAX_SCALE: f32 = 40.0;
const PAN_STEP_PX: f32 = 60.0;
const ZOOM_STEP: f32 = 1.15;

/// Camera and pointer state driven by window input.
#[derive(Debug, Clone)]
pub struct ViewControl {
    pub center: Vec2,
    /// Screen pixels per world unit.
    pub scale: f32,
    viewport: Viewport,
    scale_factor: f64,
    /// Pointer in logical pixels.
    pointer: Option<Vec2>,
    drag_from: Option<Vec2>,
    dragged: bool,
    /// World position of the last click; the scene selects what is under it.
    click: Option<Vec2>,
}

impl Default for ViewControl {
    fn default() -> Self {
        Self {
            center: Vec2::zero(),
            scale: 1.5,
            viewport: Viewport::new(1280.0, 720.0),
            scale_factor: 1.0,
            pointer: None,
            drag_from: None,
            dragged: false,
            click: None,
        }
    }
}

impl ViewControl {
    pub fn camera(&self) -> Camera {
        Camera::new(self.center, self.scale, self.viewport)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer_world(&self) -> Option<Vec2> {
        self.pointer.map(|p| self.camera().screen_to_world(p))
    }

    #[inline]
    pub fn click(&self) -> Option<Vec2> {
        self.click
    }

    /// Clicking empty space clears the selection.
    pub fn select_at(&mut self, world: Option<Vec2>) {
        self.click = world;
    }

    pub fn zoom(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Pans by a screen-space delta; content follows the pointer.
    pub fn pan_pixels(&mut self, dx: f32, dy: f32) {
        self.center = self.center + Vec2::new(-dx / self.scale, dy / self.scale);
    }

    pub fn handle(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::Resized(size) => {
                let s = self.scale_factor as f32;
                self.viewport = Viewport::new(size.width as f32 / s, size.height as f32 / s);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                let p = Vec2::new(logical.x, logical.y);
                if let (Some(from), Some(last)) = (self.drag_from, self.pointer) {
                    self.pan_pixels(p.x - last.x, p.y - last.y);
                    self.dragged |= from.distance(p) > 3.0;
                }
                self.pointer = Some(p);
            }
            WindowEvent::CursorLeft { .. } => self.pointer = None,
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => {
                    self.drag_from = self.pointer;
                    self.dragged = false;
                }
                ElementState::Released => {
                    if !self.dragged {
                        self.select_at(self.pointer_world());
                    }
                    self.drag_from = None;
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                self.zoom(ZOOM_STEP.powf(lines));
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    return self.key(code);
                }
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn key(&mut self, code: KeyCode) -> AppControl {
        match code {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::ArrowLeft | KeyCode::KeyA => self.pan_pixels(PAN_STEP_PX, 0.0),
            KeyCode::ArrowRight | KeyCode::KeyD => self.pan_pixels(-PAN_STEP_PX, 0.0),
            KeyCode::ArrowUp | KeyCode::KeyW => self.pan_pixels(0.0, PAN_STEP_PX),
            KeyCode::ArrowDown | KeyCode::KeyS => self.pan_pixels(0.0, -PAN_STEP_PX),
            KeyCode::Equal | KeyCode::NumpadAdd => self.zoom(ZOOM_STEP),
            KeyCode::Minus | KeyCode::NumpadSubtract => self.zoom(1.0 / ZOOM_STEP),
            KeyCode::Digit0 => {
                self.center = Vec2::zero();
                self.scale = Self::default().scale;
            }
            _ => {}
        }
        AppControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut view = ViewControl::default();
        view.zoom(1e6);
        assert_eq!(view.scale, MAX_SCALE);
        view.zoom(1e-9);
        assert_eq!(view.scale, MIN_SCALE);
    }

    #[test]
    fn dragging_right_moves_the_camera_left() {
        let mut view = ViewControl { scale: 2.0, ..ViewControl::default() };
        view.pan_pixels(10.0, 0.0);
        assert_eq!(view.center, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn escape_exits() {
        let mut view = ViewControl::default();
        assert_eq!(view.key(KeyCode::Escape), AppControl::Exit);
        assert_eq!(view.key(KeyCode::KeyQ), AppControl::Continue);
    }
}
