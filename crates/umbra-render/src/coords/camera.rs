use glam::{Mat4, Vec3};

use super::{Rect, Vec2, Viewport};

/// View onto the world: which world point sits at the screen centre and how
/// many screen pixels one world unit spans.
///
/// The camera is supplied by the state provider every frame; the graphics
/// context manager overwrites `viewport` with the real surface size before
/// deriving the projection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// World point shown at the viewport centre.
    pub center: Vec2,
    /// Screen pixels per world unit.
    pub scale: f32,
    /// Surface size in logical pixels.
    pub viewport: Viewport,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vec2::zero(),
            scale: 1.0,
            viewport: Viewport::new(1280.0, 720.0),
        }
    }
}

impl Camera {
    #[inline]
    pub fn new(center: Vec2, scale: f32, viewport: Viewport) -> Self {
        Self { center, scale, viewport }
    }

    #[inline]
    pub fn with_viewport(self, viewport: Viewport) -> Self {
        Self { viewport, ..self }
    }

    #[inline]
    fn safe_scale(&self) -> f32 {
        self.scale.max(f32::EPSILON)
    }

    /// Maps a world point to logical screen pixels (top-left origin, +Y down).
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        let c = self.viewport.center();
        let s = self.safe_scale();
        Vec2::new(c.x + (p.x - self.center.x) * s, c.y - (p.y - self.center.y) * s)
    }

    /// Inverse of [`world_to_screen`](Self::world_to_screen).
    pub fn screen_to_world(&self, p: Vec2) -> Vec2 {
        let c = self.viewport.center();
        let s = self.safe_scale();
        Vec2::new(self.center.x + (p.x - c.x) / s, self.center.y - (p.y - c.y) / s)
    }

    #[inline]
    pub fn world_to_screen_distance(&self, d: f32) -> f32 {
        d * self.safe_scale()
    }

    #[inline]
    pub fn pixels_to_world(&self, px: f32) -> f32 {
        px / self.safe_scale()
    }

    /// World-space rectangle covered by the viewport.
    pub fn visible_world(&self) -> Rect {
        let v = self.viewport.clamped();
        let s = self.safe_scale();
        let half = Vec2::new(v.width * 0.5 / s, v.height * 0.5 / s);
        Rect::from_origin_size(self.center - half, half * 2.0)
    }

    /// Conservative visibility test for a disc.
    pub fn is_visible(&self, center: Vec2, radius: f32) -> bool {
        self.visible_world().inflate(radius).contains(center)
    }

    /// Orthographic world → clip transform.
    pub fn projection(&self) -> Mat4 {
        let visible = self.visible_world();
        let min = visible.min();
        let max = visible.max();
        Mat4::orthographic_rh(min.x, max.x, min.y, max.y, -1.0, 1.0)
    }

    /// Orthographic screen-pixel → clip transform used by the overlay and text.
    pub fn screen_projection(&self) -> Mat4 {
        let v = self.viewport.clamped();
        Mat4::orthographic_rh(0.0, v.width, v.height, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec2::new(100.0, 50.0), 2.0, Viewport::new(800.0, 600.0))
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn center_maps_to_viewport_center() {
        let cam = camera();
        assert_eq!(cam.world_to_screen(cam.center), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn world_up_is_screen_up() {
        let cam = camera();
        let above = cam.world_to_screen(Vec2::new(100.0, 60.0));
        assert_eq!(above, Vec2::new(400.0, 280.0));
    }

    #[test]
    fn screen_round_trip() {
        let cam = camera();
        let p = Vec2::new(-37.5, 12.25);
        let back = cam.screen_to_world(cam.world_to_screen(p));
        assert!(close(back.x, p.x) && close(back.y, p.y));
    }

    #[test]
    fn projection_maps_visible_corners_to_clip_corners() {
        let cam = camera();
        let proj = cam.projection();

        let c = proj.project_point3(Vec3::new(100.0, 50.0, 0.0));
        assert!(close(c.x, 0.0) && close(c.y, 0.0));

        let top_right = cam.visible_world().max();
        let tr = proj.project_point3(Vec3::new(top_right.x, top_right.y, 0.0));
        assert!(close(tr.x, 1.0) && close(tr.y, 1.0));
    }

    #[test]
    fn screen_projection_puts_origin_top_left() {
        let cam = camera();
        let p = cam.screen_projection().project_point3(Vec3::ZERO);
        assert!(close(p.x, -1.0) && close(p.y, 1.0));
    }

    #[test]
    fn visibility_accounts_for_radius() {
        let cam = camera();
        let edge = cam.visible_world().max().x;
        assert!(!cam.is_visible(Vec2::new(edge + 5.0, 50.0), 1.0));
        assert!(cam.is_visible(Vec2::new(edge + 5.0, 50.0), 10.0));
    }
}
