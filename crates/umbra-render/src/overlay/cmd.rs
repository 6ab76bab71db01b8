use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::primitives::FontId;

/// Outline drawn along a shape's edge. `width` is in screen pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub rect: Rect,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: Vec2,
    pub to: Vec2,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub text: String,
    /// Top-left of the first line.
    pub origin: Vec2,
    pub size: f32,
    pub color: Color,
    pub font: FontId,
}

/// Screen-space overlay command.
///
/// Extending the overlay:
/// - add a shape struct above and a variant here
/// - add an `OverlayCanvas` method that records it
/// - teach every `GraphicsContext::present` implementation to composite it
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCmd {
    Rect(RectShape),
    Circle(CircleShape),
    Line(LineShape),
    Text(TextShape),
}
