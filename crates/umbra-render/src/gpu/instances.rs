//! Per-instance vertex data, one struct per pipeline.
//!
//! Every shape is a unit quad expanded in the vertex shader; widths given in
//! pixels are converted to the bound space by the `px` uniform.

use bytemuck::{Pod, Zeroable};

use crate::entities::ChunkQuad;
use crate::overlay::{CircleShape, LineShape, RectShape};
use crate::primitives::{CircleCmd, GlyphQuad, LineCmd, PlanetCmd, RectCmd, SpriteCmd};

/// Vertex buffer layout for an instance type.
pub(super) trait Instance: Pod {
    const ATTRS: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: Self::ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct LineInstance {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    pub width: f32,
    pub color: [f32; 4],
}

impl Instance for LineInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32,
        4 => Float32x4
    ];
}

impl From<&LineCmd> for LineInstance {
    fn from(c: &LineCmd) -> Self {
        Self { p0: c.from.to_array(), p1: c.to.to_array(), width: c.width, color: c.color.to_array() }
    }
}

impl From<&LineShape> for LineInstance {
    fn from(s: &LineShape) -> Self {
        Self {
            p0: s.from.to_array(),
            p1: s.to.to_array(),
            width: s.stroke.width,
            color: s.stroke.color.to_array(),
        }
    }
}

/// Filled disc, or a ring when `stroke > 0`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub stroke: f32,
    pub color: [f32; 4],
}

impl Instance for CircleInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32,
        4 => Float32x4
    ];
}

impl From<&CircleCmd> for CircleInstance {
    fn from(c: &CircleCmd) -> Self {
        Self {
            center: c.center.to_array(),
            radius: c.radius,
            stroke: c.stroke.unwrap_or(0.0).max(0.0),
            color: c.color.to_array(),
        }
    }
}

impl CircleInstance {
    /// Fill first, then stroke on top.
    pub(super) fn from_shape(s: &CircleShape, out: &mut Vec<CircleInstance>) {
        let center = s.center.to_array();
        if let Some(fill) = s.fill {
            out.push(Self { center, radius: s.radius, stroke: 0.0, color: fill.to_array() });
        }
        if let Some(stroke) = s.stroke.filter(|st| st.width > 0.0) {
            out.push(Self { center, radius: s.radius, stroke: stroke.width, color: stroke.color.to_array() });
        }
    }
}

/// Axis-aligned rect, or its inner border band when `stroke > 0`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct RectInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub stroke: f32,
    pub color: [f32; 4],
}

impl Instance for RectInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32,
        4 => Float32x4
    ];
}

impl From<&RectCmd> for RectInstance {
    fn from(c: &RectCmd) -> Self {
        let r = c.rect.normalized();
        Self {
            min: r.min().to_array(),
            max: r.max().to_array(),
            stroke: c.stroke.unwrap_or(0.0).max(0.0),
            color: c.color.to_array(),
        }
    }
}

impl From<&ChunkQuad> for RectInstance {
    fn from(c: &ChunkQuad) -> Self {
        let r = c.rect.normalized();
        Self { min: r.min().to_array(), max: r.max().to_array(), stroke: 0.0, color: c.color.to_array() }
    }
}

impl RectInstance {
    pub(super) fn from_shape(s: &RectShape, out: &mut Vec<RectInstance>) {
        let r = s.rect.normalized();
        let (min, max) = (r.min().to_array(), r.max().to_array());
        if let Some(fill) = s.fill {
            out.push(Self { min, max, stroke: 0.0, color: fill.to_array() });
        }
        if let Some(stroke) = s.stroke.filter(|st| st.width > 0.0) {
            out.push(Self { min, max, stroke: stroke.width, color: stroke.color.to_array() });
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct PlanetInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
    pub rim: [f32; 4],
    /// seed (0..1), phase, energy, rim flag
    pub params: [f32; 4],
}

impl Instance for PlanetInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];
}

impl From<&PlanetCmd> for PlanetInstance {
    fn from(c: &PlanetCmd) -> Self {
        let seed = (c.seed % 10_007) as f32 / 10_007.0;
        Self {
            center: c.center.to_array(),
            radius: c.radius,
            color: c.color.to_array(),
            rim: c.rim.map(|r| r.to_array()).unwrap_or([0.0; 4]),
            params: [seed, c.phase, c.energy.clamp(0.0, 1.0), if c.rim.is_some() { 1.0 } else { 0.0 }],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct SpriteInstance {
    pub center: [f32; 2],
    pub size: f32,
    pub sprite: f32,
    pub tint: [f32; 4],
}

impl Instance for SpriteInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32,
        4 => Float32x4
    ];
}

impl From<&SpriteCmd> for SpriteInstance {
    fn from(c: &SpriteCmd) -> Self {
        Self { center: c.center.to_array(), size: c.size, sprite: c.sprite.0 as f32, tint: c.tint.to_array() }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GlyphInstance {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub color: [f32; 4],
}

impl Instance for GlyphInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];
}

impl From<&GlyphQuad> for GlyphInstance {
    fn from(q: &GlyphQuad) -> Self {
        Self {
            min: q.min.to_array(),
            max: q.max.to_array(),
            uv_min: q.uv_min,
            uv_max: q.uv_max,
            color: q.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::overlay::Stroke;
    use crate::paint::Color;

    #[test]
    fn instance_strides_have_no_padding() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 9 * 4);
        assert_eq!(std::mem::size_of::<CircleInstance>(), 8 * 4);
        assert_eq!(std::mem::size_of::<RectInstance>(), 9 * 4);
        assert_eq!(std::mem::size_of::<PlanetInstance>(), 15 * 4);
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 8 * 4);
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 12 * 4);
    }

    #[test]
    fn outlined_shape_emits_fill_then_stroke() {
        let shape = CircleShape {
            center: Vec2::new(10.0, 10.0),
            radius: 4.0,
            fill: Some(Color::opaque(1.0, 1.0, 1.0)),
            stroke: Some(Stroke::new(2.0, Color::opaque(0.0, 0.0, 0.0))),
        };
        let mut out = Vec::new();
        CircleInstance::from_shape(&shape, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].stroke, 0.0);
        assert_eq!(out[1].stroke, 2.0);
    }

    #[test]
    fn zero_width_stroke_is_skipped() {
        let shape = RectShape {
            rect: Rect::new(0.0, 0.0, 5.0, 5.0),
            fill: None,
            stroke: Some(Stroke::new(0.0, Color::opaque(1.0, 1.0, 1.0))),
        };
        let mut out = Vec::new();
        RectInstance::from_shape(&shape, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn negative_rect_is_normalized() {
        let cmd = RectCmd::filled(Rect::new(10.0, 10.0, -4.0, -6.0), Color::opaque(1.0, 1.0, 1.0));
        let inst = RectInstance::from(&cmd);
        assert_eq!(inst.min, [6.0, 4.0]);
        assert_eq!(inst.max, [10.0, 10.0]);
    }
}
