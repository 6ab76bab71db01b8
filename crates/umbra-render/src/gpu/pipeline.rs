//! Shared pipeline state: the globals uniform, the unit quad, one pipeline
//! per primitive kind and the scissor conversion used by the overlay pass.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::coords::{Rect, Viewport};

use super::instances::{
    CircleInstance, GlyphInstance, Instance, LineInstance, PlanetInstance, RectInstance,
    SpriteInstance,
};

const SHADER: &str = include_str!("shaders/shapes.wgsl");

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

/// Per-space uniform. One buffer holds the world transform, another the
/// screen transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct Globals {
    pub to_clip: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    /// Units of the bound space per logical pixel.
    pub px: f32,
    pub _pad: f32,
}

impl Globals {
    pub(super) fn new(to_clip: Mat4, viewport: Viewport, px: f32) -> Self {
        Self {
            to_clip: to_clip.to_cols_array_2d(),
            viewport: [viewport.width, viewport.height],
            px,
            _pad: 0.0,
        }
    }

    fn min_binding_size() -> Option<std::num::NonZeroU64> {
        std::num::NonZeroU64::new(std::mem::size_of::<Globals>() as u64)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Every pipeline the backend draws with, built for one surface format.
pub(super) struct ShapePipelines {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub line: wgpu::RenderPipeline,
    pub circle: wgpu::RenderPipeline,
    pub rect: wgpu::RenderPipeline,
    pub planet: wgpu::RenderPipeline,
    pub sprite: wgpu::RenderPipeline,
    pub glyph: wgpu::RenderPipeline,
}

impl ShapePipelines {
    pub(super) fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("umbra shapes shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("umbra globals bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Globals::min_binding_size(),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("umbra shapes pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let build = |label: &str, vs: &str, fs: &str, instance: wgpu::VertexBufferLayout<'static>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers: &[QuadVertex::layout(), instance],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        Self {
            line: build("umbra line pipeline", "vs_line", "fs_color", LineInstance::layout()),
            circle: build("umbra circle pipeline", "vs_circle", "fs_circle", CircleInstance::layout()),
            rect: build("umbra rect pipeline", "vs_rect", "fs_rect", RectInstance::layout()),
            planet: build("umbra planet pipeline", "vs_planet", "fs_planet", PlanetInstance::layout()),
            sprite: build("umbra sprite pipeline", "vs_sprite", "fs_sprite", SpriteInstance::layout()),
            glyph: build("umbra glyph pipeline", "vs_glyph", "fs_glyph", GlyphInstance::layout()),
            bind_group_layout,
        }
    }
}

/// Converts a logical-pixel clip rect to physical scissor arguments.
///
/// `None` clip means the full surface. Returns `None` when the clipped area
/// is empty and the draw must be skipped.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_w = (viewport.width * scale).max(1.0) as u32;
    let phys_h = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_w, phys_h),
        Some(r) => {
            let r = r.normalized();
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_w);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_h);
            let x2 = (((r.origin.x + r.size.x) * scale).max(0.0) as u32).min(phys_w);
            let y2 = (((r.origin.y + r.size.y) * scale).max(0.0) as u32).min(phys_h);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}
