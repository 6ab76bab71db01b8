//! wgpu implementation of [`GraphicsContext`].
//!
//! Each batch becomes one instanced render pass that loads the previous
//! contents, so submission order is paint order. World-space batches bind
//! the world transform; text and the overlay bind the screen transform.

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::context::{DrawCall, GraphicsContext, Projection};
use crate::coords::{Camera, Rect, Viewport};
use crate::error::RenderError;
use crate::overlay::{DrawList, OverlayCmd};
use crate::paint::Color;
use crate::primitives::{ATLAS_SIZE, GlyphAtlas, GlyphQuad, GlyphRun, TextAlign, TextCmd};

use super::instances::{
    CircleInstance, GlyphInstance, Instance, LineInstance, PlanetInstance, RectInstance,
    SpriteInstance,
};
use super::pipeline::{self, Globals, QUAD_INDICES, QUAD_VERTICES, ShapePipelines};
use super::{Gpu, GpuFrame, SurfaceErrorAction};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Space {
    World,
    Screen,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pipe {
    Line,
    Circle,
    Rect,
    Planet,
    Sprite,
    Glyph,
}

/// GPU objects that live as long as the context.
struct Resources {
    pipelines: ShapePipelines,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    world_globals: wgpu::Buffer,
    screen_globals: wgpu::Buffer,
    world_bind: wgpu::BindGroup,
    screen_bind: wgpu::BindGroup,
    atlas: wgpu::Texture,
}

impl Resources {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let pipelines = ShapePipelines::new(device, format);

        let quad_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("umbra quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("umbra quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let globals = |label| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<Globals>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let world_globals = globals("umbra world globals");
        let screen_globals = globals("umbra screen globals");

        let atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("umbra glyph atlas"),
            size: wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("umbra glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind = |label, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &pipelines.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&atlas_view),
                    },
                    wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
                ],
            })
        };
        let world_bind = bind("umbra world bind group", &world_globals);
        let screen_bind = bind("umbra screen bind group", &screen_globals);

        Self {
            pipelines,
            quad_vbo,
            quad_ibo,
            world_globals,
            screen_globals,
            world_bind,
            screen_bind,
            atlas,
        }
    }

    fn pipeline(&self, pipe: Pipe) -> &wgpu::RenderPipeline {
        let p = &self.pipelines;
        match pipe {
            Pipe::Line => &p.line,
            Pipe::Circle => &p.circle,
            Pipe::Rect => &p.rect,
            Pipe::Planet => &p.planet,
            Pipe::Sprite => &p.sprite,
            Pipe::Glyph => &p.glyph,
        }
    }

    /// Records one instanced pass. The instance buffer is created per call
    /// so earlier passes in the same encoder keep their own data.
    fn draw<I: Instance>(
        &self,
        device: &wgpu::Device,
        frame: &mut GpuFrame,
        pipe: Pipe,
        space: Space,
        instances: &[I],
        scissor: Option<(u32, u32, u32, u32)>,
    ) {
        if instances.is_empty() {
            return;
        }

        let instance_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("umbra instance vbo"),
            contents: bytemuck::cast_slice(instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("umbra shape pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if let Some((x, y, w, h)) = scissor {
            rpass.set_scissor_rect(x, y, w, h);
        }

        let bind = match space {
            Space::World => &self.world_bind,
            Space::Screen => &self.screen_bind,
        };
        rpass.set_pipeline(self.pipeline(pipe));
        rpass.set_bind_group(0, bind, &[]);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }
}

/// Overlay instances waiting to be drawn under one clip.
#[derive(Default)]
struct OverlayRun {
    clip: Option<Rect>,
    pipe: Option<Pipe>,
    rects: Vec<RectInstance>,
    circles: Vec<CircleInstance>,
    lines: Vec<LineInstance>,
    glyphs: Vec<GlyphInstance>,
}

impl OverlayRun {
    fn is_compatible(&self, pipe: Pipe, clip: Option<Rect>) -> bool {
        self.pipe.is_none_or(|p| p == pipe) && self.clip == clip
    }
}

pub struct WgpuContext {
    gpu: Gpu,
    res: Resources,
    frame: Option<GpuFrame>,
    camera: Camera,
    atlas_generation: u64,
    scratch: Vec<GlyphQuad>,
    fatal: bool,
}

impl WgpuContext {
    pub fn new(gpu: Gpu) -> Self {
        let res = Resources::new(gpu.device(), gpu.surface_format());
        Self {
            gpu,
            res,
            frame: None,
            camera: Camera::default(),
            atlas_generation: 0,
            scratch: Vec::new(),
            fatal: false,
        }
    }

    #[inline]
    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    /// True after the surface reported an unrecoverable error.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    fn ensure_frame(&self) -> Result<(), RenderError> {
        if self.frame.is_none() {
            return Err(RenderError::NoActiveFrame);
        }
        Ok(())
    }

    fn upload_atlas(&mut self, glyphs: &GlyphAtlas) {
        if glyphs.generation() == self.atlas_generation {
            return;
        }
        let Some(pixels) = glyphs.pixels() else {
            return;
        };
        self.gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.res.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(ATLAS_SIZE),
                rows_per_image: Some(ATLAS_SIZE),
            },
            wgpu::Extent3d { width: ATLAS_SIZE, height: ATLAS_SIZE, depth_or_array_layers: 1 },
        );
        self.atlas_generation = glyphs.generation();
    }

    fn layout_text(&mut self, commands: &[TextCmd], glyphs: &mut GlyphAtlas) -> Vec<GlyphInstance> {
        self.scratch.clear();
        for cmd in commands {
            let origin = self.camera.world_to_screen(cmd.anchor) + cmd.offset;
            glyphs.layout(cmd.run(), origin, &mut self.scratch);
        }
        self.scratch.iter().map(GlyphInstance::from).collect()
    }

    fn draw_batch<I: Instance>(&mut self, pipe: Pipe, space: Space, instances: &[I]) -> Result<(), RenderError> {
        let frame = self.frame.as_mut().ok_or(RenderError::NoActiveFrame)?;
        self.res.draw(self.gpu.device(), frame, pipe, space, instances, None);
        Ok(())
    }

    fn flush_overlay_run(&mut self, run: &mut OverlayRun) -> Result<(), RenderError> {
        let Some(pipe) = run.pipe.take() else {
            return Ok(());
        };
        let scissor = pipeline::logical_clip_to_scissor(run.clip, self.viewport(), self.gpu.scale_factor());
        let frame = self.frame.as_mut().ok_or(RenderError::NoActiveFrame)?;
        let device = self.gpu.device();

        // A fully clipped run is dropped, not drawn unclipped.
        if scissor.is_some() {
            match pipe {
                Pipe::Rect => self.res.draw(device, frame, pipe, Space::Screen, &run.rects, scissor),
                Pipe::Circle => self.res.draw(device, frame, pipe, Space::Screen, &run.circles, scissor),
                Pipe::Line => self.res.draw(device, frame, pipe, Space::Screen, &run.lines, scissor),
                Pipe::Glyph => self.res.draw(device, frame, pipe, Space::Screen, &run.glyphs, scissor),
                Pipe::Planet | Pipe::Sprite => {}
            }
        }
        run.rects.clear();
        run.circles.clear();
        run.lines.clear();
        run.glyphs.clear();
        Ok(())
    }
}

impl GraphicsContext for WgpuContext {
    fn viewport(&self) -> Viewport {
        let size = self.gpu.size();
        let scale = self.gpu.scale_factor().max(f32::EPSILON);
        Viewport::new(size.width as f32 / scale, size.height as f32 / scale)
    }

    fn set_projection(&mut self, projection: &Projection) -> Result<(), RenderError> {
        self.camera = projection.camera;
        let viewport = projection.camera.viewport;
        let world_px = projection.camera.pixels_to_world(1.0);

        let queue = self.gpu.queue();
        let world = Globals::new(projection.world_to_clip, viewport, world_px);
        let screen = Globals::new(projection.screen_to_clip, viewport, 1.0);
        queue.write_buffer(&self.res.world_globals, 0, bytemuck::bytes_of(&world));
        queue.write_buffer(&self.res.screen_globals, 0, bytemuck::bytes_of(&screen));
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), RenderError> {
        // A frame left open by a failed draw phase is abandoned here.
        self.frame = None;

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    self.fatal = true;
                }
                return Err(RenderError::Surface(action));
            }
        };

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("umbra clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: color.r as f64,
                            g: color.g as f64,
                            b: color.b as f64,
                            a: color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.frame = Some(frame);
        Ok(())
    }

    fn draw(&mut self, call: DrawCall<'_>) -> Result<(), RenderError> {
        self.ensure_frame()?;

        match call {
            DrawCall::Background(chunks) => {
                let v: Vec<RectInstance> = chunks.iter().map(RectInstance::from).collect();
                self.draw_batch(Pipe::Rect, Space::World, &v)
            }
            DrawCall::Lines(c) => {
                let v: Vec<LineInstance> = c.iter().map(LineInstance::from).collect();
                self.draw_batch(Pipe::Line, Space::World, &v)
            }
            DrawCall::Planets(c) => {
                let v: Vec<PlanetInstance> = c.iter().map(PlanetInstance::from).collect();
                self.draw_batch(Pipe::Planet, Space::World, &v)
            }
            DrawCall::Circles(c) => {
                let v: Vec<CircleInstance> = c.iter().map(CircleInstance::from).collect();
                self.draw_batch(Pipe::Circle, Space::World, &v)
            }
            DrawCall::Rects(c) => {
                let v: Vec<RectInstance> = c.iter().map(RectInstance::from).collect();
                self.draw_batch(Pipe::Rect, Space::World, &v)
            }
            DrawCall::Sprites(c) => {
                let v: Vec<SpriteInstance> = c.iter().map(SpriteInstance::from).collect();
                self.draw_batch(Pipe::Sprite, Space::World, &v)
            }
            DrawCall::Text { commands, glyphs } => {
                let v = self.layout_text(commands, glyphs);
                self.upload_atlas(glyphs);
                self.draw_batch(Pipe::Glyph, Space::Screen, &v)
            }
        }
    }

    fn present(&mut self, overlay: &mut DrawList, glyphs: &mut GlyphAtlas) -> Result<(), RenderError> {
        self.ensure_frame()?;

        let mut run = OverlayRun::default();
        for item in overlay.iter_in_paint_order() {
            let pipe = match &item.cmd {
                OverlayCmd::Rect(_) => Pipe::Rect,
                OverlayCmd::Circle(_) => Pipe::Circle,
                OverlayCmd::Line(_) => Pipe::Line,
                OverlayCmd::Text(_) => Pipe::Glyph,
            };
            if !run.is_compatible(pipe, item.clip_rect) {
                self.flush_overlay_run(&mut run)?;
            }
            run.pipe = Some(pipe);
            run.clip = item.clip_rect;

            match &item.cmd {
                OverlayCmd::Rect(s) => RectInstance::from_shape(s, &mut run.rects),
                OverlayCmd::Circle(s) => CircleInstance::from_shape(s, &mut run.circles),
                OverlayCmd::Line(s) => run.lines.push(LineInstance::from(s)),
                OverlayCmd::Text(s) => {
                    self.scratch.clear();
                    let text = GlyphRun {
                        text: &s.text,
                        font: s.font,
                        size: s.size,
                        color: s.color,
                        align: TextAlign::Left,
                    };
                    glyphs.layout(text, s.origin, &mut self.scratch);
                    run.glyphs.extend(self.scratch.iter().map(GlyphInstance::from));
                }
            }
        }
        self.flush_overlay_run(&mut run)?;
        self.upload_atlas(glyphs);

        let frame = self.frame.take().ok_or(RenderError::NoActiveFrame)?;
        self.gpu.submit(frame);
        Ok(())
    }
}
