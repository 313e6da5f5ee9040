//! wgpu renderer for the ecosystem.
//!
//! Consumes each tick's [`Frame`]: particle visuals are uploaded as an
//! instance buffer and drawn as camera-facing discs, the active part of the
//! line buffer is uploaded as a vertex buffer and drawn as a line list.
//! GPU buffers are sized once for the ecosystem's particle count and
//! destroyed explicitly by [`Renderer::release`].

mod camera;
mod shaders;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

pub use camera::Camera;

use crate::ecosystem::Frame;
use crate::error::GpuError;
use crate::lines::LineBuffer;
use crate::particle::ParticleVisual;
use crate::pointer::Viewport;
use crate::theme::{Palette, Theme};

/// Base disc radius in world units before speed scaling.
const PARTICLE_RADIUS: f32 = 0.15;
const LINE_OPACITY: f32 = 0.15;
const FOG_DENSITY: f32 = 0.002;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_right: [f32; 4],
    camera_up: [f32; 4],
    camera_position: [f32; 4],
    particle_color: [f32; 4],
    line_color: [f32; 4],
    fog_color: [f32; 4],
}

/// GPU state for one window.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    particle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    line_vertex_buffer: wgpu::Buffer,
    particle_count: u32,
    line_vertex_count: u32,
    line_vertex_capacity: usize,
    pub camera: Camera,
    palette: Palette,
    released: bool,
}

impl Renderer {
    /// Set up surface, pipelines and buffers for `particle_count` particles.
    pub async fn new(
        window: Arc<Window>,
        particle_count: usize,
        theme: Theme,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        log::info!("using adapter {:?}", adapter.get_info().name);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Instance Buffer"),
            size: buffer_size(particle_count.max(1), std::mem::size_of::<ParticleVisual>()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let limit = device.limits().max_buffer_size;
        let line_vertex_capacity = LineBuffer::max_vertices(particle_count).unwrap_or(usize::MAX);
        let line_bytes = buffer_size(line_vertex_capacity.max(1), 3 * std::mem::size_of::<f32>());
        if line_bytes > limit {
            return Err(GpuError::BufferTooLarge {
                label: "line vertex buffer",
                requested: line_bytes,
                limit,
            });
        }
        let line_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Line Vertex Buffer"),
            size: line_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let particle_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleVisual>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32,
                        2 => Float32
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(additive_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let camera = Camera::new(Viewport::new(config.width, config.height).aspect());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            particle_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_buffer,
            line_vertex_buffer,
            particle_count: 0,
            line_vertex_count: 0,
            line_vertex_capacity,
            camera,
            palette: theme.palette(),
            released: false,
        })
    }

    /// Reconfigure the surface and projection for a new window size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.width > 0 && viewport.height > 0 {
            self.config.width = viewport.width;
            self.config.height = viewport.height;
            self.surface.configure(&self.device, &self.config);
            self.camera.aspect = viewport.aspect();
        }
    }

    /// Reconfigure with the current size, e.g. after a lost surface.
    pub fn reconfigure(&mut self) {
        self.resize(Viewport::new(self.config.width, self.config.height));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = theme.palette();
    }

    /// Copy a tick's output into GPU buffers.
    pub fn upload(&mut self, frame: &Frame<'_>) {
        if self.released {
            return;
        }
        self.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(frame.visuals),
        );
        self.particle_count = frame.visuals.len() as u32;

        let count = frame.line_vertex_count.min(self.line_vertex_capacity);
        let active = &frame.line_vertices[..count * 3];
        if !active.is_empty() {
            self.queue
                .write_buffer(&self.line_vertex_buffer, 0, bytemuck::cast_slice(active));
        }
        self.line_vertex_count = count as u32;
    }

    fn update_uniforms(&self, elapsed: f32) {
        let (view_proj, right, up) = self.camera.view_proj(elapsed);
        let position = self.camera.position(elapsed);
        let uniforms = Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            camera_position: position.extend(FOG_DENSITY).to_array(),
            particle_color: self.palette.particle.extend(PARTICLE_RADIUS).to_array(),
            line_color: self.palette.line.extend(LINE_OPACITY).to_array(),
            fog_color: self.palette.background.extend(1.0).to_array(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw the last uploaded frame. `elapsed` drives the camera sway.
    pub fn render(&mut self, elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        if self.released {
            return Ok(());
        }
        self.update_uniforms(elapsed);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = self.palette.background;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.x as f64,
                            g: bg.y as f64,
                            b: bg.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if self.line_vertex_count > 0 {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.line_vertex_buffer.slice(..));
                render_pass.draw(0..self.line_vertex_count, 0..1);
            }

            if self.particle_count > 0 {
                render_pass.set_pipeline(&self.particle_pipeline);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..6, 0..self.particle_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Destroy particle and line buffers. Nothing renders afterwards.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.instance_buffer.destroy();
        self.line_vertex_buffer.destroy();
        self.uniform_buffer.destroy();
        self.particle_count = 0;
        self.line_vertex_count = 0;
        log::info!("renderer resources released");
    }

    /// Whether [`release`](Self::release) has run.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// `count * stride` in bytes, saturating at `u64::MAX`.
fn buffer_size(count: usize, stride: usize) -> u64 {
    (count as u64).saturating_mul(stride as u64)
}

/// `src * src_alpha + dst`, for glowing overlapping lines.
fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}
