//! Demo window runner.
//!
//! Drives the particle field (and a drag carousel wired to the pointer) at
//! display refresh: winit delivers events, [`Input`] normalizes them, the
//! field updates and rasterizes into a [`PixelSurface`], and [`FrameBlit`]
//! uploads the finished frame as a texture and draws it with a fullscreen
//! triangle.
//!
//! Space pauses the clock, escape quits.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::carousel::{Carousel, CarouselConfig};
use crate::error::{GpuError, RunnerError};
use crate::field::{FieldConfig, ParticleField};
use crate::input::Input;
use crate::raster::PixelSurface;
use crate::time::FrameClock;

const BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // Fullscreen triangle, no vertex buffer.
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 3.0, -1.0),
        vec2<f32>(-1.0,  3.0),
    );
    let pos = positions[vertex_index];

    var out: VertexOutput;
    out.clip_position = vec4<f32>(pos, 0.0, 1.0);
    out.uv = vec2<f32>(pos.x * 0.5 + 0.5, 1.0 - (pos.y * 0.5 + 0.5));
    return out;
}

@group(0) @binding(0) var frame_texture: texture_2d<f32>;
@group(0) @binding(1) var frame_sampler: sampler;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(frame_texture, frame_sampler, in.uv);
}
"#;

/// Demo runner builder.
///
/// Use method chaining to configure, then call `.run()` to start. Blocks
/// until the window is closed.
pub struct Runner {
    title: String,
    size: (u32, u32),
    field_config: FieldConfig,
}

impl Runner {
    /// Create a runner with default settings.
    pub fn new() -> Self {
        Self {
            title: "marquee".to_string(),
            size: (1280, 720),
            field_config: FieldConfig::default(),
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the particle field configuration.
    pub fn with_field_config(mut self, config: FieldConfig) -> Self {
        self.field_config = config;
        self
    }

    /// Open the window and run the effects until it closes.
    pub fn run(self) -> Result<(), RunnerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.title, self.size, self.field_config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    blit: Option<FrameBlit>,
    surface: PixelSurface,
    field: ParticleField,
    carousel: Carousel,
    input: Input,
    clock: FrameClock,
}

impl App {
    fn new(title: String, size: (u32, u32), field_config: FieldConfig) -> Self {
        let bounds = Vec2::new(size.0 as f32, size.1 as f32);
        Self {
            title,
            size,
            window: None,
            blit: None,
            surface: PixelSurface::new(size.0, size.1),
            field: ParticleField::new(bounds).with_config(field_config),
            carousel: Carousel::new(CarouselConfig::default()),
            input: Input::new(),
            clock: FrameClock::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.quit_pressed() {
            event_loop.exit();
            return;
        }
        if self.input.pause_pressed() {
            self.clock.toggle();
            log::info!(
                "clock {}",
                if self.clock.is_running() { "running" } else { "paused" }
            );
        }

        // Drag drives the carousel; the ring transforms are retained on the
        // pixel surface for hosts that move real elements.
        if let Some(delta) = self.input.drag_delta() {
            self.carousel.drag_by(delta);
            self.carousel.apply(&mut self.surface);
        }
        if self.input.drag_released() {
            self.carousel.release(&mut self.surface);
        }

        match self.input.pointer() {
            Some(position) => self.field.set_pointer(position),
            None => self.field.clear_pointer(),
        }
        if self.clock.tick().is_some() {
            self.field.update();
        }
        self.field.render(&mut self.surface);

        if let (Some(blit), Some(window)) = (&mut self.blit, &self.window) {
            match blit.present(self.surface.frame()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (width, height) = self.size;
                    blit.resize(width, height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("skipped frame: {:?}", e),
            }
            window.request_redraw();
        }

        self.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(FrameBlit::new(window.clone())) {
            Ok(blit) => {
                let size = window.inner_size();
                self.size = (size.width.max(1), size.height.max(1));
                self.surface.resize(self.size.0, self.size.1);
                self.field
                    .resize(Vec2::new(self.size.0 as f32, self.size.1 as f32));
                self.blit = Some(blit);
                self.clock.start();
                self.window = Some(window);
                log::info!("window up at {}x{}", self.size.0, self.size.1);
            }
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                let width = physical_size.width.max(1);
                let height = physical_size.height.max(1);
                self.size = (width, height);
                self.surface.resize(width, height);
                self.field.resize(Vec2::new(width as f32, height as f32));
                if let Some(blit) = &mut self.blit {
                    blit.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// wgpu surface that presents CPU-rasterized frames.
///
/// One texture the size of the window, rewritten each frame from the
/// [`PixelSurface`] bytes and sampled by a fullscreen triangle.
pub struct FrameBlit {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl FrameBlit {
    /// Initialize the GPU surface and pipeline for a window.
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
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

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Blit Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let (texture, bind_group) = Self::create_frame_texture(
            &device,
            &bind_group_layout,
            &sampler,
            config.width,
            config.height,
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            texture,
            bind_group,
        })
    }

    fn create_frame_texture(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::BindGroup) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        (texture, bind_group)
    }

    /// Reconfigure the surface and frame texture for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);

        let (texture, bind_group) = Self::create_frame_texture(
            &self.device,
            &self.bind_group_layout,
            &self.sampler,
            self.config.width,
            self.config.height,
        );
        self.texture = texture;
        self.bind_group = bind_group;
    }

    /// Upload a finished RGBA8 frame and present it.
    ///
    /// The frame must match the current configured size; mismatched frames
    /// (possible for one event-loop turn around a resize) are skipped.
    pub fn present(&mut self, frame: &[u8]) -> Result<(), wgpu::SurfaceError> {
        let width = self.config.width;
        let height = self.config.height;
        if frame.len() != (width * height * 4) as usize {
            return Ok(());
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blit Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
