//! GPU presentation state.
//!
//! Owns the swapchain, the two static pipelines, and the per-instance
//! resources (frame texture or mesh buffers). Pipelines are compiled once
//! at startup; per-instance resources are created at mount and reused for
//! every tick of that instance's lifetime. Switching effects drops the old
//! resources before the new ones are created.

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::{vec3, Mat4, Vec3};
use image::RgbaImage;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;

use crate::instance::EffectInstance;
use crate::shaders;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct MeshGlobals {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    light_dir: [f32; 4],
}

/// Per-instance GPU resources.
enum InstanceTarget {
    Pixels {
        texture: wgpu::Texture,
        bind_group: wgpu::BindGroup,
        width: u32,
        height: u32,
        bytes_per_row: u32,
        upload: Vec<u8>,
    },
    Mesh {
        vertex_buffer: wgpu::Buffer,
        vertex_capacity: usize,
        index_buffer: wgpu::Buffer,
        index_count: u32,
        globals: wgpu::Buffer,
        bind_group: wgpu::BindGroup,
        _gradient_texture: wgpu::Texture,
        gradient_version: u64,
    },
}

pub(crate) struct GpuState {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    limits: wgpu::Limits,
    blit_layout: wgpu::BindGroupLayout,
    blit_pipeline: wgpu::RenderPipeline,
    mesh_layout: wgpu::BindGroupLayout,
    mesh_pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    depth_view: wgpu::TextureView,
    target: Option<InstanceTarget>,
}

impl GpuState {
    pub(crate) fn new<T>(target: &T, initial_size: PhysicalSize<u32>) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let instance = wgpu::Instance::default();
        let window_handle = target
            .window_handle()
            .map_err(|err| anyhow!("failed to acquire window handle: {err}"))?;
        let display_handle = target
            .display_handle()
            .map_err(|err| anyhow!("failed to acquire display handle: {err}"))?;
        let surface = unsafe {
            instance.create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: display_handle.as_raw(),
                raw_window_handle: window_handle.as_raw(),
            })
        }
        .context("failed to create rendering surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let limits = adapter.limits();
        let device_descriptor = wgpu::DeviceDescriptor {
            label: Some("lumedeck device"),
            required_features: wgpu::Features::empty(),
            required_limits: limits.clone(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::default(),
        };
        let (device, queue) = pollster::block_on(adapter.request_device(&device_descriptor))
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = PhysicalSize::new(initial_size.width.max(1), initial_size.height.max(1));
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blit layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
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
            ],
        });

        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let blit_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blit shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BLIT.into()),
        });
        let mesh_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH.into()),
        });

        let blit_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("blit pipeline layout"),
                bind_group_layouts: &[&blit_layout],
                push_constant_ranges: &[],
            });
        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &blit_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        let mesh_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("mesh pipeline layout"),
                bind_group_layouts: &[&mesh_layout],
                push_constant_ranges: &[],
            });
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_module,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<crate::surface::DisplacedVertex>()
                        as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The displaced blob is rendered double-sided.
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &mesh_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview: None,
            cache: None,
        });

        let depth_view = create_depth_view(&device, size);

        tracing::info!(
            width = size.width,
            height = size.height,
            format = ?surface_format,
            "initialised GPU surface"
        );

        Ok(Self {
            _instance: instance,
            surface,
            device,
            queue,
            config,
            size,
            limits,
            blit_layout,
            blit_pipeline,
            mesh_layout,
            mesh_pipeline,
            sampler,
            depth_view,
            target: None,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let max_dimension = self.limits.max_texture_dimension_2d;
        if new_size.width > max_dimension || new_size.height > max_dimension {
            tracing::warn!(
                width = new_size.width,
                height = new_size.height,
                max_dimension,
                "resize exceeds GPU texture limit; keeping previous size"
            );
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, new_size);
    }

    /// Builds the per-instance resources for a freshly mounted effect,
    /// dropping whatever the previous instance owned first.
    pub(crate) fn prepare_instance(&mut self, instance: &EffectInstance) {
        self.target = None;
        self.target = Some(match instance.mesh() {
            Some(mesh) => self.create_mesh_target(mesh, instance),
            None => {
                let (_, width, height) = instance
                    .pixels()
                    .expect("pixel effect always has a frame target");
                self.create_pixel_target(width, height)
            }
        });
    }

    fn create_pixel_target(&self, width: u32, height: u32) -> InstanceTarget {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame texture"),
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
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame bind group"),
            layout: &self.blit_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });
        let bytes_per_row = (4 * width).div_ceil(256) * 256;
        InstanceTarget::Pixels {
            texture,
            bind_group,
            width,
            height,
            bytes_per_row,
            upload: vec![0; (bytes_per_row * height) as usize],
        }
    }

    fn create_mesh_target(
        &self,
        mesh: &crate::surface::MeshSurface,
        instance: &EffectInstance,
    ) -> InstanceTarget {
        use wgpu::util::DeviceExt;

        let vertex_capacity = mesh.vertices.len();
        let vertex_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blob vertices"),
            size: (vertex_capacity * std::mem::size_of::<crate::surface::DisplacedVertex>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("blob indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let globals = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("blob globals"),
            size: std::mem::size_of::<MeshGlobals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let gradient_version = instance.gradient().version();
        let (gradient_texture, bind_group) =
            self.create_gradient_binding(instance.gradient().image(), &globals);

        InstanceTarget::Mesh {
            vertex_buffer,
            vertex_capacity,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            globals,
            bind_group,
            _gradient_texture: gradient_texture,
            gradient_version,
        }
    }

    fn create_gradient_binding(
        &self,
        image: &RgbaImage,
        globals: &wgpu::Buffer,
    ) -> (wgpu::Texture, wgpu::BindGroup) {
        let (width, height) = image.dimensions();
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gradient lut"),
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
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh bind group"),
            layout: &self.mesh_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
            ],
        });
        (texture, bind_group)
    }

    /// Uploads the instance's CPU output and presents one frame.
    pub(crate) fn render_frame(
        &mut self,
        instance: &EffectInstance,
    ) -> Result<(), wgpu::SurfaceError> {
        self.upload(instance);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            match &self.target {
                Some(InstanceTarget::Pixels { bind_group, .. }) => {
                    pass.set_pipeline(&self.blit_pipeline);
                    pass.set_bind_group(0, bind_group, &[]);
                    pass.draw(0..3, 0..1);
                }
                Some(InstanceTarget::Mesh {
                    vertex_buffer,
                    index_buffer,
                    index_count,
                    bind_group,
                    ..
                }) => {
                    pass.set_pipeline(&self.mesh_pipeline);
                    pass.set_bind_group(0, bind_group, &[]);
                    pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..*index_count, 0, 0..1);
                }
                None => {}
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn upload(&mut self, instance: &EffectInstance) {
        // Internal frame dimensions change on window resize; rebuild the
        // texture lazily when they do.
        let stale_pixels = match (&self.target, instance.pixels()) {
            (Some(InstanceTarget::Pixels { width, height, .. }), Some((_, w, h))) => {
                (w != *width || h != *height).then_some((w, h))
            }
            _ => None,
        };
        if let Some((w, h)) = stale_pixels {
            self.target = Some(self.create_pixel_target(w, h));
        }

        // A freshly loaded gradient replaces the placeholder binding.
        let refreshed_gradient = match &self.target {
            Some(InstanceTarget::Mesh {
                globals,
                gradient_version,
                ..
            }) if instance.gradient().version() != *gradient_version => {
                Some(self.create_gradient_binding(instance.gradient().image(), globals))
            }
            _ => None,
        };
        if let Some((texture, bind_group)) = refreshed_gradient {
            if let Some(InstanceTarget::Mesh {
                bind_group: slot_bind_group,
                _gradient_texture: slot_texture,
                gradient_version,
                ..
            }) = &mut self.target
            {
                *slot_bind_group = bind_group;
                *slot_texture = texture;
                *gradient_version = instance.gradient().version();
            }
        }

        match &mut self.target {
            Some(InstanceTarget::Pixels {
                texture,
                width,
                height,
                bytes_per_row,
                upload,
                ..
            }) => {
                let Some((pixels, w, _)) = instance.pixels() else {
                    return;
                };
                let tight = (4 * w) as usize;
                for (row, src) in upload
                    .chunks_exact_mut(*bytes_per_row as usize)
                    .zip(pixels.chunks_exact(tight))
                {
                    row[..tight].copy_from_slice(src);
                }
                self.queue.write_texture(
                    wgpu::TexelCopyTextureInfo {
                        texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    upload,
                    wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(*bytes_per_row),
                        rows_per_image: Some(*height),
                    },
                    wgpu::Extent3d {
                        width: *width,
                        height: *height,
                        depth_or_array_layers: 1,
                    },
                );
            }
            Some(InstanceTarget::Mesh {
                vertex_buffer,
                vertex_capacity,
                globals,
                ..
            }) => {
                let Some(displaced) = instance.displaced() else {
                    return;
                };
                let count = displaced.len().min(*vertex_capacity);
                self.queue
                    .write_buffer(vertex_buffer, 0, bytemuck::cast_slice(&displaced[..count]));

                let aspect = self.size.width as f32 / self.size.height.max(1) as f32;
                let proj = Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 100.0);
                let view = Mat4::look_at_rh(vec3(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
                let data = MeshGlobals {
                    mvp: (proj * view).to_cols_array_2d(),
                    model: Mat4::IDENTITY.to_cols_array_2d(),
                    light_dir: [0.0, 0.0, 1.0, 0.0],
                };
                self.queue
                    .write_buffer(globals, 0, bytemuck::bytes_of(&data));
            }
            None => {}
        }
    }
}

fn create_depth_view(device: &wgpu::Device, size: PhysicalSize<u32>) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth buffer"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
