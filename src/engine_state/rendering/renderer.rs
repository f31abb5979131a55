//! # World Renderer
//!
//! Owns the two render pipelines (opaque terrain and translucent water),
//! the bind groups they share, the depth buffer, and the per-chunk GPU mesh
//! upload path.
//!
//! Each frame the renderer lazily remeshes and uploads any dirty chunk
//! inside the render window, then draws all opaque geometry followed by all
//! water geometry in a single render pass. Water is drawn last with alpha
//! blending and no depth writes so terrain stays visible through it.

use cgmath::Point3;
use wgpu::util::DeviceExt;

use crate::engine_state::camera_state::CameraState;
use crate::engine_state::voxels::chunk::Chunk;
use crate::engine_state::voxels::world::World;

use super::texture::Texture;
use super::vertex::Vertex;

/// RGBA clear color used for the sky.
const SKY_COLOR: wgpu::Color = wgpu::Color {
    r: 0.47,
    g: 0.71,
    b: 0.89,
    a: 1.0,
};

/// GPU-resident copy of a chunk's mesh.
///
/// Either buffer is absent when the corresponding CPU buffer was empty at
/// upload time; a fully empty chunk carries neither.
pub struct ChunkGpuMesh {
    /// Opaque vertex buffer and its vertex count.
    pub opaque: Option<(wgpu::Buffer, u32)>,
    /// Water vertex buffer and its vertex count.
    pub water: Option<(wgpu::Buffer, u32)>,
    /// Bind group exposing the chunk's model uniform (world-space origin).
    pub model_bind_group: wgpu::BindGroup,
}

/// Per-chunk uniform holding the chunk's world-space origin.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    origin: [f32; 4],
}

/// Manages the WebGPU rendering process and associated rendering resources.
pub struct WorldRenderer {
    terrain_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    model_bind_group_layout: wgpu::BindGroupLayout,
    depth_texture: Texture,
}

impl WorldRenderer {
    /// Creates the renderer and all of its GPU resources.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue for resource uploads
    /// * `config` - Surface configuration containing size and format
    /// * `camera_state` - Camera state whose uniform buffer is bound at group 0
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &wgpu::SurfaceConfiguration,
        camera_state: &CameraState,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Voxel Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let atlas = Texture::from_png_bytes(
            device,
            queue,
            include_bytes!("../../../assets/atlas.png"),
            "Sprite Atlas",
        );

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_state.camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        // This should match the filterable field of the corresponding Texture entry above.
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some("texture_bind_group_layout"),
            });

        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
            label: Some("texture_bind_group"),
        });

        let model_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("model_bind_group_layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Voxel Pipeline Layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &texture_bind_group_layout,
                &model_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });

        let terrain_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Terrain Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_terrain"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Water keeps depth testing but not depth writes, and is drawn from
        // both sides so the surface stays visible from underwater.
        let water_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_water"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Texture::create_depth_texture(device, config, "Depth Texture");

        WorldRenderer {
            terrain_pipeline,
            water_pipeline,
            camera_bind_group,
            texture_bind_group,
            model_bind_group_layout,
            depth_texture,
        }
    }

    /// Recreates the depth buffer after a surface resize.
    pub fn resize(&mut self, device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) {
        self.depth_texture = Texture::create_depth_texture(device, config, "Depth Texture");
    }

    /// Ensures a chunk has an up-to-date GPU mesh.
    ///
    /// Rebuilds the CPU mesh if the chunk is dirty, then uploads both vertex
    /// buffers and the chunk's model uniform if no GPU copy exists.
    fn prepare_chunk(&self, device: &wgpu::Device, chunk: &mut Chunk) {
        if chunk.dirty {
            chunk.rebuild_mesh();
        }
        if chunk.gpu_mesh.is_some() {
            return;
        }

        let upload = |vertices: &[Vertex], label: &str| -> Option<(wgpu::Buffer, u32)> {
            if vertices.is_empty() {
                return None;
            }
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            Some((buffer, vertices.len() as u32))
        };

        let model_uniform = ModelUniform {
            origin: [chunk.position.x, chunk.position.y, chunk.position.z, 0.0],
        };
        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("chunk_model_buffer"),
            contents: bytemuck::cast_slice(&[model_uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.model_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
            label: Some("chunk_model_bind_group"),
        });

        chunk.gpu_mesh = Some(ChunkGpuMesh {
            opaque: upload(&chunk.opaque_vertices, "chunk_opaque_vertex_buffer"),
            water: upload(&chunk.water_vertices, "chunk_water_vertex_buffer"),
            model_bind_group,
        });
    }

    /// Renders one frame of the world into `target`.
    ///
    /// Selects the chunks inside the render window around the camera,
    /// prepares their GPU meshes, and draws opaque geometry then water in a
    /// single depth-buffered pass.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue the command buffer is submitted to
    /// * `target` - The surface texture view to draw into
    /// * `world` - The chunk registry
    /// * `camera_position` - The camera's world position, used for windowing
    /// * `render_radius` - Half-width of the square chunk window
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        world: &mut World,
        camera_position: Point3<f32>,
        render_radius: i32,
    ) {
        let visible = world.chunks_in_render_radius(camera_position, render_radius);
        for grid in &visible {
            if let Some(chunk) = world.get_chunk_at_mut(*grid) {
                self.prepare_chunk(device, chunk);
            }
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("World Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("World Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_bind_group(1, &self.texture_bind_group, &[]);

            render_pass.set_pipeline(&self.terrain_pipeline);
            for grid in &visible {
                let Some(gpu_mesh) = world.get_chunk_at(*grid).and_then(|c| c.gpu_mesh.as_ref())
                else {
                    continue;
                };
                if let Some((buffer, count)) = &gpu_mesh.opaque {
                    render_pass.set_bind_group(2, &gpu_mesh.model_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..*count, 0..1);
                }
            }

            render_pass.set_pipeline(&self.water_pipeline);
            for grid in &visible {
                let Some(gpu_mesh) = world.get_chunk_at(*grid).and_then(|c| c.gpu_mesh.as_ref())
                else {
                    continue;
                };
                if let Some((buffer, count)) = &gpu_mesh.water {
                    render_pass.set_bind_group(2, &gpu_mesh.model_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..*count, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
