use std::mem::offset_of;

use anyhow::{Result, anyhow};
use bytemuck::{NoUninit, Pod, Zeroable, bytes_of};
use glam::{Mat4, Vec2};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BlendState, Buffer, BufferBindingType, BufferDescriptor,
    BufferUsages, ColorTargetState, ColorWrites, ErrorFilter, FragmentState, FrontFace,
    MultisampleState, PipelineCompilationOptions, PipelineLayoutDescriptor, PolygonMode,
    PrimitiveState, PrimitiveTopology, RenderPipeline, RenderPipelineDescriptor,
    SamplerBindingType, ShaderStages, TextureSampleType, TextureViewDimension, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, VertexStepMode, include_wgsl,
};

use crate::renderer::{RenderContext, Sprite};

pub const POSITION_ATTRIBUTE: u32 = 0;
pub const TEX_COORDINATE_ATTRIBUTE: u32 = 1;

/// Vertex and fragment stages linked into one pipeline, plus the uniforms they
/// read: view and projection in group 0, the per-sprite model matrix in group 1.
#[derive(Debug)]
pub struct ShaderProgram {
    pub(in crate::renderer) pipeline: RenderPipeline,
    pub(in crate::renderer) camera_bind_group: BindGroup,
    pub(in crate::renderer) sprite_bind_group_layout: BindGroupLayout,
    camera_buf: Buffer,
    camera: CameraUniform,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(in crate::renderer) struct Vertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, NoUninit)]
struct CameraUniform {
    view: Mat4,
    projection: Mat4,
}

impl ShaderProgram {
    pub fn load(ctx: RenderContext) -> Result<Self> {
        ctx.device.push_error_scope(ErrorFilter::Validation);

        let vertex_shader = ctx
            .device
            .create_shader_module(include_wgsl!("vertex_textured.wgsl"));

        let fragment_shader = ctx
            .device
            .create_shader_module(include_wgsl!("fragment_textured.wgsl"));

        let camera = CameraUniform {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };

        let camera_buf = ctx.device.create_buffer(&BufferDescriptor {
            label: Some("shader program camera buffer"),
            size: size_of::<CameraUniform>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        ctx.queue.write_buffer(&camera_buf, 0, bytes_of(&camera));

        let camera_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&BindGroupLayoutDescriptor {
                    label: Some("shader program camera bind group layout"),
                    entries: &[BindGroupLayoutEntry {
                        binding: 0,
                        ty: BindingType::Buffer {
                            ty: BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                        visibility: ShaderStages::VERTEX,
                    }],
                });

        let camera_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("shader program camera bind group"),
            layout: &camera_bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buf.as_entire_binding(),
            }],
        });

        let sprite_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&BindGroupLayoutDescriptor {
                    label: Some("shader program sprite bind group layout"),
                    entries: &[
                        BindGroupLayoutEntry {
                            binding: 0,
                            ty: BindingType::Buffer {
                                ty: BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: None,
                            },
                            count: None,
                            visibility: ShaderStages::VERTEX,
                        },
                        BindGroupLayoutEntry {
                            binding: 1,
                            ty: BindingType::Texture {
                                sample_type: TextureSampleType::Float { filterable: false },
                                view_dimension: TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                            visibility: ShaderStages::FRAGMENT,
                        },
                        BindGroupLayoutEntry {
                            binding: 2,
                            ty: BindingType::Sampler(SamplerBindingType::NonFiltering),
                            count: None,
                            visibility: ShaderStages::FRAGMENT,
                        },
                    ],
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("shader program pipeline"),
                cache: None,
                depth_stencil: None,
                layout: Some(
                    &ctx.device
                        .create_pipeline_layout(&PipelineLayoutDescriptor {
                            label: Some("shader program pipeline layout"),
                            bind_group_layouts: &[
                                &camera_bind_group_layout,
                                &sprite_bind_group_layout,
                            ],
                            push_constant_ranges: &[],
                        }),
                ),
                multiview: None,
                primitive: PrimitiveState {
                    front_face: FrontFace::Ccw,
                    conservative: false,
                    cull_mode: None,
                    polygon_mode: PolygonMode::Fill,
                    strip_index_format: None,
                    topology: PrimitiveTopology::TriangleList,
                    unclipped_depth: false,
                },
                vertex: VertexState {
                    module: &vertex_shader,
                    entry_point: None,
                    compilation_options: PipelineCompilationOptions::default(),
                    buffers: &[VERTEX_BUFFER_LAYOUT],
                },
                fragment: Some(FragmentState {
                    module: &fragment_shader,
                    targets: &[Some(ColorTargetState {
                        blend: Some(BlendState::ALPHA_BLENDING),
                        format: ctx.surface_format,
                        write_mask: ColorWrites::all(),
                    })],
                    entry_point: None,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                multisample: MultisampleState::default(),
            });

        if let Some(error) = pollster::block_on(ctx.device.pop_error_scope()) {
            return Err(anyhow!("failed to build shader program: {error}"));
        }

        Ok(Self {
            pipeline,
            camera_bind_group,
            sprite_bind_group_layout,
            camera_buf,
            camera,
        })
    }

    pub fn set_view_matrix(&mut self, view: Mat4, ctx: RenderContext) {
        self.camera.view = view;
        ctx.queue.write_buffer(&self.camera_buf, 0, bytes_of(&self.camera));
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4, ctx: RenderContext) {
        self.camera.projection = projection;
        ctx.queue.write_buffer(&self.camera_buf, 0, bytes_of(&self.camera));
    }

    pub fn set_model_matrix(sprite: &Sprite, model: Mat4, ctx: RenderContext) {
        ctx.queue.write_buffer(&sprite.model_buf, 0, bytes_of(&model));
    }
}

pub(in crate::renderer) const VERTEX_BUFFER_LAYOUT: VertexBufferLayout<'static> =
    VertexBufferLayout {
        array_stride: size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &[
            VertexAttribute {
                format: VertexFormat::Float32x2,
                offset: offset_of!(Vertex, position) as u64,
                shader_location: POSITION_ATTRIBUTE,
            },
            VertexAttribute {
                format: VertexFormat::Float32x2,
                offset: offset_of!(Vertex, tex_coords) as u64,
                shader_location: TEX_COORDINATE_ATTRIBUTE,
            },
        ],
    };
