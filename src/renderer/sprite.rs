use bytemuck::bytes_of;
use glam::Mat4;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindingResource, Buffer, BufferUsages,
    util::{BufferInitDescriptor, DeviceExt},
};

use crate::renderer::{RenderContext, Renderer, Texture};

/// A textured quad's GPU side: its texture binding and its own model matrix
/// uniform.
#[derive(Debug)]
pub struct Sprite {
    pub(in crate::renderer) model_buf: Buffer,
    pub(in crate::renderer) bind_group: BindGroup,
}

impl Sprite {
    pub fn new(texture: &Texture, renderer: &Renderer, ctx: RenderContext) -> Self {
        let model_buf = ctx.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("sprite model buffer"),
            contents: bytes_of(&Mat4::IDENTITY),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("sprite bind group"),
            layout: &renderer.shader_program.sprite_bind_group_layout,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: model_buf.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::TextureView(&texture.view),
                },
                BindGroupEntry {
                    binding: 2,
                    resource: BindingResource::Sampler(&renderer.sampler),
                },
            ],
        });

        Self {
            model_buf,
            bind_group,
        }
    }
}
