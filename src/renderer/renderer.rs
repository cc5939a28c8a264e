use anyhow::Result;
use bytemuck::bytes_of;
use glam::vec2;
use wgpu::{
    AddressMode, Buffer, BufferUsages, Device, FilterMode, Queue, Sampler, SamplerDescriptor,
    TextureFormat,
    util::{BufferInitDescriptor, DeviceExt},
};

use crate::{
    game::GameContext,
    renderer::{ShaderProgram, Vertex, projection_matrix, view_matrix},
};

#[derive(Debug)]
pub struct Renderer {
    pub(in crate::renderer) vertex_buf: Buffer,
    pub(in crate::renderer) sampler: Sampler,
    pub(in crate::renderer) shader_program: ShaderProgram,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub device: &'a Device,
    pub queue: &'a Queue,
    pub surface_format: TextureFormat,
}

pub(in crate::renderer) const QUAD_VERTEX_COUNT: u32 = 6;

/// Two triangles covering a unit square, image top at the quad top.
const QUAD_VERTICES: [Vertex; QUAD_VERTEX_COUNT as usize] = [
    Vertex {
        position: vec2(-0.5, -0.5),
        tex_coords: vec2(0.0, 1.0),
    },
    Vertex {
        position: vec2(0.5, -0.5),
        tex_coords: vec2(1.0, 1.0),
    },
    Vertex {
        position: vec2(0.5, 0.5),
        tex_coords: vec2(1.0, 0.0),
    },
    Vertex {
        position: vec2(-0.5, -0.5),
        tex_coords: vec2(0.0, 1.0),
    },
    Vertex {
        position: vec2(0.5, 0.5),
        tex_coords: vec2(1.0, 0.0),
    },
    Vertex {
        position: vec2(-0.5, 0.5),
        tex_coords: vec2(0.0, 0.0),
    },
];

impl Renderer {
    pub fn new(ctx: RenderContext) -> Result<Self> {
        let vertex_buf = ctx.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("renderer vertex buffer"),
            contents: bytes_of(&QUAD_VERTICES),
            usage: BufferUsages::VERTEX,
        });

        let sampler = ctx.device.create_sampler(&SamplerDescriptor {
            label: Some("renderer sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            anisotropy_clamp: 1,
            border_color: None,
            compare: None,
            lod_max_clamp: 1.0,
            lod_min_clamp: 1.0,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
        });

        let mut shader_program = ShaderProgram::load(ctx)?;
        shader_program.set_projection_matrix(projection_matrix(), ctx);
        shader_program.set_view_matrix(view_matrix(), ctx);

        Ok(Self {
            vertex_buf,
            sampler,
            shader_program,
        })
    }
}

impl<'a> From<GameContext<'a>> for RenderContext<'a> {
    fn from(value: GameContext<'a>) -> Self {
        Self {
            device: value.device,
            queue: value.queue,
            surface_format: value.surface_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles_over_the_unit_square() {
        let positions: Vec<_> = QUAD_VERTICES.iter().map(|vertex| vertex.position).collect();

        assert_eq!(positions[0], positions[3]);
        assert_eq!(positions[2], positions[4]);
        assert!(
            positions
                .iter()
                .all(|position| position.x.abs() == 0.5 && position.y.abs() == 0.5)
        );
    }

    #[test]
    fn quad_top_samples_image_top() {
        for vertex in QUAD_VERTICES {
            let expected_v = if vertex.position.y > 0.0 { 0.0 } else { 1.0 };
            let expected_u = if vertex.position.x > 0.0 { 1.0 } else { 0.0 };

            assert_eq!(vertex.tex_coords, vec2(expected_u, expected_v));
        }
    }
}
