use glam::{Mat4, Vec4, vec4};

mod render_frame;
mod renderer;
mod shader_program;
mod sprite;
mod texture;
pub use renderer::*;
pub use shader_program::*;
pub use sprite::*;
pub use texture::*;

pub const WINDOW_TITLE: &str = "Hello, Textures!";
pub const WINDOW_WIDTH: u32 = 700 * 2;
pub const WINDOW_HEIGHT: u32 = 500 * 2;

const VIEWPORT_X: u32 = 0;
const VIEWPORT_Y: u32 = 0;
const VIEWPORT_WIDTH: u32 = WINDOW_WIDTH;
const VIEWPORT_HEIGHT: u32 = WINDOW_HEIGHT;

const CLEAR_COLOR: Vec4 = vec4(0.9765625, 0.97265625, 0.9609375, 1.0);

const ORTHO_LEFT: f32 = -5.0;
const ORTHO_RIGHT: f32 = 5.0;
const ORTHO_BOTTOM: f32 = -3.75;
const ORTHO_TOP: f32 = 3.75;
const ORTHO_NEAR: f32 = -1.0;
const ORTHO_FAR: f32 = 1.0;

pub fn projection_matrix() -> Mat4 {
    Mat4::orthographic_rh(
        ORTHO_LEFT,
        ORTHO_RIGHT,
        ORTHO_BOTTOM,
        ORTHO_TOP,
        ORTHO_NEAR,
        ORTHO_FAR,
    )
}

pub fn view_matrix() -> Mat4 {
    Mat4::IDENTITY
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, vec2, vec3};

    use super::*;

    #[test]
    fn projection_maps_bounds_to_clip_edges() {
        let projection = projection_matrix();

        let bottom_left = projection.project_point3(vec3(ORTHO_LEFT, ORTHO_BOTTOM, 0.0));
        let top_right = projection.project_point3(vec3(ORTHO_RIGHT, ORTHO_TOP, 0.0));

        assert!(bottom_left.truncate().abs_diff_eq(vec2(-1.0, -1.0), 1e-6));
        assert!(top_right.truncate().abs_diff_eq(vec2(1.0, 1.0), 1e-6));
    }

    #[test]
    fn projection_keeps_the_quad_plane_inside_depth_range() {
        let depth = projection_matrix().project_point3(Vec3::ZERO).z;

        assert!((0.0..=1.0).contains(&depth));
    }
}
