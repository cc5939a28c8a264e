use glam::{Mat4, Vec4, vec4};
use wgpu::{
    Color, CommandEncoderDescriptor, LoadOp, Operations, RenderPassColorAttachment,
    RenderPassDescriptor, StoreOp, TextureFormat, TextureView,
};

use crate::renderer::{
    CLEAR_COLOR, QUAD_VERTEX_COUNT, RenderContext, Renderer, ShaderProgram, Sprite,
    VIEWPORT_HEIGHT, VIEWPORT_WIDTH, VIEWPORT_X, VIEWPORT_Y,
};

/// Sprites queued for one frame. Dropping the frame clears the output, draws the
/// queued sprites in order and submits.
pub struct RenderFrame<'a> {
    renderer: &'a Renderer,
    output: &'a TextureView,
    ctx: RenderContext<'a>,
    sprites: Vec<&'a Sprite>,
}

impl Renderer {
    pub fn render_frame<'a>(
        &'a self,
        f: impl FnOnce(&mut RenderFrame<'a>),
        output: &'a TextureView,
        ctx: RenderContext<'a>,
    ) {
        f(&mut RenderFrame {
            renderer: self,
            output,
            ctx,
            sprites: Vec::with_capacity(2),
        })
    }
}

impl<'a> RenderFrame<'a> {
    pub fn draw_sprite(&mut self, sprite: &'a Sprite, model: Mat4) {
        ShaderProgram::set_model_matrix(sprite, model, self.ctx);

        self.sprites.push(sprite);
    }
}

impl<'a> Drop for RenderFrame<'a> {
    fn drop(&mut self) {
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&CommandEncoderDescriptor::default());

        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("render frame pass"),
                timestamp_writes: None,
                occlusion_query_set: None,
                depth_stencil_attachment: None,
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: self.output,
                    depth_slice: None,
                    ops: Operations {
                        load: LoadOp::Clear(clear_value(self.output.texture().format())),
                        store: StoreOp::Store,
                    },
                    resolve_target: None,
                })],
            });

            let (width, height) = viewport_extent(
                self.output.texture().width(),
                self.output.texture().height(),
            );

            pass.set_viewport(
                VIEWPORT_X as f32,
                VIEWPORT_Y as f32,
                width as f32,
                height as f32,
                0.0,
                1.0,
            );

            let program = &self.renderer.shader_program;

            pass.set_pipeline(&program.pipeline);
            pass.set_vertex_buffer(0, self.renderer.vertex_buf.slice(..));
            pass.set_bind_group(0, &program.camera_bind_group, &[]);

            for sprite in &self.sprites {
                pass.set_bind_group(1, &sprite.bind_group, &[]);
                pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
            }
        }

        self.ctx.queue.submit([encoder.finish()]);
    }
}

/// Clear value that stores `CLEAR_COLOR` as written. sRGB outputs encode on
/// store, so their clear value is decoded first.
fn clear_value(format: TextureFormat) -> Color {
    let color = if format.is_srgb() {
        srgb_to_linear(CLEAR_COLOR)
    } else {
        CLEAR_COLOR
    };

    Color {
        r: color.x as f64,
        g: color.y as f64,
        b: color.z as f64,
        a: color.w as f64,
    }
}

fn srgb_to_linear(color: Vec4) -> Vec4 {
    let decode = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    vec4(decode(color.x), decode(color.y), decode(color.z), color.w)
}

/// The fixed viewport, cut down to whatever part of the output exists.
fn viewport_extent(output_width: u32, output_height: u32) -> (u32, u32) {
    (
        VIEWPORT_WIDTH.min(output_width.saturating_sub(VIEWPORT_X)),
        VIEWPORT_HEIGHT.min(output_height.saturating_sub(VIEWPORT_Y)),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn viewport_is_fixed_when_output_is_large_enough() {
        assert_eq!(
            viewport_extent(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            (VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
        );
        assert_eq!(
            viewport_extent(VIEWPORT_WIDTH * 2, VIEWPORT_HEIGHT * 2),
            (VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
        );
    }

    #[test]
    fn viewport_never_exceeds_output() {
        assert_eq!(viewport_extent(800, 600), (800, 600));
        assert_eq!(viewport_extent(0, 0), (0, 0));
    }

    fn encode_srgb(c: f64) -> f64 {
        if c <= 0.0031308 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    }

    #[test]
    fn clear_value_is_raw_on_linear_outputs() {
        let color = clear_value(TextureFormat::Rgba8Unorm);

        assert_eq!(color.r, CLEAR_COLOR.x as f64);
        assert_eq!(color.g, CLEAR_COLOR.y as f64);
        assert_eq!(color.b, CLEAR_COLOR.z as f64);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn clear_value_stores_the_constant_on_srgb_outputs() {
        for format in [TextureFormat::Bgra8UnormSrgb, TextureFormat::Rgba8UnormSrgb] {
            let color = clear_value(format);

            assert_abs_diff_eq!(encode_srgb(color.r), CLEAR_COLOR.x as f64, epsilon = 1e-5);
            assert_abs_diff_eq!(encode_srgb(color.g), CLEAR_COLOR.y as f64, epsilon = 1e-5);
            assert_abs_diff_eq!(encode_srgb(color.b), CLEAR_COLOR.z as f64, epsilon = 1e-5);
            assert_eq!(color.a, 1.0);
            assert!(color.r < CLEAR_COLOR.x as f64);
        }
    }
}
