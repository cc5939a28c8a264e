use std::path::Path;

use anyhow::{Context, Result};
use image::EncodableLayout;
use wgpu::{
    Extent3d, Origin3d, TexelCopyBufferLayout, TexelCopyTextureInfo, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor,
};

use crate::renderer::RenderContext;

#[derive(Debug)]
pub struct Texture {
    pub(in crate::renderer) view: TextureView,
}

impl Texture {
    /// Decodes the image at `path` and uploads it as an sRGB RGBA texture.
    pub fn load(path: impl AsRef<Path>, ctx: RenderContext) -> Result<Self> {
        let path = path.as_ref();

        let image = image::open(path)
            .with_context(|| format!("unable to load image {}", path.display()))?
            .to_rgba8();

        let texture = ctx.device.create_texture(&TextureDescriptor {
            label: Some("texture"),
            size: Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                aspect: TextureAspect::All,
                mip_level: 0,
                origin: Origin3d::ZERO,
            },
            image.as_bytes(),
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.width() * 4),
                rows_per_image: Some(image.height()),
            },
            texture.size(),
        );

        let view = texture.create_view(&TextureViewDescriptor::default());

        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Self { view })
    }
}
