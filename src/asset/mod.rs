#[macro_export]
macro_rules! asset_path {
    ($path:literal) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets/", $path)
    };
}

pub const ORBITER_TEXTURE: &str = asset_path!("orbiter.png");
pub const PULSER_TEXTURE: &str = asset_path!("pulser.png");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_decode_to_rgba() {
        for path in [ORBITER_TEXTURE, PULSER_TEXTURE] {
            let image = image::open(path)
                .unwrap_or_else(|error| panic!("{path}: {error}"))
                .to_rgba8();

            assert!(image.width() > 0 && image.height() > 0);
            assert_eq!(image.as_raw().len(), (image.width() * image.height() * 4) as usize);
        }
    }

    #[test]
    fn missing_texture_is_an_error() {
        assert!(image::open(asset_path!("missing.png")).is_err());
    }
}
