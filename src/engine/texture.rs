//! 2D image textures.
//!
//! Decoding happens on the CPU through the `image` crate and always ends in tightly
//! packed RGBA8, whatever the source format. Image rows run top to bottom while GL
//! texture coordinates start at the bottom-left, so decoded images are flipped
//! vertically before upload.

use std::path::Path;

use anyhow::{Context, Result};
use gl::types::{GLint, GLsizei, GLuint};
use image::DynamicImage;

/// Decoded RGBA8 pixels, bottom row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an encoded image (PNG, JPEG) held in memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).context("decoding image data")?;
        Ok(Self::from_dynamic(image))
    }

    /// Reads and decodes the image file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("failed to load image {}", path.display()))?;
        Ok(Self::from_dynamic(image))
    }

    fn from_dynamic(image: DynamicImage) -> Self {
        let rgba = image.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }
    }

    /// A single opaque white texel. Sampling it leaves vertex colors unchanged.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        }
    }

    /// RGBA value of the texel at (`x`, `y`), with `y = 0` being the bottom row.
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// GL texture object bound to `GL_TEXTURE_2D`.
#[derive(Debug)]
pub struct Texture {
    pub id: GLuint,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Uploads `image` with linear filtering and repeat wrapping. No mipmaps are built.
    pub fn upload(image: &TextureImage) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as *const _,
            );

            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        Self {
            id,
            width: image.width,
            height: image.height,
        }
    }

    /// Loads the image at `path`. A missing or undecodable file is logged and
    /// replaced by the white placeholder so the demo keeps rendering.
    pub fn load_or_placeholder(path: &Path) -> Self {
        let image = match TextureImage::open(path) {
            Ok(image) => {
                log::info!("loaded texture {} ({}x{})", path.display(), image.width, image.height);
                image
            }
            Err(e) => {
                log::error!("{e:#}; using placeholder texture");
                TextureImage::placeholder()
            }
        };
        Self::upload(&image)
    }

    /// Binds the texture to texture unit `unit` (`GL_TEXTURE0 + unit`).
    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn rgb_source_is_expanded_to_opaque_rgba() {
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let decoded = TextureImage::decode(&encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(decoded.texel(2, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn rows_are_flipped_so_bottom_comes_first() {
        // Top row red, bottom row blue in image space
        let rgb = RgbImage::from_fn(1, 2, |_, y| if y == 0 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        let decoded = TextureImage::decode(&encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();
        assert_eq!(decoded.texel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(decoded.texel(0, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(TextureImage::decode(b"not an image").is_err());
    }

    #[test]
    fn missing_file_error_names_path() {
        let err = TextureImage::open(Path::new("nope/missing.png")).unwrap_err();
        assert!(format!("{err:#}").contains("nope/missing.png"));
    }

    #[test]
    fn placeholder_is_one_white_texel() {
        let image = TextureImage::placeholder();
        assert_eq!(image.texel(0, 0), Some([255; 4]));
        assert_eq!(image.texel(1, 0), None);
    }

    #[test]
    fn bundled_textures_decode() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures");
        for name in ["room.png", "metal.png"] {
            let image = TextureImage::open(&root.join(name)).unwrap();
            assert!(image.width > 0 && image.height > 0);
            assert_eq!(image.pixels.len(), (image.width * image.height * 4) as usize);
        }
    }
}
