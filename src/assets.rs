use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{RoundelError, RoundelResult};
use crate::plan::ImageInfo;

/// A decoded input raster, premultiplied and in cairo's `ARgb32` channel
/// order (b, g, r, a bytes on little-endian targets).
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bgra8_premul: Vec<u8>,
}

/// All inputs, decoded exactly once at startup and read by index after.
#[derive(Debug, Default)]
pub struct ImageSet {
    images: Vec<SourceImage>,
}

impl ImageSet {
    pub fn load(paths: &[PathBuf]) -> RoundelResult<Self> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            images.push(load_one(path)?);
        }
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> &SourceImage {
        &self.images[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceImage> {
        self.images.iter()
    }

    pub fn infos(&self) -> Vec<ImageInfo> {
        self.images
            .iter()
            .map(|img| ImageInfo {
                width: img.width,
                height: img.height,
            })
            .collect()
    }
}

fn load_one(path: &Path) -> RoundelResult<SourceImage> {
    let bytes = std::fs::read(path).map_err(|e| RoundelError::image_load(path, e))?;
    let decoded = decode_image(&bytes).map_err(|e| RoundelError::image_load(path, e))?;
    tracing::debug!(
        path = %path.display(),
        width = decoded.width,
        height = decoded.height,
        "decoded input image"
    );
    Ok(SourceImage {
        path: path.to_path_buf(),
        width: decoded.width,
        height: decoded.height,
        bgra8_premul: decoded.bgra8_premul,
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub bgra8_premul: Vec<u8>,
}

pub(crate) fn decode_image(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    premultiply_rgba8_in_place(&mut pixels);
    swap_rgba8_to_bgra8_in_place(&mut pixels);

    Ok(DecodedImage {
        width,
        height,
        bgra8_premul: pixels,
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn swap_rgba8_to_bgra8_in_place(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_premultiplies_and_swaps_to_bgra() {
        let decoded = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
        assert_eq!(decoded.width, 1);
        assert_eq!(decoded.height, 1);
        let pm = |c: u16| ((c * 128 + 127) / 255) as u8;
        assert_eq!(
            decoded.bgra8_premul,
            vec![pm(200), pm(50), pm(100), 128u8]
        );
    }

    #[test]
    fn decode_zero_alpha_clears_color_channels() {
        let decoded = decode_image(&png_bytes(1, 1, [100, 50, 200, 0])).unwrap();
        assert_eq!(decoded.bgra8_premul, vec![0, 0, 0, 0]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not a png").is_err());
    }

    #[test]
    fn load_keeps_input_order_and_dimensions() {
        let dir = PathBuf::from("target").join("assets_tests");
        std::fs::create_dir_all(&dir).unwrap();

        let a = dir.join("a.png");
        let b = dir.join("b.png");
        image::RgbaImage::from_pixel(200, 100, image::Rgba([255, 0, 0, 255]))
            .save(&a)
            .unwrap();
        image::RgbaImage::from_pixel(120, 340, image::Rgba([0, 255, 0, 255]))
            .save(&b)
            .unwrap();

        let set = ImageSet::load(&[a.clone(), b]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).path, a);
        assert_eq!(
            set.infos(),
            vec![
                ImageInfo {
                    width: 200,
                    height: 100
                },
                ImageInfo {
                    width: 120,
                    height: 340
                }
            ]
        );
    }

    #[test]
    fn load_surfaces_the_missing_path() {
        let err = ImageSet::load(&[PathBuf::from("target/definitely-missing.png")]).unwrap_err();
        match err {
            RoundelError::ImageLoad { path, .. } => {
                assert!(path.ends_with("definitely-missing.png"));
            }
            other => panic!("expected ImageLoad, got {other:?}"),
        }
    }
}
