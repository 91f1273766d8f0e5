use std::path::Path;

use image::RgbaImage;
use log::info;

use super::LoadError;
use crate::{
    renderer::Rgba,
    world::{AtlasError, TextureAtlas},
};

/// Decode an in-memory PNG strip (height = tile size).
pub fn decode_atlas(bytes: &[u8]) -> Result<TextureAtlas, LoadError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    from_image(&img)
}

/// Load a PNG strip from disk.
pub fn load_atlas(path: impl AsRef<Path>) -> Result<TextureAtlas, LoadError> {
    let path = path.as_ref();
    let img = image::open(path)?.to_rgba8();
    let atlas = from_image(&img)?;
    info!(
        "atlas {}: {} tiles of {}x{}",
        path.display(),
        atlas.len(),
        atlas.tex_size(),
        atlas.tex_size()
    );
    Ok(atlas)
}

/// Write the atlas back out as a PNG strip.
pub fn save_atlas(atlas: &TextureAtlas, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let (width, height, pixels) = atlas.to_strip();
    let bytes = pixels.iter().flat_map(|&p| argb_to_rgba(p)).collect();
    let img = RgbaImage::from_raw(width as u32, height as u32, bytes)
        .ok_or(LoadError::ImageSize { width, height })?;
    img.save(path)?;
    Ok(())
}

fn from_image(img: &RgbaImage) -> Result<TextureAtlas, LoadError> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if w == 0 || h == 0 {
        return Err(AtlasError::NoTiles.into());
    }
    let pixels: Vec<Rgba> = img.pixels().map(|p| rgba_to_argb(p.0)).collect();
    Ok(TextureAtlas::from_strip(w, h, &pixels)?)
}

#[inline]
fn rgba_to_argb([r, g, b, a]: [u8; 4]) -> Rgba {
    u32::from_be_bytes([a, r, g, b])
}

#[inline]
fn argb_to_rgba(p: Rgba) -> [u8; 4] {
    let [a, r, g, b] = p.to_be_bytes();
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn channel_order() {
        assert_eq!(rgba_to_argb([0x11, 0x22, 0x33, 0xFF]), 0xFF_112233);
        assert_eq!(argb_to_rgba(0x80_445566), [0x44, 0x55, 0x66, 0x80]);
    }

    #[test]
    fn strip_png_decodes_into_tiles() {
        let img = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let atlas = decode_atlas(&png(&img)).unwrap();
        assert_eq!((atlas.len(), atlas.tex_size()), (2, 4));
        assert_eq!(atlas.texel(0, 3, 3, false), 0xFF_FF0000);
        assert_eq!(atlas.texel(1, 0, 0, false), 0xFF_0000FF);
        assert_eq!(atlas.texel(1, 0, 0, true), 0xFF_00007F);
    }

    #[test]
    fn non_square_strip_rejected() {
        let img = RgbaImage::new(6, 4);
        assert!(matches!(
            decode_atlas(&png(&img)),
            Err(LoadError::Atlas(AtlasError::NotSquareTiles {
                width: 6,
                height: 4
            }))
        ));
        assert!(matches!(
            decode_atlas(b"not a png"),
            Err(LoadError::Image(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let atlas = TextureAtlas::procedural(16, 8).unwrap();
        let path = std::env::temp_dir().join(format!("yacast-atlas-{}.png", std::process::id()));
        save_atlas(&atlas, &path).unwrap();
        let back = load_atlas(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, atlas);
    }
}
