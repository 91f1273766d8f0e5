//! Pixel side of the raycaster.
//!
//! *The engine never pokes a window directly.* It writes into a
//! [`Framebuffer`] and the caller hands the finished slice to whatever
//! presents it (`minifb` in the viewer, nothing at all in tests).
//!
//! * [`raster`] holds the 2-D primitives (lines, rectangles, discs,
//!   triangles) used by the minimap.
//! * [`minimap`] turns a visibility polygon into a top-down image.

pub mod minimap;
pub mod raster;

pub use minimap::{MinimapConfig, MinimapFlags, draw_minimap, minimap_scale, wall_colour};

/// Pixel format of every buffer in the crate (0xAARRGGBB).
pub type Rgba = u32;

pub const BLACK: Rgba = 0xFF_000000;
pub const WHITE: Rgba = 0xFF_FFFFFF;

/// Pack an opaque colour.
#[inline(always)]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split into `(r, g, b)`; alpha is dropped.
#[inline(always)]
pub const fn channels(c: Rgba) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Halve every colour channel, keep alpha.
#[inline(always)]
pub const fn dim(c: Rgba) -> Rgba {
    (c & 0xFF00_0000) | ((c >> 1) & 0x007F_7F7F)
}

/// `src` drawn over `dst` with coverage `alpha` (0 = keep dst, 1 = src).
pub fn blend(dst: Rgba, src: Rgba, alpha: f32) -> Rgba {
    let a = alpha.clamp(0.0, 1.0);
    let (dr, dg, db) = channels(dst);
    let (sr, sg, sb) = channels(src);
    let mix = |d: u8, s: u8| (d as f32 + (s as f32 - d as f32) * a).round() as u8;
    rgb(mix(dr, sr), mix(dg, sg), mix(db, sb))
}

/// Row-major RGBA frame-buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLACK; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Finished pixels, ready for `Window::update_with_buffer`.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    /// Change the resolution; contents are undefined afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels.resize(width * height, BLACK);
        }
    }

    pub fn clear(&mut self, colour: Rgba) {
        self.pixels.fill(colour);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Clipped write; off-screen coordinates are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, colour: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.pixels[y as usize * self.width + x as usize] = colour;
        }
    }

    /// Copy `src` with its top-left corner at `(dx, dy)`, clipped.
    pub fn blit(&mut self, src: &Framebuffer, dx: i32, dy: i32) {
        for sy in 0..src.height {
            let y = dy + sy as i32;
            if !(0..self.height as i32).contains(&y) {
                continue;
            }
            for sx in 0..src.width {
                self.put(dx + sx as i32, y, src.pixels[sy * src.width + sx]);
            }
        }
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
