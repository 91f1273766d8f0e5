// Format-agnostic store of square wall / floor tiles.
// The asset loader decodes files; the renderer only ever asks for texels.

use crate::renderer::{Rgba, dim, rgb};

/// Index of a tile in the atlas. Wall id `n` is drawn with tile `n`.
pub type TileId = usize;

/// Things that can go wrong when building an atlas.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AtlasError {
    #[error("tile size must be non-zero")]
    ZeroTileSize,

    #[error("atlas needs at least one tile")]
    NoTiles,

    /// Strip width must be a whole number of square tiles.
    #[error("strip of {width}x{height} is not a row of square tiles")]
    NotSquareTiles { width: usize, height: usize },

    #[error("expected {expected} pixels, got {got}")]
    PixelCount { expected: usize, got: usize },
}

/// Read-only arena of square tiles plus a pre-dimmed copy of each.
///
/// * Tiles are `tex_size × tex_size`, row-major, stored back to back.
/// * The dimmed arena holds the same tiles with every channel halved; it is
///   built once here so the column loop only picks a slice.
///
/// **Thread-safety:** immutable after construction, hence `Sync`; render
/// workers may share it freely.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureAtlas {
    tex_size: usize,
    tiles: usize,
    lit: Vec<Rgba>,
    dimmed: Vec<Rgba>,
}

impl TextureAtlas {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Build from `tiles` concatenated square tiles.
    pub fn new(tex_size: usize, pixels: Vec<Rgba>) -> Result<Self, AtlasError> {
        if tex_size == 0 {
            return Err(AtlasError::ZeroTileSize);
        }
        let per_tile = tex_size * tex_size;
        if pixels.is_empty() {
            return Err(AtlasError::NoTiles);
        }
        if pixels.len() % per_tile != 0 {
            return Err(AtlasError::PixelCount {
                expected: pixels.len().div_ceil(per_tile) * per_tile,
                got: pixels.len(),
            });
        }
        let dimmed = pixels.iter().copied().map(dim).collect();
        Ok(Self {
            tex_size,
            tiles: pixels.len() / per_tile,
            lit: pixels,
            dimmed,
        })
    }

    /// Build from a horizontal strip image (`height` = tile size), the
    /// layout used by classic raycaster texture sheets.
    pub fn from_strip(width: usize, height: usize, pixels: &[Rgba]) -> Result<Self, AtlasError> {
        if height == 0 {
            return Err(AtlasError::ZeroTileSize);
        }
        if width == 0 || width % height != 0 {
            return Err(AtlasError::NotSquareTiles { width, height });
        }
        if pixels.len() != width * height {
            return Err(AtlasError::PixelCount {
                expected: width * height,
                got: pixels.len(),
            });
        }
        let size = height;
        let tiles = width / size;
        let mut arena = Vec::with_capacity(pixels.len());
        for tile in 0..tiles {
            for row in 0..size {
                let start = row * width + tile * size;
                arena.extend_from_slice(&pixels[start..start + size]);
            }
        }
        Self::new(size, arena)
    }

    /// Generated tiles, handy when no texture sheet is supplied.
    pub fn procedural(tex_size: usize, tiles: usize) -> Result<Self, AtlasError> {
        if tiles == 0 {
            return Err(AtlasError::NoTiles);
        }
        let mut pixels = Vec::with_capacity(tex_size * tex_size * tiles);
        for tile in 0..tiles {
            for y in 0..tex_size {
                for x in 0..tex_size {
                    pixels.push(procedural_texel(tile, x, y, tex_size));
                }
            }
        }
        Self::new(tex_size, pixels)
    }

    /// Lay the tiles back out as one horizontal strip `(width, height, px)`.
    pub fn to_strip(&self) -> (usize, usize, Vec<Rgba>) {
        let size = self.tex_size;
        let width = size * self.tiles;
        let mut out = vec![0; width * size];
        for tile in 0..self.tiles {
            let src = self.tile(tile, false);
            for row in 0..size {
                let dst = row * width + tile * size;
                out[dst..dst + size].copy_from_slice(&src[row * size..(row + 1) * size]);
            }
        }
        (width, size, out)
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn tex_size(&self) -> usize {
        self.tex_size
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles == 0
    }

    /// Borrow one tile's pixels, lit or dimmed.
    ///
    /// Panics when `id >= len()`; scene construction checks every wall id.
    #[inline(always)]
    pub fn tile(&self, id: TileId, dimmed: bool) -> &[Rgba] {
        let per_tile = self.tex_size * self.tex_size;
        let arena = if dimmed { &self.dimmed } else { &self.lit };
        &arena[id * per_tile..(id + 1) * per_tile]
    }

    /// Single texel by `(tile, row, column)`.
    #[inline]
    pub fn texel(&self, id: TileId, row: usize, col: usize, dimmed: bool) -> Rgba {
        self.tile(id, dimmed)[row * self.tex_size + col]
    }
}

/// One of eight hand-rolled patterns, cycled for higher tile numbers.
///
/// Tile 0 is a grey checkerboard (floor), tile 4 a plank pattern (ceiling).
fn procedural_texel(tile: TileId, x: usize, y: usize, size: usize) -> Rgba {
    let cell = (size / 8).max(1);
    let xor = ((x ^ y) * 256 / size) as u8;
    let ramp = (y * 256 / size) as u8;
    match tile % 8 {
        0 => {
            if ((x / cell) ^ (y / cell)) & 1 == 0 {
                rgb(112, 112, 112)
            } else {
                rgb(80, 80, 80)
            }
        }
        1 => {
            // red bricks, every other course shifted by half a brick
            let course = (size / 4).max(1);
            let shift = if (y / course) % 2 == 0 { 0 } else { size / 4 };
            let mortar = y % course == 0 || (x + shift) % (size / 2).max(1) == 0;
            if mortar { rgb(200, 200, 190) } else { rgb(170, 40, 30) }
        }
        2 => {
            if (x + y) / cell % 2 == 0 { rgb(40, 160, 60) } else { rgb(20, 110, 40) }
        }
        3 => rgb(0, 0, xor),
        4 => {
            let plank = x % (size / 4).max(1) == 0;
            if plank { rgb(70, 45, 25) } else { rgb(140, 100, 60 + ramp / 4) }
        }
        5 => {
            let ring = x.min(y).min(size - 1 - x).min(size - 1 - y) / cell;
            if ring % 2 == 0 { rgb(0, 190, 190) } else { rgb(0, 110, 130) }
        }
        6 => rgb(xor, 0, xor),
        _ => rgb(ramp, ramp, 0),
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimmed_arena_halves_every_texel() {
        let atlas = TextureAtlas::new(2, vec![0xFF_FFFFFF, 0xFF_804020, 0xFF_000000, 0xFF_020202])
            .unwrap();
        assert_eq!(atlas.len(), 1);
        assert_eq!(atlas.texel(0, 0, 0, true), 0xFF_7F7F7F);
        assert_eq!(atlas.texel(0, 0, 1, true), 0xFF_402010);
        assert_eq!(atlas.texel(0, 1, 1, true), 0xFF_010101);
        assert_eq!(atlas.texel(0, 0, 1, false), 0xFF_804020);
    }

    #[test]
    fn strip_is_split_into_tiles() {
        // two 2x2 tiles: left all 1s, right all 2s
        let strip = vec![1, 1, 2, 2, 1, 1, 2, 2];
        let atlas = TextureAtlas::from_strip(4, 2, &strip).unwrap();
        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.tex_size(), 2);
        assert!(atlas.tile(0, false).iter().all(|&p| p == 1));
        assert!(atlas.tile(1, false).iter().all(|&p| p == 2));
        assert_eq!(atlas.to_strip(), (4, 2, strip));
    }

    #[test]
    fn bad_shapes_rejected() {
        assert_eq!(
            TextureAtlas::from_strip(5, 2, &[0; 10]).unwrap_err(),
            AtlasError::NotSquareTiles {
                width: 5,
                height: 2
            }
        );
        assert_eq!(
            TextureAtlas::from_strip(4, 2, &[0; 7]).unwrap_err(),
            AtlasError::PixelCount {
                expected: 8,
                got: 7
            }
        );
        assert_eq!(
            TextureAtlas::new(0, vec![0]).unwrap_err(),
            AtlasError::ZeroTileSize
        );
        assert_eq!(
            TextureAtlas::new(2, vec![0; 5]).unwrap_err(),
            AtlasError::PixelCount {
                expected: 8,
                got: 5
            }
        );
    }

    #[test]
    fn procedural_atlas_has_requested_tiles() {
        let atlas = TextureAtlas::procedural(64, 8).unwrap();
        assert_eq!(atlas.len(), 8);
        assert_eq!(atlas.tile(7, true).len(), 64 * 64);
        // floor checkerboard alternates every eight texels
        assert_ne!(atlas.texel(0, 0, 0, false), atlas.texel(0, 0, 8, false));
        assert_eq!(atlas.texel(0, 0, 0, false), atlas.texel(0, 8, 8, false));
    }
}
