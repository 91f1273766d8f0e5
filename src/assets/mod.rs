// ──────────────────────────────────────────────────────────────────────────
// assets/
//
//  *   text map   (assets::map)     ──>  world::OccupancyGrid
//  *   PNG strip  (assets::atlas)   ──>  world::TextureAtlas
// ──────────────────────────────────────────────────────────────────────────

pub mod atlas;
pub mod map;

pub use atlas::{decode_atlas, load_atlas, save_atlas};
pub use map::{MapError, load_map, parse_map};

use thiserror::Error;

use crate::world::AtlasError;

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error("image of {width}x{height} is too large for an RGBA buffer")]
    ImageSize { width: usize, height: usize },
}
