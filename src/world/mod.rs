mod grid;
mod pose;
mod texture;

pub use grid::{EMPTY, GridError, OccupancyGrid, WallId};

pub use pose::{DEFAULT_PLANE_LEN, Pose, PoseError, camera_x};

pub use texture::{AtlasError, TextureAtlas, TileId};
