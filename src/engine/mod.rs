pub mod dda;
pub mod frame;
pub mod planes;
pub mod visibility;
pub mod walls;

pub use dda::{Traversal, cast};
pub use frame::{Raycaster, RenderConfig, SceneError};
pub use visibility::{CellHits, VisibilityPolygon};
pub use walls::WallStrip;
