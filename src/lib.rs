//! Grid raycaster: DDA wall casting, textured walls, floor and ceiling,
//! and a visibility-polygon minimap.
//!
//! ```no_run
//! use yacast_rs::{engine::Raycaster, world::{OccupancyGrid, Pose, TextureAtlas}};
//!
//! let grid = OccupancyGrid::room(8, 8)?;
//! let atlas = TextureAtlas::procedural(64, 8)?;
//! let mut rc = Raycaster::new(grid, atlas, Default::default())?;
//! let frame = rc.render_frame(&Pose::default(), 320, 200);
//! # let _ = frame;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assets;
pub mod engine;
pub mod math;
pub mod renderer;
pub mod sim;
pub mod world;

pub use engine::{Raycaster, RenderConfig, VisibilityPolygon};
pub use renderer::{Framebuffer, MinimapConfig, MinimapFlags, Rgba};
pub use world::{OccupancyGrid, Pose, TextureAtlas};
