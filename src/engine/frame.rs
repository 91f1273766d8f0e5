use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    engine::{
        dda::{self, Traversal},
        planes::draw_floor_and_ceiling,
        walls::{WallStrip, draw_wall},
    },
    renderer::{BLACK, Framebuffer, Rgba},
    world::{OccupancyGrid, Pose, TextureAtlas, TileId, WallId, camera_x},
};

/// Per-scene render settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Colour left in pixels nothing paints (the row just below each wall).
    pub clear: Rgba,
    pub floor_tile: TileId,
    pub ceiling_tile: TileId,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear: BLACK,
            floor_tile: 0,
            ceiling_tile: 4,
        }
    }
}

/// Grid and atlas that cannot be drawn together.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("wall id {wall} has no tile (atlas holds {tiles})")]
    MissingWallTile { wall: WallId, tiles: usize },

    #[error("{plane} tile {tile} is outside the atlas ({tiles} tiles)")]
    MissingPlaneTile {
        plane: &'static str,
        tile: TileId,
        tiles: usize,
    },
}

/// Owns one scene and draws frames of it.
///
/// `render` needs `&mut self` only for the scratch buffers; the output is
/// a pure function of the scene and the pose.
pub struct Raycaster {
    grid: OccupancyGrid,
    atlas: TextureAtlas,
    config: RenderConfig,
    /// Column-major scratch (`width` slices of `height` pixels).
    columns: Vec<Rgba>,
    /// Traversal of every column of the last frame, left to right.
    traversals: Vec<Traversal>,
}

impl Raycaster {
    pub fn new(
        grid: OccupancyGrid,
        atlas: TextureAtlas,
        config: RenderConfig,
    ) -> Result<Self, SceneError> {
        let tiles = atlas.len();
        let wall = grid.max_wall_id();
        if wall as usize >= tiles {
            return Err(SceneError::MissingWallTile { wall, tiles });
        }
        for (plane, tile) in [("floor", config.floor_tile), ("ceiling", config.ceiling_tile)] {
            if tile >= tiles {
                return Err(SceneError::MissingPlaneTile { plane, tile, tiles });
            }
        }
        debug!(
            "scene: {}x{} grid, {} tiles of {}px",
            grid.width(),
            grid.height(),
            tiles,
            atlas.tex_size()
        );
        Ok(Self {
            grid,
            atlas,
            config,
            columns: Vec::new(),
            traversals: Vec::new(),
        })
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[inline]
    pub fn atlas(&self) -> &TextureAtlas {
        &self.atlas
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Per-column traversals of the most recent `render` / `cast_columns`.
    #[inline]
    pub fn traversals(&self) -> &[Traversal] {
        &self.traversals
    }

    /// Draw one frame into `fb` (its size is the viewport).
    pub fn render(&mut self, pose: &Pose, fb: &mut Framebuffer) {
        let (w, h) = (fb.width(), fb.height());
        if w == 0 || h == 0 {
            self.traversals.clear();
            return;
        }
        self.columns.clear();
        self.columns.resize(w * h, self.config.clear);

        let scene = Scene {
            grid: &self.grid,
            atlas: &self.atlas,
            config: &self.config,
            pose,
            width: w,
        };

        #[cfg(feature = "parallel")]
        self.columns
            .par_chunks_mut(h)
            .enumerate()
            .map(|(x, column)| scene.column(x, column))
            .collect_into_vec(&mut self.traversals);

        #[cfg(not(feature = "parallel"))]
        {
            self.traversals.clear();
            self.traversals.extend(
                self.columns
                    .chunks_mut(h)
                    .enumerate()
                    .map(|(x, column)| scene.column(x, column)),
            );
        }

        // column-major scratch -> row-major frame
        let out = fb.pixels_mut();
        for (x, column) in self.columns.chunks(h).enumerate() {
            for (y, &px) in column.iter().enumerate() {
                out[y * w + x] = px;
            }
        }
    }

    /// Allocate a `width × height` frame and render into it.
    pub fn render_frame(&mut self, pose: &Pose, width: usize, height: usize) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height);
        self.render(pose, &mut fb);
        fb
    }

    /// Run only the traversal stage for `width` columns.
    pub fn cast_columns(&mut self, pose: &Pose, width: usize) -> &[Traversal] {
        self.traversals.clear();
        self.traversals.extend(
            (0..width).map(|x| dda::cast(&self.grid, pose.pos, pose.ray_dir(camera_x(x, width)))),
        );
        &self.traversals
    }
}

/// Borrowed, read-only view shared by all column workers.
struct Scene<'a> {
    grid: &'a OccupancyGrid,
    atlas: &'a TextureAtlas,
    config: &'a RenderConfig,
    pose: &'a Pose,
    width: usize,
}

impl Scene<'_> {
    /// Trace and paint screen column `x`; `column` is its `H` pixels.
    fn column(&self, x: usize, column: &mut [Rgba]) -> Traversal {
        let pos = self.pose.pos;
        let ray = self.pose.ray_dir(camera_x(x, self.width));
        let t = dda::cast(self.grid, pos, ray);

        let strip = WallStrip::project(&t, pos, column.len(), self.atlas.tex_size());
        draw_wall(column, &strip, self.atlas, t.wall as TileId, t.side);
        draw_floor_and_ceiling(
            column,
            &strip,
            &t,
            pos,
            self.atlas,
            self.config.floor_tile,
            self.config.ceiling_tile,
        );
        t
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
