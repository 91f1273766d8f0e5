//! Grid traversal (Digital Differential Analysis).
//!
//! A ray is marched one cell boundary at a time, always crossing whichever
//! axis boundary is nearer along the ray. No intersection point is computed
//! during the walk; only the hit cell and the last crossed axis are kept,
//! and the perpendicular distance is derived once at the end.

use glam::{IVec2, Vec2};

use crate::world::{EMPTY, OccupancyGrid, WallId};

/// Outcome of one ray walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Traversal {
    /// First non-empty cell entered.
    pub cell: IVec2,
    /// Wall id stored in `cell`.
    pub wall: WallId,
    /// `true` when a Y boundary (north/south face) was crossed last.
    pub side: bool,
    /// Distance to the wall along the camera's forward axis, in units of
    /// `ray_dir` (fisheye-free).
    pub perp_wall_dist: f32,
    pub ray_dir: Vec2,
    /// Cell boundaries crossed before the hit.
    pub steps: u32,
}

impl Traversal {
    /// World-space point where the ray meets the wall face.
    #[inline]
    pub fn hit_point(&self, pos: Vec2) -> Vec2 {
        pos + self.ray_dir * self.perp_wall_dist
    }
}

/// Ray length between two successive boundaries on each axis.
///
/// Only the ratio matters, so the ray length is taken as 1. An axis the ray
/// is parallel to gets `+∞`, which keeps the walk from ever stepping on it.
#[inline(always)]
pub fn delta_dist(ray_dir: Vec2) -> Vec2 {
    let axis = |d: f32| if d == 0.0 { f32::INFINITY } else { (1.0 / d).abs() };
    Vec2::new(axis(ray_dir.x), axis(ray_dir.y))
}

/// `-1` / `+1` cell step per axis (a zero component steps `+1`).
#[inline(always)]
pub fn step_dir(ray_dir: Vec2) -> IVec2 {
    IVec2::new(
        if ray_dir.x < 0.0 { -1 } else { 1 },
        if ray_dir.y < 0.0 { -1 } else { 1 },
    )
}

/// Ray length from `pos` to the first X and first Y boundary.
#[inline(always)]
pub fn initial_side_dist(ray_dir: Vec2, delta: Vec2, pos: Vec2, cell: IVec2) -> Vec2 {
    let rel_x = if ray_dir.x < 0.0 {
        pos.x - cell.x as f32
    } else {
        cell.x as f32 + 1.0 - pos.x
    };
    let rel_y = if ray_dir.y < 0.0 {
        pos.y - cell.y as f32
    } else {
        cell.y as f32 + 1.0 - pos.y
    };
    Vec2::new(rel_x, rel_y) * delta
}

/// Walk from `pos` along `ray_dir` until a wall cell is entered.
///
/// `ray_dir` must be non-zero. The grid's enclosure invariant guarantees
/// termination within `width + height` steps; a ray escaping the grid means
/// that invariant was broken and panics.
pub fn cast(grid: &OccupancyGrid, pos: Vec2, ray_dir: Vec2) -> Traversal {
    debug_assert!(ray_dir != Vec2::ZERO, "zero-length ray");

    let delta = delta_dist(ray_dir);
    let step = step_dir(ray_dir);
    let mut cell = OccupancyGrid::cell_of(pos);
    let mut side_dist = initial_side_dist(ray_dir, delta, pos, cell);
    let mut side = false;
    let mut steps = 0u32;

    let wall = loop {
        let Some(id) = grid.get(cell.x, cell.y) else {
            panic!("ray from {pos} along {ray_dir} left the grid at {cell}; map is not enclosed");
        };
        if id != EMPTY {
            break id;
        }
        if side_dist.x < side_dist.y {
            side_dist.x += delta.x;
            cell.x += step.x;
            side = false;
        } else {
            side_dist.y += delta.y;
            cell.y += step.y;
            side = true;
        }
        steps += 1;
    };

    Traversal {
        cell,
        wall,
        side,
        perp_wall_dist: perp_wall_dist(pos, ray_dir, cell, step, side),
        ray_dir,
        steps,
    }
}

/// Distance from the camera plane to the crossed boundary, measured in
/// multiples of `ray_dir`. Projecting onto the forward axis instead of
/// taking the Euclidean length is what removes the fisheye bowing.
#[inline(always)]
pub fn perp_wall_dist(pos: Vec2, ray_dir: Vec2, cell: IVec2, step: IVec2, side: bool) -> f32 {
    let d = if side {
        (cell.y as f32 - pos.y + (1 - step.y) as f32 / 2.0) / ray_dir.y
    } else {
        (cell.x as f32 - pos.x + (1 - step.x) as f32 / 2.0) / ray_dir.x
    };
    // standing on the face itself gives -0.0 for negative rays
    d.abs()
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
