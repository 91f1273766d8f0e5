//! Player movement on the occupancy grid.
//!
//! Translations are tested one axis at a time (X first, then Y from the
//! new X), so walking diagonally into a wall slides along it instead of
//! stopping dead.

use glam::Vec2;

use crate::{
    math::{Angle, Vec2Ext},
    world::{OccupancyGrid, Pose},
};

/// Which axes of a translation were accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub moved_x: bool,
    pub moved_y: bool,
}

impl MoveResult {
    /// Neither axis moved although the request was non-zero.
    #[inline]
    pub fn blocked(&self) -> bool {
        !self.moved_x && !self.moved_y
    }
}

/// Move `pos` by `delta`, rejecting each axis whose destination cell is
/// solid (cells outside the grid count as solid).
pub fn slide(pos: &mut Vec2, delta: Vec2, grid: &OccupancyGrid) -> MoveResult {
    let mut res = MoveResult::default();

    let nx = pos.x + delta.x;
    if delta.x != 0.0 && !grid.is_solid(nx.floor() as i32, pos.y.floor() as i32) {
        pos.x = nx;
        res.moved_x = true;
    }
    let ny = pos.y + delta.y;
    if delta.y != 0.0 && !grid.is_solid(pos.x.floor() as i32, ny.floor() as i32) {
        pos.y = ny;
        res.moved_y = true;
    }
    res
}

impl Pose {
    /// `step` cells along the view direction.
    pub fn move_forward(&mut self, step: f32, grid: &OccupancyGrid) -> MoveResult {
        slide(&mut self.pos, self.dir.normalize_or_zero() * step, grid)
    }

    pub fn move_backward(&mut self, step: f32, grid: &OccupancyGrid) -> MoveResult {
        self.move_forward(-step, grid)
    }

    /// `step` cells towards the right edge of the screen.
    pub fn strafe_right(&mut self, step: f32, grid: &OccupancyGrid) -> MoveResult {
        slide(&mut self.pos, self.plane.normalize_or_zero() * step, grid)
    }

    pub fn strafe_left(&mut self, step: f32, grid: &OccupancyGrid) -> MoveResult {
        self.strafe_right(-step, grid)
    }

    /// Positive rotation, clockwise on a y-down screen.
    pub fn turn_right(&mut self, angle: Angle) {
        self.dir = self.dir.rotated(angle);
        self.plane = self.plane.rotated(angle);
    }

    pub fn turn_left(&mut self, angle: Angle) {
        self.turn_right(-angle);
    }
}
