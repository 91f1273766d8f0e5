use std::time::{Duration, Instant};

use super::InputCmd;
use crate::{
    math::Angle,
    world::{OccupancyGrid, Pose},
};

pub const SIM_FPS: u32 = 35;
pub const DT: f32 = 1.0 / SIM_FPS as f32;
const TIC: Duration = Duration::from_micros(1_000_000 / SIM_FPS as u64);

pub const MOVE_SPEED: f32 = 3.5; // cells / second
pub const TURN_SPEED: f32 = 1.2; // rad / second
pub const RUN_FACTOR: f32 = 2.0; // Shift

/// Advances the player at a fixed rate, independent of frame rate.
pub struct TicRunner {
    last: Instant,
    tics: u64,
}

impl Default for TicRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TicRunner {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            tics: 0,
        }
    }

    /// Tics run since construction.
    #[inline]
    pub fn tics(&self) -> u64 {
        self.tics
    }

    /// Run as many tics as real time calls for; returns how many ran.
    pub fn pump(&mut self, pose: &mut Pose, grid: &OccupancyGrid, cmd: InputCmd) -> u32 {
        let mut ran = 0;
        while self.last.elapsed() >= TIC {
            self.tick(pose, grid, cmd);
            self.last += TIC;
            ran += 1;
        }
        ran
    }

    /// Run exactly `n` tics, ignoring the clock.
    pub fn advance(&mut self, pose: &mut Pose, grid: &OccupancyGrid, cmd: InputCmd, n: u32) {
        for _ in 0..n {
            self.tick(pose, grid, cmd);
        }
    }

    fn tick(&mut self, pose: &mut Pose, grid: &OccupancyGrid, cmd: InputCmd) {
        apply_cmd(pose, grid, cmd, DT);
        self.tics += 1;
    }
}

/// Apply one command for `dt` seconds: turn first, then move.
pub fn apply_cmd(pose: &mut Pose, grid: &OccupancyGrid, cmd: InputCmd, dt: f32) {
    let cmd = cmd.clamped();
    let boost = if cmd.run { RUN_FACTOR } else { 1.0 };

    if cmd.turn != 0.0 {
        pose.turn_left(Angle::from_radians(cmd.turn * TURN_SPEED * boost * dt));
    }
    if cmd.forward != 0.0 {
        pose.move_forward(cmd.forward * MOVE_SPEED * boost * dt, grid);
    }
    if cmd.strafe != 0.0 {
        pose.strafe_right(cmd.strafe * MOVE_SPEED * boost * dt, grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (Pose, OccupancyGrid) {
        let pose = Pose::new(Vec2::new(2.5, 2.5), Vec2::X, Vec2::new(0.0, 0.66)).unwrap();
        (pose, OccupancyGrid::room(20, 6).unwrap())
    }

    #[test]
    fn one_second_of_walking() {
        let (mut pose, grid) = setup();
        let mut sim = TicRunner::new();
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        sim.advance(&mut pose, &grid, cmd, SIM_FPS);
        assert_eq!(sim.tics(), SIM_FPS as u64);
        assert!((pose.pos.x - (2.5 + MOVE_SPEED)).abs() < 1e-3);
    }

    #[test]
    fn running_doubles_speed() {
        let (mut walk, grid) = setup();
        let mut run = walk;
        let cmd = InputCmd {
            forward: 1.0,
            ..InputCmd::default()
        };
        apply_cmd(&mut walk, &grid, cmd, 0.5);
        apply_cmd(&mut run, &grid, InputCmd { run: true, ..cmd }, 0.5);
        let (dw, dr) = (walk.pos.x - 2.5, run.pos.x - 2.5);
        assert!((dr - 2.0 * dw).abs() < 1e-5);
    }

    #[test]
    fn positive_turn_is_left() {
        let (mut pose, grid) = setup();
        let cmd = InputCmd {
            turn: 1.0,
            ..InputCmd::default()
        };
        apply_cmd(&mut pose, &grid, cmd, 1.0);
        // left on a y-down screen means heading towards -y
        assert!((pose.yaw().radians() + TURN_SPEED).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_axes_clamped() {
        let (mut a, grid) = setup();
        let mut b = a;
        apply_cmd(&mut a, &grid, InputCmd { strafe: 5.0, ..Default::default() }, 0.1);
        apply_cmd(&mut b, &grid, InputCmd { strafe: 1.0, ..Default::default() }, 0.1);
        assert_eq!(a, b);
    }
}
