mod components;
mod movement;
mod tic;

pub use components::InputCmd;
pub use movement::{MoveResult, slide};
pub use tic::{DT, MOVE_SPEED, RUN_FACTOR, SIM_FPS, TURN_SPEED, TicRunner, apply_cmd};
