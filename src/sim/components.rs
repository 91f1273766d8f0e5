/// One tic worth of player intent, sampled from the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1  (back / forward)
    pub strafe: f32,  // –1 … +1  (left / right)
    pub turn: f32,    // –1 … +1  (right / left)
    pub run: bool,    // Shift
}

impl InputCmd {
    /// Axis values clamped into `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            strafe: self.strafe.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
            run: self.run,
        }
    }
}
