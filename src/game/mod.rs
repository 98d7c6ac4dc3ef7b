pub mod input;
pub mod physics;
pub mod state;

pub use input::{poll_input, InputAction, KeyMap};
pub use physics::{move_paddle, step, update_with_events, PhysicsEvents};
pub use state::{Ball, Direction, GameInformation, GameState, Paddle, Side};
