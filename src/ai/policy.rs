// Policy trait and the sensor/action contract shared by every paddle controller

use crate::game::{physics, Direction, GameState, Side};

/// The 5-value observation a policy receives each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    pub paddle_y: f64,
    pub ball_y: f64,
    /// Absolute horizontal distance between the paddle's x and the ball's x
    pub ball_distance: f64,
    pub ball_x_vel: f64,
    pub ball_y_vel: f64,
}

impl Sensors {
    /// Observe the game from one paddle's point of view
    pub fn observe(state: &GameState, side: Side) -> Self {
        let paddle = state.paddle(side);
        Self {
            paddle_y: paddle.y,
            ball_y: state.ball.y,
            ball_distance: (paddle.x - state.ball.x).abs(),
            ball_x_vel: state.ball.x_vel,
            ball_y_vel: state.ball.y_vel,
        }
    }

    /// Network input order: own y, ball y, distance, ball x_vel, ball y_vel
    pub fn to_array(&self) -> [f64; 5] {
        [
            self.paddle_y,
            self.ball_y,
            self.ball_distance,
            self.ball_x_vel,
            self.ball_y_vel,
        ]
    }
}

/// One of the three discrete paddle decisions, indexed as the network outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleAction {
    Stay = 0,
    Up = 1,
    Down = 2,
}

impl PaddleAction {
    pub const COUNT: usize = 3;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PaddleAction::Stay),
            1 => Some(PaddleAction::Up),
            2 => Some(PaddleAction::Down),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            PaddleAction::Stay => None,
            PaddleAction::Up => Some(Direction::Up),
            PaddleAction::Down => Some(Direction::Down),
        }
    }

    /// Argmax over the first three outputs; ties go to the lowest index,
    /// and an empty or NaN-only vector decodes to `Stay`
    pub fn decode(outputs: &[f64]) -> Self {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (index, &value) in outputs.iter().take(Self::COUNT).enumerate() {
            if value > best_value {
                best = index;
                best_value = value;
            }
        }
        Self::from_index(best).unwrap_or(PaddleAction::Stay)
    }
}

/// Apply a decided action to one paddle
pub fn apply_action(state: &mut GameState, side: Side, action: PaddleAction) {
    if let Some(direction) = action.direction() {
        physics::move_paddle(state, side, direction);
    }
}

/// Anything that can drive a paddle
///
/// Policies may keep internal state between ticks. The training loop neither
/// knows nor cares how a policy was produced.
pub trait Policy {
    /// Decide what the paddle should do this tick
    fn decide(&mut self, sensors: &Sensors) -> PaddleAction;

    /// Reset internal state (called when a new match starts)
    fn reset(&mut self) {}

    /// Policy name for logs
    fn name(&self) -> &str;
}
