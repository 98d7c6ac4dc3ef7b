// Tracking policy - hand-coded sparring partner

use super::{PaddleAction, Policy, Sensors};
use crate::config::PhysicsConfig;
use crate::game::Side;

/// Follows the ball's y while it approaches, drifts back to centre otherwise
///
/// No prediction and no noise: the paddle chases the ball's current height,
/// which is enough to return most straight shots.
pub struct TrackingPolicy {
    name: String,
    side: Side,
    paddle_height: f64,
    field_height: f64,
    movement_threshold: f64, // How far from target before moving
}

impl TrackingPolicy {
    pub fn new(side: Side, physics: &PhysicsConfig) -> Self {
        Self {
            name: "Tracking".to_string(),
            side,
            paddle_height: physics.paddle_height,
            field_height: physics.board_height,
            movement_threshold: physics.paddle_vel * 2.0,
        }
    }
}

/// True when the ball travels toward the paddle on `side`
pub(crate) fn ball_approaching(side: Side, ball_x_vel: f64) -> bool {
    match side {
        Side::Left => ball_x_vel < 0.0,
        Side::Right => ball_x_vel > 0.0,
    }
}

/// Move toward `target_y` unless already within `threshold` of it
pub(crate) fn steer_toward(paddle_center_y: f64, target_y: f64, threshold: f64) -> PaddleAction {
    let diff = target_y - paddle_center_y;
    if diff.abs() < threshold {
        PaddleAction::Stay
    } else if diff > 0.0 {
        PaddleAction::Down
    } else {
        PaddleAction::Up
    }
}

impl Policy for TrackingPolicy {
    fn decide(&mut self, sensors: &Sensors) -> PaddleAction {
        let paddle_center_y = sensors.paddle_y + self.paddle_height / 2.0;

        let target_y = if ball_approaching(self.side, sensors.ball_x_vel) {
            sensors.ball_y
        } else {
            self.field_height / 2.0
        };

        steer_toward(paddle_center_y, target_y, self.movement_threshold)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
