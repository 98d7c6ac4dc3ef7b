use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Vertical paddle movement; y grows downward, so `Up` decreases y
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub x_vel: f64,
    pub y_vel: f64,
    pub radius: f64,
    pub max_vel: f64,
}

impl Ball {
    pub fn new(x: f64, y: f64, radius: f64, max_vel: f64) -> Self {
        Self {
            x,
            y,
            x_vel: max_vel,
            y_vel: 0.0,
            radius,
            max_vel,
        }
    }

    pub fn advance(&mut self) {
        self.x += self.x_vel;
        self.y += self.y_vel;
    }

    /// Put the ball back at (x, y) travelling at `angle` radians off horizontal
    pub fn serve(&mut self, x: f64, y: f64, angle: f64, toward_right: bool) {
        self.x = x;
        self.y = y;
        let x_speed = (angle.cos() * self.max_vel).abs();
        self.x_vel = if toward_right { x_speed } else { -x_speed };
        self.y_vel = angle.sin() * self.max_vel;
    }
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub vel: f64,
}

impl Paddle {
    pub fn new(x: f64, y: f64, width: f64, height: f64, vel: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            vel,
        }
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Snapshot of the match counters returned after every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameInformation {
    pub left_score: u32,
    pub right_score: u32,
    pub left_hits: u32,
    pub right_hits: u32,
}

impl GameInformation {
    pub fn hits(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_hits,
            Side::Right => self.right_hits,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left_score: u32,
    pub right_score: u32,
    pub left_hits: u32,
    pub right_hits: u32,
    pub field_width: f64,
    pub field_height: f64,
    pub max_serve_angle: f64, // Radians
    rng: StdRng,
}

impl GameState {
    /// New match with an entropy-seeded serve RNG
    pub fn new(physics: &PhysicsConfig) -> Self {
        Self::from_rng(physics, StdRng::from_entropy())
    }

    /// New match whose serves are reproducible for a given seed
    pub fn with_seed(physics: &PhysicsConfig, seed: u64) -> Self {
        Self::from_rng(physics, StdRng::seed_from_u64(seed))
    }

    fn from_rng(physics: &PhysicsConfig, rng: StdRng) -> Self {
        let field_width = physics.board_width;
        let field_height = physics.board_height;
        let paddle_y = field_height / 2.0 - physics.paddle_height / 2.0;

        let left_paddle = Paddle::new(
            physics.paddle_margin,
            paddle_y,
            physics.paddle_width,
            physics.paddle_height,
            physics.paddle_vel,
        );
        let right_paddle = Paddle::new(
            field_width - physics.paddle_margin - physics.paddle_width,
            paddle_y,
            physics.paddle_width,
            physics.paddle_height,
            physics.paddle_vel,
        );

        let mut state = Self {
            ball: Ball::new(
                field_width / 2.0,
                field_height / 2.0,
                physics.ball_radius,
                physics.ball_max_vel,
            ),
            left_paddle,
            right_paddle,
            left_score: 0,
            right_score: 0,
            left_hits: 0,
            right_hits: 0,
            field_width,
            field_height,
            max_serve_angle: physics.max_serve_angle_deg.to_radians(),
            rng,
        };

        // Opening serve goes to a random side
        let toward_right = state.rng.gen_bool(0.5);
        state.serve(toward_right);
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }

    pub fn info(&self) -> GameInformation {
        GameInformation {
            left_score: self.left_score,
            right_score: self.right_score,
            left_hits: self.left_hits,
            right_hits: self.right_hits,
        }
    }

    /// Reset the entire match (scores, hits, ball, paddles); the RNG keeps its stream
    pub fn reset_game(&mut self) {
        self.left_score = 0;
        self.right_score = 0;
        self.left_hits = 0;
        self.right_hits = 0;

        let center_y = self.field_height / 2.0 - self.left_paddle.height / 2.0;
        self.left_paddle.y = center_y;
        self.right_paddle.y = center_y;

        let toward_right = self.rng.gen_bool(0.5);
        self.serve(toward_right);
    }

    /// Re-serve from the centre after a point, toward the opposite direction of travel
    pub fn reset_ball(&mut self) {
        let toward_right = self.ball.x_vel < 0.0;
        self.serve(toward_right);
    }

    fn serve(&mut self, toward_right: bool) {
        let angle = self.random_serve_angle();
        let (x, y) = (self.field_width / 2.0, self.field_height / 2.0);
        self.ball.serve(x, y, angle, toward_right);
    }

    /// Uniform angle in [-max, max], rejecting a perfectly flat serve
    fn random_serve_angle(&mut self) -> f64 {
        if self.max_serve_angle <= 0.0 {
            return 0.0;
        }
        loop {
            let angle = self
                .rng
                .gen_range(-self.max_serve_angle..=self.max_serve_angle);
            if angle != 0.0 {
                return angle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout_matches_board() {
        let state = GameState::with_seed(&PhysicsConfig::default(), 1);

        assert_eq!(state.left_paddle.x, 10.0);
        assert_eq!(state.right_paddle.x, 670.0);
        assert_eq!(state.left_paddle.y, 200.0);
        assert_eq!(state.right_paddle.y, 200.0);
        assert_eq!(state.ball.x, 350.0);
        assert_eq!(state.ball.y, 250.0);
        assert_eq!(state.info(), GameInformation::default());
    }

    #[test]
    fn test_serve_speed_is_bounded() {
        let mut state = GameState::with_seed(&PhysicsConfig::default(), 7);
        for _ in 0..100 {
            state.reset_ball();
            assert!(state.ball.x_vel.abs() <= state.ball.max_vel);
            assert!(state.ball.y_vel.abs() <= state.ball.max_vel);
            assert!(state.ball.x_vel != 0.0);
            assert!(state.ball.y_vel != 0.0);
        }
    }

    #[test]
    fn test_reset_ball_reverses_direction() {
        let mut state = GameState::with_seed(&PhysicsConfig::default(), 3);
        let before = state.ball.x_vel.signum();
        state.ball.x = 12.0;
        state.reset_ball();
        assert_eq!(state.ball.x_vel.signum(), -before);
        assert_eq!(state.ball.x, 350.0);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let physics = PhysicsConfig::default();
        let mut a = GameState::with_seed(&physics, 99);
        let mut b = GameState::with_seed(&physics, 99);
        for _ in 0..10 {
            assert_eq!(a.ball.x_vel, b.ball.x_vel);
            assert_eq!(a.ball.y_vel, b.ball.y_vel);
            a.reset_ball();
            b.reset_ball();
        }
    }

    #[test]
    fn test_reset_game_clears_counters() {
        let mut state = GameState::with_seed(&PhysicsConfig::default(), 5);
        state.left_score = 2;
        state.right_hits = 9;
        state.left_paddle.y = 0.0;
        state.reset_game();
        assert_eq!(state.info(), GameInformation::default());
        assert_eq!(state.left_paddle.y, 200.0);
    }

    #[test]
    fn test_information_by_side() {
        let info = GameInformation {
            left_score: 1,
            right_score: 0,
            left_hits: 7,
            right_hits: 3,
        };
        assert_eq!(info.hits(Side::Left), 7);
        assert_eq!(info.hits(Side::Right), 3);
        assert_eq!(info.score(Side::Left), 1);
        assert_eq!(info.score(Side::Right), 0);
    }
}
