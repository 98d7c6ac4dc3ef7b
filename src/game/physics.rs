use super::state::{Ball, Direction, GameInformation, GameState, Paddle, Side};

/// What happened during a single physics step
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsEvents {
    pub wall_collision: bool,
    pub paddle_hit: Option<Side>,
    pub goal_scored: Option<Side>,
}

impl PhysicsEvents {
    pub fn any(&self) -> bool {
        self.wall_collision || self.paddle_hit.is_some() || self.goal_scored.is_some()
    }
}

/// Advance the match by one tick and return the resulting counters
pub fn step(state: &mut GameState) -> GameInformation {
    update_with_events(state);
    state.info()
}

pub fn update_with_events(state: &mut GameState) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    state.ball.advance();

    events.wall_collision = check_wall_collision(&mut state.ball, state.field_height);
    events.paddle_hit = check_paddle_collision(state);

    // Goals - the ball is out once its centre leaves the board
    if state.ball.x < 0.0 {
        state.right_score += 1;
        events.goal_scored = Some(Side::Right);
        state.reset_ball();
    } else if state.ball.x > state.field_width {
        state.left_score += 1;
        events.goal_scored = Some(Side::Left);
        state.reset_ball();
    }

    events
}

/// Reflect y_vel on top/bottom contact, only while the ball is moving into the wall
fn check_wall_collision(ball: &mut Ball, field_height: f64) -> bool {
    if ball.y + ball.radius >= field_height && ball.y_vel > 0.0 {
        ball.y_vel = -ball.y_vel;
        true
    } else if ball.y - ball.radius <= 0.0 && ball.y_vel < 0.0 {
        ball.y_vel = -ball.y_vel;
        true
    } else {
        false
    }
}

fn check_paddle_collision(state: &mut GameState) -> Option<Side> {
    let side = if state.ball.x_vel < 0.0 {
        Side::Left
    } else {
        Side::Right
    };

    let paddle = state.paddle(side);
    if !touches_paddle(&state.ball, paddle) {
        return None;
    }

    let (center_y, height) = (paddle.center_y(), paddle.height);
    bounce_off_paddle(&mut state.ball, center_y, height);
    match side {
        Side::Left => state.left_hits += 1,
        Side::Right => state.right_hits += 1,
    }
    Some(side)
}

/// Ball centre within the paddle's vertical span and the ball's extent
/// overlapping the paddle horizontally
fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let within_span = ball.y >= paddle.y && ball.y <= paddle.y + paddle.height;
    let overlaps_x =
        ball.x - ball.radius <= paddle.x + paddle.width && ball.x + ball.radius >= paddle.x;
    within_span && overlaps_x
}

/// Reverse x_vel and steer by contact offset: the paddle centre sends the ball
/// flat, the edges send it away at up to `max_vel`
fn bounce_off_paddle(ball: &mut Ball, paddle_center_y: f64, paddle_height: f64) {
    ball.x_vel = -ball.x_vel;

    let reduction_factor = (paddle_height / 2.0) / ball.max_vel;
    ball.y_vel = (ball.y - paddle_center_y) / reduction_factor;
}

/// Move a paddle one step, clamped to the board
pub fn move_paddle(state: &mut GameState, side: Side, direction: Direction) {
    let field_height = state.field_height;
    let paddle = state.paddle_mut(side);
    match direction {
        Direction::Up => move_paddle_up(paddle),
        Direction::Down => move_paddle_down(paddle, field_height),
    }
}

pub fn move_paddle_up(paddle: &mut Paddle) {
    paddle.y -= paddle.vel;
    paddle.y = paddle.y.max(0.0);
}

pub fn move_paddle_down(paddle: &mut Paddle, field_height: f64) {
    paddle.y += paddle.vel;
    paddle.y = paddle.y.min(field_height - paddle.height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;

    fn game() -> GameState {
        GameState::with_seed(&PhysicsConfig::default(), 11)
    }

    /// Park the ball mid-board with a given velocity, away from paddles and walls
    fn place_ball(state: &mut GameState, x: f64, y: f64, x_vel: f64, y_vel: f64) {
        state.ball.x = x;
        state.ball.y = y;
        state.ball.x_vel = x_vel;
        state.ball.y_vel = y_vel;
    }

    #[test]
    fn test_paddle_stays_on_board() {
        let mut state = game();
        for _ in 0..200 {
            move_paddle(&mut state, Side::Left, Direction::Up);
            assert!(state.left_paddle.y >= 0.0);
        }
        assert_eq!(state.left_paddle.y, 0.0);

        for _ in 0..200 {
            move_paddle(&mut state, Side::Right, Direction::Down);
            assert!(state.right_paddle.y <= 400.0);
        }
        assert_eq!(state.right_paddle.y, 400.0);
    }

    #[test]
    fn test_paddle_moves_by_velocity() {
        let mut state = game();
        move_paddle(&mut state, Side::Left, Direction::Up);
        assert_eq!(state.left_paddle.y, 196.0);
        move_paddle(&mut state, Side::Left, Direction::Down);
        move_paddle(&mut state, Side::Left, Direction::Down);
        assert_eq!(state.left_paddle.y, 204.0);
        // Other paddle untouched
        assert_eq!(state.right_paddle.y, 200.0);
    }

    #[test]
    fn test_ball_advances_by_velocity() {
        let mut state = game();
        place_ball(&mut state, 300.0, 250.0, 5.0, -2.0);
        let events = update_with_events(&mut state);
        assert!(!events.any());
        assert_eq!(state.ball.x, 305.0);
        assert_eq!(state.ball.y, 248.0);
    }

    #[test]
    fn test_bottom_wall_flips_once() {
        let mut state = game();
        place_ball(&mut state, 300.0, 490.0, 2.0, 4.0);

        // y = 494, 494 + 7 >= 500 -> contact
        let events = update_with_events(&mut state);
        assert!(events.wall_collision);
        assert_eq!(state.ball.y_vel, -4.0);

        // Still touching the wall on the way out: no second flip
        let events = update_with_events(&mut state);
        assert!(!events.wall_collision);
        assert_eq!(state.ball.y_vel, -4.0);
    }

    #[test]
    fn test_top_wall_flips_once() {
        let mut state = game();
        place_ball(&mut state, 300.0, 9.0, -2.0, -3.0);

        let events = update_with_events(&mut state);
        assert!(events.wall_collision);
        assert_eq!(state.ball.y_vel, 3.0);

        let events = update_with_events(&mut state);
        assert!(!events.wall_collision);
        assert_eq!(state.ball.y_vel, 3.0);
    }

    #[test]
    fn test_no_flip_without_contact() {
        let mut state = game();
        place_ball(&mut state, 300.0, 100.0, 1.0, 3.0);
        for _ in 0..50 {
            let before = state.ball.y_vel;
            let events = update_with_events(&mut state);
            if !events.wall_collision {
                assert_eq!(state.ball.y_vel, before);
            }
        }
    }

    #[test]
    fn test_left_paddle_hit() {
        let mut state = game();
        // Paddle spans y 200..300, right edge at x = 30
        place_ball(&mut state, 40.0, 250.0, -5.0, 0.0);

        let events = update_with_events(&mut state);
        assert_eq!(events.paddle_hit, Some(Side::Left));
        assert_eq!(state.left_hits, 1);
        assert_eq!(state.right_hits, 0);
        assert_eq!(state.ball.x_vel, 5.0);
        // Dead-centre contact leaves the ball flat
        assert_eq!(state.ball.y_vel, 0.0);
    }

    #[test]
    fn test_right_paddle_hit_steers_by_offset() {
        let mut state = game();
        // Right paddle left edge at x = 670; contact below the centre
        place_ball(&mut state, 660.0, 290.0, 5.0, 0.0);

        let events = update_with_events(&mut state);
        assert_eq!(events.paddle_hit, Some(Side::Right));
        assert_eq!(state.right_hits, 1);
        assert_eq!(state.ball.x_vel, -5.0);
        // (290 - 250) / (50 / 5) = 4, heading down
        assert_eq!(state.ball.y_vel, 4.0);
    }

    #[test]
    fn test_paddle_bounce_speed_bounded() {
        let mut state = game();
        // Contact at the very top edge of the paddle
        place_ball(&mut state, 36.0, 205.0, -5.0, -5.0);
        update_with_events(&mut state);
        assert_eq!(state.left_hits, 1);
        assert!(state.ball.y_vel.abs() <= state.ball.max_vel);
        assert_eq!(state.ball.y_vel, -5.0);
    }

    #[test]
    fn test_ball_behind_paddle_is_not_a_hit() {
        let mut state = game();
        // Left paddle spans x 10..30; after the move the ball covers x -5..9
        place_ball(&mut state, 7.0, 250.0, -5.0, 0.0);

        let events = update_with_events(&mut state);
        assert_eq!(events.paddle_hit, None);
        assert_eq!(state.left_hits, 0);
        assert_eq!(events.goal_scored, None);
        assert_eq!(state.ball.x_vel, -5.0);

        // Right paddle spans x 670..690; the ball already sits beyond its back edge
        place_ball(&mut state, 693.0, 250.0, 5.0, 0.0);
        let events = update_with_events(&mut state);
        assert_eq!(events.paddle_hit, None);
        assert_eq!(state.right_hits, 0);
    }

    #[test]
    fn test_single_hit_per_contact() {
        let mut state = game();
        place_ball(&mut state, 36.0, 250.0, -5.0, 0.0);
        update_with_events(&mut state);
        // Ball now moves away; overlapping the paddle next tick does not count again
        update_with_events(&mut state);
        assert_eq!(state.left_hits, 1);
    }

    #[test]
    fn test_miss_scores_for_right() {
        let mut state = game();
        // Paddle moved out of the way
        state.left_paddle.y = 0.0;
        place_ball(&mut state, 3.0, 450.0, -5.0, 0.0);

        let events = update_with_events(&mut state);
        assert_eq!(events.goal_scored, Some(Side::Right));
        assert_eq!(state.right_score, 1);
        assert_eq!(state.left_score, 0);
        assert_eq!(state.ball.x, 350.0);
        assert_eq!(state.ball.y, 250.0);
        // Re-served toward the side that just scored
        assert!(state.ball.x_vel > 0.0);
    }

    #[test]
    fn test_miss_scores_for_left() {
        let mut state = game();
        state.right_paddle.y = 400.0;
        place_ball(&mut state, 697.0, 50.0, 5.0, 0.0);

        let info = step(&mut state);
        assert_eq!(info.left_score, 1);
        assert_eq!(info.right_score, 0);
        assert_eq!(state.ball.x, 350.0);
        assert_eq!(state.ball.y, 250.0);
        assert!(state.ball.x_vel < 0.0);
    }

    #[test]
    fn test_step_returns_snapshot() {
        let mut state = game();
        place_ball(&mut state, 40.0, 250.0, -5.0, 0.0);
        let info = step(&mut state);
        assert_eq!(
            info,
            GameInformation {
                left_score: 0,
                right_score: 0,
                left_hits: 1,
                right_hits: 0,
            }
        );
    }
}
