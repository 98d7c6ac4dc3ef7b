// Trajectory prediction for the predictive policy

/// Predict the ball's y when it has travelled `distance` horizontally
///
/// Returns `None` when the ball has (almost) no horizontal speed. Reflections
/// off the top and bottom walls are folded back into `[radius, height - radius]`.
///
/// # Arguments
/// * `ball_y` - Current ball centre y
/// * `ball_x_vel`, `ball_y_vel` - Ball velocity (pixels per tick)
/// * `distance` - Horizontal distance still to cover
/// * `field_height` - Height of the board
/// * `radius` - Ball radius; the centre bounces this far from each wall
pub fn predict_intercept_y(
    ball_y: f64,
    ball_x_vel: f64,
    ball_y_vel: f64,
    distance: f64,
    field_height: f64,
    radius: f64,
) -> Option<f64> {
    if ball_x_vel.abs() < 0.01 {
        return None;
    }

    let ticks = distance.abs() / ball_x_vel.abs();
    let low = radius;
    let high = field_height - radius;
    let span = high - low;
    if span <= 0.0 {
        return Some(field_height / 2.0);
    }

    // Unfold the bounces: position on a line of length 2*span, mirrored back
    let travelled = ball_y - low + ball_y_vel * ticks;
    let period = 2.0 * span;
    let folded = travelled.rem_euclid(period);
    let offset = if folded > span { period - folded } else { folded };

    Some(low + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD_HEIGHT: f64 = 500.0;
    const RADIUS: f64 = 7.0;

    #[test]
    fn test_flat_shot() {
        let predicted = predict_intercept_y(250.0, 5.0, 0.0, 320.0, FIELD_HEIGHT, RADIUS);
        assert_eq!(predicted, Some(250.0));
    }

    #[test]
    fn test_angled_shot_no_bounce() {
        // 100 ticks at +1 per tick
        let predicted =
            predict_intercept_y(250.0, 5.0, 1.0, 500.0, FIELD_HEIGHT, RADIUS).unwrap();
        assert!((predicted - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_bounce_bottom() {
        // Unbounded path would reach 550; wall at 493 -> 493 - 57 = 436
        let predicted =
            predict_intercept_y(250.0, -5.0, 3.0, 500.0, FIELD_HEIGHT, RADIUS).unwrap();
        assert!((predicted - 436.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_bounce_top() {
        // Unbounded path would reach -50; wall at 7 -> 7 + 57 = 64
        let predicted =
            predict_intercept_y(250.0, 5.0, -3.0, 500.0, FIELD_HEIGHT, RADIUS).unwrap();
        assert!((predicted - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_bounces_stay_in_bounds() {
        let predicted =
            predict_intercept_y(250.0, 1.0, 5.0, 650.0, FIELD_HEIGHT, RADIUS).unwrap();
        assert!(predicted >= RADIUS && predicted <= FIELD_HEIGHT - RADIUS);
    }

    #[test]
    fn test_no_horizontal_speed() {
        assert_eq!(
            predict_intercept_y(250.0, 0.0, 3.0, 300.0, FIELD_HEIGHT, RADIUS),
            None
        );
    }
}
