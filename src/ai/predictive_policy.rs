// Predictive policy with imperfect trajectory prediction

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use super::prediction::predict_intercept_y;
use super::tracking_policy::{ball_approaching, steer_toward};
use super::{PaddleAction, Policy, Sensors};
use crate::config::PhysicsConfig;
use crate::game::Side;

/// Configuration for a predictive policy's behaviour
#[derive(Debug, Clone)]
pub struct PredictivePolicyConfig {
    pub name: String,
    pub error_stddev: f64,              // Std deviation of the aim error in pixels
    pub catastrophic_miss_rate: f64,    // Probability of ignoring a shot entirely
    pub reaction_delay_ticks: u32,      // Ticks between consecutive moves
    pub prediction_interval_ticks: u32, // Intercept is recomputed every N ticks
    pub movement_threshold: f64,        // Dead zone to avoid jitter
}

impl PredictivePolicyConfig {
    /// Beatable opponent: large aim error, frequent whiffs
    pub fn easy() -> Self {
        Self {
            name: "Predictive (easy)".to_string(),
            error_stddev: 35.0,
            catastrophic_miss_rate: 0.12,
            reaction_delay_ticks: 3,
            prediction_interval_ticks: 15,
            movement_threshold: 20.0,
        }
    }

    /// Strong opponent: small aim error, rare whiffs
    pub fn hard() -> Self {
        Self {
            name: "Predictive (hard)".to_string(),
            error_stddev: 8.0,
            catastrophic_miss_rate: 0.02,
            reaction_delay_ticks: 0,
            prediction_interval_ticks: 5,
            movement_threshold: 8.0,
        }
    }
}

/// Aims at the predicted intercept, with human-like errors
pub struct PredictivePolicy {
    config: PredictivePolicyConfig,
    side: Side,
    paddle_height: f64,
    field_height: f64,
    ball_radius: f64,
    error: Option<Normal<f64>>,

    // Cached prediction state
    ticks_since_prediction: u32,
    cached_target_y: Option<f64>, // None = return to centre

    ticks_since_action: u32,
    rng: StdRng,
}

impl PredictivePolicy {
    pub fn new(config: PredictivePolicyConfig, side: Side, physics: &PhysicsConfig) -> Self {
        Self::with_rng(config, side, physics, StdRng::from_entropy())
    }

    pub fn with_seed(
        config: PredictivePolicyConfig,
        side: Side,
        physics: &PhysicsConfig,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, side, physics, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: PredictivePolicyConfig,
        side: Side,
        physics: &PhysicsConfig,
        rng: StdRng,
    ) -> Self {
        // A zero or invalid deviation means perfect aim
        let error = Normal::new(0.0, config.error_stddev)
            .ok()
            .filter(|_| config.error_stddev > 0.0);
        Self {
            ticks_since_prediction: config.prediction_interval_ticks,
            ticks_since_action: config.reaction_delay_ticks,
            config,
            side,
            paddle_height: physics.paddle_height,
            field_height: physics.board_height,
            ball_radius: physics.ball_radius,
            error,
            cached_target_y: None,
            rng,
        }
    }

    fn update_prediction(&mut self, sensors: &Sensors) {
        let true_prediction = if ball_approaching(self.side, sensors.ball_x_vel) {
            predict_intercept_y(
                sensors.ball_y,
                sensors.ball_x_vel,
                sensors.ball_y_vel,
                sensors.ball_distance,
                self.field_height,
                self.ball_radius,
            )
        } else {
            None
        };

        let target = match true_prediction {
            Some(y) => self.apply_prediction_error(y),
            None => None,
        };
        self.cached_target_y = target;
        self.ticks_since_prediction = 0;
    }

    /// `None` on a catastrophic miss, otherwise the prediction with gaussian error
    fn apply_prediction_error(&mut self, true_y: f64) -> Option<f64> {
        if self.rng.gen::<f64>() < self.config.catastrophic_miss_rate {
            return None;
        }
        let error = match &self.error {
            Some(normal) => normal.sample(&mut self.rng),
            None => 0.0,
        };
        Some(true_y + error)
    }
}

impl Policy for PredictivePolicy {
    fn decide(&mut self, sensors: &Sensors) -> PaddleAction {
        if self.ticks_since_prediction >= self.config.prediction_interval_ticks {
            self.update_prediction(sensors);
        }
        self.ticks_since_prediction = self.ticks_since_prediction.saturating_add(1);

        if self.ticks_since_action < self.config.reaction_delay_ticks {
            self.ticks_since_action += 1;
            return PaddleAction::Stay;
        }

        let paddle_center_y = sensors.paddle_y + self.paddle_height / 2.0;
        let target_y = self.cached_target_y.unwrap_or(self.field_height / 2.0);

        let action = steer_toward(paddle_center_y, target_y, self.config.movement_threshold);
        if action != PaddleAction::Stay {
            self.ticks_since_action = 0;
        }
        action
    }

    fn reset(&mut self) {
        self.ticks_since_prediction = self.config.prediction_interval_ticks;
        self.ticks_since_action = self.config.reaction_delay_ticks;
        self.cached_target_y = None;
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}
