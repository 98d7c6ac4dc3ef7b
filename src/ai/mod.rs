// Paddle policies: the evolved network and hand-coded opponents

mod network_policy;
mod policy;
mod prediction;
mod predictive_policy;
mod tracking_policy;

pub use network_policy::NetworkPolicy;
pub use policy::{apply_action, PaddleAction, Policy, Sensors};
pub use prediction::predict_intercept_y;
pub use predictive_policy::{PredictivePolicy, PredictivePolicyConfig};
pub use tracking_policy::TrackingPolicy;

use crate::config::PhysicsConfig;
use crate::game::Side;

/// Hand-coded policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Chases the ball's current height
    Tracking,
    /// Aims at the predicted intercept with large errors
    PredictiveEasy,
    /// Aims at the predicted intercept with small errors
    PredictiveHard,
}

/// Create a hand-coded policy driving the paddle on `side`
pub fn create_policy(kind: PolicyKind, side: Side, physics: &PhysicsConfig) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Tracking => Box::new(TrackingPolicy::new(side, physics)),
        PolicyKind::PredictiveEasy => Box::new(PredictivePolicy::new(
            PredictivePolicyConfig::easy(),
            side,
            physics,
        )),
        PolicyKind::PredictiveHard => Box::new(PredictivePolicy::new(
            PredictivePolicyConfig::hard(),
            side,
            physics,
        )),
    }
}
