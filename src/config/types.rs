// neat-pong configuration types
// Defaults describe a 700x500 board and the training settings used for it

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Board dimensions in pixels
    pub board_width: f64,
    pub board_height: f64,

    // Paddle geometry and distance moved per move_paddle call
    pub paddle_width: f64,
    pub paddle_height: f64,
    pub paddle_vel: f64,

    // Gap between the board edge and each paddle
    pub paddle_margin: f64,

    pub ball_radius: f64,

    // Upper bound for each ball velocity component
    pub ball_max_vel: f64,

    // Serves leave the centre at up to this many degrees off horizontal
    pub max_serve_angle_deg: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            board_width: 700.0,
            board_height: 500.0,
            paddle_width: 20.0,
            paddle_height: 100.0,
            paddle_vel: 4.0,
            paddle_margin: 10.0,
            ball_radius: 7.0,
            ball_max_vel: 5.0,
            max_serve_angle_deg: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    // A match ends once the left paddle has hit the ball more than this
    pub max_hits: u32,

    // Fitness bonus for the side that scored
    pub score_bonus: f64,

    // Base seed for populations and per-match serve RNGs
    pub seed: u64,

    // Generations between population checkpoints (0 disables them)
    pub checkpoint_interval: u32,
    pub checkpoint_prefix: String,

    pub best_policy_path: String,
    pub stats_path: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            max_hits: 50,
            score_bonus: 5.0,
            seed: 42,
            checkpoint_interval: 10,
            checkpoint_prefix: "neat-checkpoint-".to_string(),
            best_policy_path: "best.bin".to_string(),
            stats_path: "stats.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,

    // Neurons in the single hidden layer (0 wires inputs straight to outputs)
    pub hidden_neurons: usize,

    // Training stops early once the best fitness reaches this value
    pub fitness_threshold: f64,

    // Genomes copied unchanged into the next generation
    pub elitism: usize,

    // Fraction of the ranked population allowed to reproduce
    pub survival_threshold: f64,

    pub weight_init_stdev: f64,
    pub weight_mutate_rate: f64,
    pub weight_mutate_power: f64,
    pub weight_replace_rate: f64,
    pub weight_min: f64,
    pub weight_max: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            hidden_neurons: 4,
            fitness_threshold: 400.0,
            elitism: 2,
            survival_threshold: 0.2,
            weight_init_stdev: 1.0,
            weight_mutate_rate: 0.8,
            weight_mutate_power: 0.5,
            weight_replace_rate: 0.1,
            weight_min: -30.0,
            weight_max: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Interactive mode tick rate
    pub target_fps: u64,

    // move_paddle calls per key press in interactive mode
    pub human_tap_steps: u32,

    // Log file used while the terminal is in raw mode
    pub log_file: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            human_tap_steps: 10,
            log_file: "/tmp/neat-pong.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Human paddle controls (left paddle)
    pub paddle_up: String,
    pub paddle_down: String,

    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddle_up: "W".to_string(),
            paddle_down: "S".to_string(),
            quit: "Q".to_string(),
        }
    }
}
