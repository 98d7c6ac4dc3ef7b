// Configuration module for neat-pong
// Handles loading and managing game and training configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::{create_default_config, get_config_path, load_config_from};
pub use types::{
    Config, DisplayConfig, EvolutionConfig, KeyBindings, PhysicsConfig, TrainingConfig,
};
