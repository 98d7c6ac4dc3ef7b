pub mod common;
mod human;
mod training;

pub use human::{run_human_vs_policy, HumanMatch};
pub use training::{
    assign_fitness, calculate_fitness, eval_genomes, is_match_over, pairings, play_match,
    run_training, MatchSettings, TrainingSummary,
};
