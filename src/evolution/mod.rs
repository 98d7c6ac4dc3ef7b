//! Fixed-topology neuroevolution that produces paddle policies.
//!
//! Genomes are flat weight vectors for a small tanh network. Each generation
//! is scored by a caller-supplied evaluation, then replaced by elites plus
//! mutated crossover children of the best performers.

pub mod checkpoint;
pub mod genome;
pub mod network;
pub mod population;
pub mod stats;

pub use checkpoint::{load_genome, restore_checkpoint, save_genome, Checkpointer};
pub use genome::{Genome, NUM_INPUTS, NUM_OUTPUTS};
pub use network::FeedForwardNetwork;
pub use population::{Population, RunOutcome};
pub use stats::{save_stats, GenerationStats};
