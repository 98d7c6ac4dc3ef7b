// Evolved policy - a feed-forward network decoded from a genome

use super::{PaddleAction, Policy, Sensors};
use crate::evolution::{FeedForwardNetwork, Genome};

pub struct NetworkPolicy {
    name: String,
    network: FeedForwardNetwork,
}

impl NetworkPolicy {
    pub fn from_genome(genome: &Genome) -> Self {
        Self {
            name: format!("Genome {}", genome.key),
            network: FeedForwardNetwork::from_genome(genome),
        }
    }
}

impl Policy for NetworkPolicy {
    fn decide(&mut self, sensors: &Sensors) -> PaddleAction {
        let outputs = self.network.activate(&sensors.to_array());
        PaddleAction::decode(&outputs)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
