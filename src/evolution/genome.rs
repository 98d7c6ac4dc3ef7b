use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::config::EvolutionConfig;

/// Sensor values fed to every network
pub const NUM_INPUTS: usize = 5;
/// Action scores produced by every network
pub const NUM_OUTPUTS: usize = 3;

/// A candidate: a fixed-topology network encoded as a flat weight vector
///
/// Layout is input->hidden weights (row per hidden neuron), hidden biases,
/// hidden->output weights (row per output), output biases. With no hidden
/// layer it is input->output weights followed by output biases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub key: u64,
    pub hidden: usize,
    pub weights: Vec<f64>,
    pub fitness: Option<f64>,
}

impl Genome {
    /// Number of weights a network with `hidden` neurons needs
    pub fn weight_count(hidden: usize) -> usize {
        if hidden == 0 {
            NUM_INPUTS * NUM_OUTPUTS + NUM_OUTPUTS
        } else {
            NUM_INPUTS * hidden + hidden + hidden * NUM_OUTPUTS + NUM_OUTPUTS
        }
    }

    /// Fresh genome with weights drawn from N(0, weight_init_stdev)
    pub fn random<R: Rng>(key: u64, config: &EvolutionConfig, rng: &mut R) -> Self {
        let count = Self::weight_count(config.hidden_neurons);
        let weights = (0..count)
            .map(|_| sample_weight(config, rng))
            .collect();
        Self {
            key,
            hidden: config.hidden_neurons,
            weights,
            fitness: None,
        }
    }

    /// Uniform crossover: each weight comes from either parent with equal odds
    pub fn crossover<R: Rng>(key: u64, a: &Genome, b: &Genome, rng: &mut R) -> Self {
        // Parents always share a shape within one population; fall back to a copy if not
        if a.hidden != b.hidden || a.weights.len() != b.weights.len() {
            return Self {
                key,
                fitness: None,
                ..a.clone()
            };
        }
        let weights = a
            .weights
            .iter()
            .zip(&b.weights)
            .map(|(&wa, &wb)| if rng.gen_bool(0.5) { wa } else { wb })
            .collect();
        Self {
            key,
            hidden: a.hidden,
            weights,
            fitness: None,
        }
    }

    /// Perturb or replace each weight independently, clamped to the weight bounds
    pub fn mutate<R: Rng>(&mut self, config: &EvolutionConfig, rng: &mut R) {
        let perturb = Normal::new(0.0, config.weight_mutate_power).ok();
        for weight in &mut self.weights {
            let roll: f64 = rng.gen();
            if roll < config.weight_replace_rate {
                *weight = sample_weight(config, rng);
            } else if roll < config.weight_replace_rate + config.weight_mutate_rate {
                if let Some(normal) = &perturb {
                    *weight += normal.sample(rng);
                }
            }
            *weight = weight.clamp(config.weight_min, config.weight_max);
        }
    }
}

fn sample_weight<R: Rng>(config: &EvolutionConfig, rng: &mut R) -> f64 {
    let value = match Normal::new(0.0, config.weight_init_stdev) {
        Ok(normal) => normal.sample(rng),
        Err(_) => 0.0,
    };
    value.clamp(config.weight_min, config.weight_max)
}
