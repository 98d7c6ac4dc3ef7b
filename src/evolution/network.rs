use super::genome::{Genome, NUM_INPUTS, NUM_OUTPUTS};

/// Dense layer: `outputs` rows of `inputs` weights plus one bias per row
#[derive(Debug, Clone)]
struct Layer {
    inputs: usize,
    weights: Vec<f64>,
    biases: Vec<f64>,
}

impl Layer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .chunks(self.inputs)
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                (sum + bias).tanh()
            })
            .collect()
    }
}

/// Feed-forward network decoded from a genome, tanh on every neuron
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    layers: Vec<Layer>,
}

impl FeedForwardNetwork {
    pub fn from_genome(genome: &Genome) -> Self {
        let mut weights = genome.weights.iter().copied();
        let mut take = |n: usize| -> Vec<f64> {
            // Short genomes pad with zeros rather than panic
            (0..n).map(|_| weights.next().unwrap_or(0.0)).collect()
        };

        let mut layers = Vec::new();
        let mut inputs = NUM_INPUTS;
        if genome.hidden > 0 {
            layers.push(Layer {
                inputs,
                weights: take(inputs * genome.hidden),
                biases: take(genome.hidden),
            });
            inputs = genome.hidden;
        }
        layers.push(Layer {
            inputs,
            weights: take(inputs * NUM_OUTPUTS),
            biases: take(NUM_OUTPUTS),
        });

        Self { layers }
    }

    pub fn activate(&self, inputs: &[f64; NUM_INPUTS]) -> [f64; NUM_OUTPUTS] {
        let mut values = inputs.to_vec();
        for layer in &self.layers {
            values = layer.forward(&values);
        }

        let mut outputs = [0.0; NUM_OUTPUTS];
        for (out, value) in outputs.iter_mut().zip(values) {
            *out = value;
        }
        outputs
    }
}
