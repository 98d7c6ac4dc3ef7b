use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::genome::Genome;
use crate::error::PersistError;

/// Fitness summary of one evaluated generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: u32,
    pub population_size: usize,
    pub best_key: Option<u64>,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub stdev_fitness: f64,
}

impl GenerationStats {
    /// Summarise evaluated genomes; genomes without fitness count as 0
    pub fn from_genomes(generation: u32, genomes: &[Genome]) -> Self {
        let fitnesses: Vec<f64> = genomes.iter().map(|g| g.fitness.unwrap_or(0.0)).collect();
        let n = fitnesses.len();

        let best = genomes
            .iter()
            .zip(&fitnesses)
            .max_by(|(_, a), (_, b)| a.total_cmp(b));

        let (mean, stdev) = if n == 0 {
            (0.0, 0.0)
        } else {
            let mean = fitnesses.iter().sum::<f64>() / n as f64;
            let variance = fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n as f64;
            (mean, variance.sqrt())
        };

        Self {
            generation,
            population_size: n,
            best_key: best.map(|(g, _)| g.key),
            best_fitness: best.map(|(_, f)| *f).unwrap_or(0.0),
            mean_fitness: mean,
            stdev_fitness: stdev,
        }
    }
}

/// Write the per-generation history as pretty JSON
pub fn save_stats(path: &Path, history: &[GenerationStats]) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(history)?;
    fs::write(path, json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}
