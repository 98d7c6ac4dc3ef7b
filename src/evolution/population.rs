use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::checkpoint::Checkpointer;
use super::genome::Genome;
use super::stats::GenerationStats;
use crate::cancel::CancellationToken;
use crate::config::EvolutionConfig;
use crate::error::{Cancelled, PersistError};

/// How a call to [`Population::run`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All requested generations were evaluated
    Completed,
    /// The best fitness reached the configured threshold
    ThresholdReached,
    /// A quit was requested; the population was checkpointed if possible
    Cancelled,
}

/// A generation of genomes plus everything needed to resume evolving it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    pub genomes: Vec<Genome>,
    /// Index of the generation `genomes` belongs to
    pub generation: u32,
    pub best_genome: Option<Genome>,
    pub history: Vec<GenerationStats>,
    next_key: u64,
    seed: u64,
}

impl Population {
    pub fn new(config: &EvolutionConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let genomes = (0..config.population_size as u64)
            .map(|key| Genome::random(key, config, &mut rng))
            .collect();
        Self {
            genomes,
            generation: 0,
            best_genome: None,
            history: Vec::new(),
            next_key: config.population_size as u64,
            seed,
        }
    }

    // Derived per generation so a restored checkpoint continues the same stream
    fn generation_rng(&self) -> StdRng {
        StdRng::seed_from_u64(
            self.seed ^ u64::from(self.generation).wrapping_mul(0x9E37_79B9_7F4A_7C15),
        )
    }

    /// Evolve for up to `generations` generations
    ///
    /// `eval` must assign a fitness to every genome. A quit observed before or
    /// during evaluation stops the run and writes a checkpoint of the current
    /// generation.
    pub fn run<F>(
        &mut self,
        config: &EvolutionConfig,
        generations: u32,
        checkpointer: Option<&Checkpointer>,
        cancel: &CancellationToken,
        mut eval: F,
    ) -> Result<RunOutcome, PersistError>
    where
        F: FnMut(&mut [Genome]) -> Result<(), Cancelled>,
    {
        for _ in 0..generations {
            let evaluated = cancel
                .check()
                .and_then(|()| eval(self.genomes.as_mut_slice()));
            if evaluated.is_err() {
                if let Some(checkpointer) = checkpointer {
                    checkpointer.save(self)?;
                }
                return Ok(RunOutcome::Cancelled);
            }

            let stats = GenerationStats::from_genomes(self.generation, &self.genomes);
            info!(
                "Generation {}: best {:.2} (genome {:?}), mean {:.2}, stdev {:.2}",
                stats.generation,
                stats.best_fitness,
                stats.best_key,
                stats.mean_fitness,
                stats.stdev_fitness
            );
            let best_fitness = stats.best_fitness;
            self.history.push(stats);
            self.track_best();

            if best_fitness >= config.fitness_threshold {
                info!(
                    "Fitness threshold {} reached in generation {}",
                    config.fitness_threshold, self.generation
                );
                return Ok(RunOutcome::ThresholdReached);
            }

            self.reproduce(config);
            self.generation += 1;

            if let Some(checkpointer) = checkpointer {
                if checkpointer.is_due(self.generation) {
                    checkpointer.save(self)?;
                }
            }
        }

        Ok(RunOutcome::Completed)
    }

    fn track_best(&mut self) {
        let current = self
            .genomes
            .iter()
            .filter(|g| g.fitness.is_some())
            .max_by(|a, b| fitness_of(a).total_cmp(&fitness_of(b)));

        if let Some(current) = current {
            let improved = match &self.best_genome {
                Some(best) => fitness_of(current) > fitness_of(best),
                None => true,
            };
            if improved {
                self.best_genome = Some(current.clone());
            }
        }
    }

    /// Replace the genomes with the next generation
    ///
    /// Elites are copied unchanged; the rest are children of two parents drawn
    /// from the top `survival_threshold` of the ranking, then mutated.
    pub fn reproduce(&mut self, config: &EvolutionConfig) {
        let mut rng = self.generation_rng();
        let size = config.population_size;

        let mut ranked: Vec<&Genome> = self.genomes.iter().collect();
        ranked.sort_by(|a, b| fitness_of(b).total_cmp(&fitness_of(a)));

        let mut next = Vec::with_capacity(size);
        for elite in ranked.iter().take(config.elitism.min(size)) {
            next.push(Genome {
                fitness: None,
                ..(*elite).clone()
            });
        }

        if !ranked.is_empty() {
            let cutoff = ((ranked.len() as f64 * config.survival_threshold).ceil() as usize)
                .clamp(1, ranked.len());
            let parents = &ranked[..cutoff];

            while next.len() < size {
                let a = parents[rng.gen_range(0..parents.len())];
                let b = parents[rng.gen_range(0..parents.len())];
                let mut child = Genome::crossover(self.next_key, a, b, &mut rng);
                child.mutate(config, &mut rng);
                self.next_key += 1;
                next.push(child);
            }
        }

        self.genomes = next;
    }
}

fn fitness_of(genome: &Genome) -> f64 {
    genome.fitness.unwrap_or(f64::NEG_INFINITY)
}
