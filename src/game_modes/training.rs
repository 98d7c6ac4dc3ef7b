use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::ai::{apply_action, NetworkPolicy, Policy, Sensors};
use crate::cancel::CancellationToken;
use crate::config::{Config, PhysicsConfig, TrainingConfig};
use crate::error::Cancelled;
use crate::evolution::{
    restore_checkpoint, save_genome, save_stats, Checkpointer, Genome, Population, RunOutcome,
};
use crate::game::{physics, GameInformation, GameState, Side};

/// Match stopping rule and fitness bonus
#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    pub max_hits: u32,
    pub score_bonus: f64,
}

impl From<&TrainingConfig> for MatchSettings {
    fn from(training: &TrainingConfig) -> Self {
        Self {
            max_hits: training.max_hits,
            score_bonus: training.score_bonus,
        }
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self::from(&TrainingConfig::default())
    }
}

/// A training match ends on the first point, or once the left paddle has
/// returned the ball more than `max_hits` times
pub fn is_match_over(info: &GameInformation, max_hits: u32) -> bool {
    info.left_score >= 1 || info.right_score >= 1 || info.left_hits > max_hits
}

/// Drive one match between two policies until it is over
pub fn play_match(
    game: &mut GameState,
    left: &mut dyn Policy,
    right: &mut dyn Policy,
    max_hits: u32,
    cancel: &CancellationToken,
) -> Result<GameInformation, Cancelled> {
    left.reset();
    right.reset();

    loop {
        cancel.check()?;

        let action = left.decide(&Sensors::observe(game, Side::Left));
        apply_action(game, Side::Left, action);

        let action = right.decide(&Sensors::observe(game, Side::Right));
        apply_action(game, Side::Right, action);

        let info = physics::step(game);
        if is_match_over(&info, max_hits) {
            return Ok(info);
        }
    }
}

/// Fitness earned by (left, right): own hits, plus the bonus for whoever scored
pub fn calculate_fitness(info: &GameInformation, score_bonus: f64) -> (f64, f64) {
    let fitness = |side: Side| {
        let bonus = if info.score(side) > 0 { score_bonus } else { 0.0 };
        f64::from(info.hits(side)) + bonus
    };

    (fitness(Side::Left), fitness(Side::Right))
}

/// Add one match's fitness to both genomes
pub fn assign_fitness(
    left: &mut Genome,
    right: &mut Genome,
    info: &GameInformation,
    score_bonus: f64,
) {
    let (left_gain, right_gain) = calculate_fitness(info, score_bonus);
    left.fitness = Some(left.fitness.unwrap_or(0.0) + left_gain);
    right.fitness = Some(right.fitness.unwrap_or(0.0) + right_gain);
}

/// Every unordered pair (i, j) with i < j, in order
pub fn pairings(count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..count).flat_map(move |i| (i + 1..count).map(move |j| (i, j)))
}

/// Play every genome against every other once and accumulate fitness
///
/// All fitness values start from zero. Match `k` uses serve seed `seed + k`.
pub fn eval_genomes(
    genomes: &mut [Genome],
    physics: &PhysicsConfig,
    settings: MatchSettings,
    seed: u64,
    cancel: &CancellationToken,
) -> Result<(), Cancelled> {
    for genome in genomes.iter_mut() {
        genome.fitness = Some(0.0);
    }

    for (match_index, (i, j)) in pairings(genomes.len()).enumerate() {
        let (head, tail) = genomes.split_at_mut(j);
        let (left_genome, right_genome) = (&mut head[i], &mut tail[0]);

        let mut left = NetworkPolicy::from_genome(left_genome);
        let mut right = NetworkPolicy::from_genome(right_genome);
        let mut game = GameState::with_seed(physics, seed.wrapping_add(match_index as u64));

        let info = play_match(&mut game, &mut left, &mut right, settings.max_hits, cancel)?;
        assign_fitness(left_genome, right_genome, &info, settings.score_bonus);

        debug!(
            "Match {} vs {}: score {}-{}, hits {}-{}",
            left_genome.key,
            right_genome.key,
            info.left_score,
            info.right_score,
            info.left_hits,
            info.right_hits
        );
    }

    Ok(())
}

/// Result of a training run
#[derive(Debug)]
pub struct TrainingSummary {
    pub outcome: RunOutcome,
    pub best: Option<Genome>,
    /// Where the best genome was written, if it was
    pub best_path: Option<PathBuf>,
}

/// Evolve policies for up to `generations` generations
///
/// Restores `checkpoint` when the file exists, otherwise starts a new
/// population. On completion the best genome and the statistics history are
/// written to the configured paths. A cancelled run leaves a checkpoint
/// behind instead of a best genome.
pub fn run_training(
    config: &Config,
    checkpoint: Option<&Path>,
    generations: u32,
    cancel: &CancellationToken,
) -> Result<TrainingSummary> {
    let mut population = match checkpoint {
        Some(path) if path.exists() => {
            info!("Restoring from checkpoint: {}", path.display());
            restore_checkpoint(path)
                .with_context(|| format!("Failed to restore checkpoint {}", path.display()))?
        }
        Some(path) => {
            warn!(
                "Checkpoint {} not found, starting a new population",
                path.display()
            );
            Population::new(&config.evolution, config.training.seed)
        }
        None => {
            info!("Starting a new population");
            Population::new(&config.evolution, config.training.seed)
        }
    };

    let checkpointer = Checkpointer::new(
        config.training.checkpoint_interval,
        config.training.checkpoint_prefix.clone(),
    );
    let settings = MatchSettings::from(&config.training);
    let mut round = u64::from(population.generation);

    let outcome = population.run(
        &config.evolution,
        generations,
        Some(&checkpointer),
        cancel,
        |genomes| {
            // Distinct serve seeds per generation, reproducible across restores
            let seed = config
                .training
                .seed
                .wrapping_add(round.wrapping_mul(1_000_003));
            round += 1;
            eval_genomes(genomes, &config.physics, settings, seed, cancel)
        },
    )?;

    let stats_path = Path::new(&config.training.stats_path);
    save_stats(stats_path, &population.history)
        .with_context(|| format!("Failed to write statistics to {}", stats_path.display()))?;

    let best = population.best_genome.clone();
    let mut best_path = None;

    if outcome == RunOutcome::Cancelled {
        info!(
            "Training cancelled in generation {}; resume with --checkpoint {}",
            population.generation,
            checkpointer.path_for(population.generation).display()
        );
    } else if let Some(genome) = &best {
        let path = PathBuf::from(&config.training.best_policy_path);
        save_genome(&path, genome)
            .with_context(|| format!("Failed to save best genome to {}", path.display()))?;
        info!(
            "Saved best genome {} (fitness {:.2}) to {}",
            genome.key,
            genome.fitness.unwrap_or(0.0),
            path.display()
        );
        best_path = Some(path);
    }

    Ok(TrainingSummary {
        outcome,
        best,
        best_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{PaddleAction, TrackingPolicy};
    use crate::config::EvolutionConfig;

    /// Never moves
    struct Idle;

    impl Policy for Idle {
        fn decide(&mut self, _sensors: &Sensors) -> PaddleAction {
            PaddleAction::Stay
        }

        fn name(&self) -> &str {
            "Idle"
        }
    }

    fn info(left_score: u32, right_score: u32, left_hits: u32, right_hits: u32) -> GameInformation {
        GameInformation {
            left_score,
            right_score,
            left_hits,
            right_hits,
        }
    }

    #[test]
    fn test_fitness_left_scores() {
        let mut g1 = Genome {
            key: 1,
            hidden: 0,
            weights: Vec::new(),
            fitness: Some(0.0),
        };
        let mut g2 = Genome {
            key: 2,
            ..g1.clone()
        };

        assign_fitness(&mut g1, &mut g2, &info(1, 0, 7, 3), 5.0);
        assert_eq!(g1.fitness, Some(12.0));
        assert_eq!(g2.fitness, Some(3.0));
    }

    #[test]
    fn test_fitness_right_scores_and_accumulates() {
        let (left, right) = calculate_fitness(&info(0, 1, 4, 4), 5.0);
        assert_eq!((left, right), (4.0, 9.0));

        // Hit cap reached without a point: no bonus for anyone
        let (left, right) = calculate_fitness(&info(0, 0, 51, 50), 5.0);
        assert_eq!((left, right), (51.0, 50.0));
    }

    #[test]
    fn test_match_over_rule() {
        assert!(!is_match_over(&info(0, 0, 0, 0), 50));
        assert!(is_match_over(&info(1, 0, 0, 0), 50));
        assert!(is_match_over(&info(0, 1, 0, 0), 50));
        assert!(!is_match_over(&info(0, 0, 50, 50), 50));
        assert!(is_match_over(&info(0, 0, 51, 50), 50));
    }

    #[test]
    fn test_pairings_cover_each_pair_once() {
        let pairs: Vec<_> = pairings(4).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
        assert_eq!(pairings(50).count(), 50 * 49 / 2);
        assert_eq!(pairings(1).count(), 0);
        assert_eq!(pairings(0).count(), 0);
    }

    #[test]
    fn test_idle_match_ends_on_first_point() {
        // Flat serve along the centre line while both paddles sit at the top
        let physics = PhysicsConfig {
            max_serve_angle_deg: 0.0,
            ..PhysicsConfig::default()
        };
        let mut game = GameState::with_seed(&physics, 8);
        game.left_paddle.y = 0.0;
        game.right_paddle.y = 0.0;

        let info = play_match(&mut game, &mut Idle, &mut Idle, 50, &CancellationToken::new())
            .unwrap();
        assert_eq!(info.left_score + info.right_score, 1);
        assert_eq!(info.left_hits + info.right_hits, 0);
    }

    #[test]
    fn test_hit_cap_stops_exactly_past_limit() {
        // Two trackers with flat serves rally until the cap
        let physics = PhysicsConfig {
            max_serve_angle_deg: 0.0,
            ..PhysicsConfig::default()
        };
        let mut game = GameState::with_seed(&physics, 1);
        let mut left = TrackingPolicy::new(Side::Left, &physics);
        let mut right = TrackingPolicy::new(Side::Right, &physics);

        let info = play_match(&mut game, &mut left, &mut right, 50, &CancellationToken::new())
            .unwrap();

        assert_eq!(info.left_score, 0);
        assert_eq!(info.right_score, 0);
        assert_eq!(info.left_hits, 51);
    }

    #[test]
    fn test_cancelled_match() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut game = GameState::with_seed(&PhysicsConfig::default(), 1);
        let result = play_match(&mut game, &mut Idle, &mut Idle, 50, &cancel);
        assert_eq!(result, Err(Cancelled));
    }

    #[test]
    fn test_eval_matches_single_game() {
        let config = EvolutionConfig {
            population_size: 2,
            ..EvolutionConfig::default()
        };
        let physics = PhysicsConfig::default();
        let mut population = Population::new(&config, 10);
        population.genomes[1].fitness = Some(99.0);

        // Replay the only pairing by hand with the same serve seed
        let mut game = GameState::with_seed(&physics, 1);
        let mut left = NetworkPolicy::from_genome(&population.genomes[0]);
        let mut right = NetworkPolicy::from_genome(&population.genomes[1]);
        let info = play_match(&mut game, &mut left, &mut right, 50, &CancellationToken::new())
            .unwrap();
        let (expected_left, expected_right) = calculate_fitness(&info, 5.0);

        eval_genomes(
            &mut population.genomes,
            &physics,
            MatchSettings::default(),
            1,
            &CancellationToken::new(),
        )
        .unwrap();

        // Stale fitness from a previous generation does not leak in
        assert_eq!(population.genomes[0].fitness, Some(expected_left));
        assert_eq!(population.genomes[1].fitness, Some(expected_right));
    }

    #[test]
    fn test_run_training_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.evolution.population_size = 4;
        config.evolution.hidden_neurons = 2;
        config.training.max_hits = 5;
        config.training.checkpoint_interval = 1;
        config.training.checkpoint_prefix = dir
            .path()
            .join("ckpt-")
            .to_string_lossy()
            .into_owned();
        config.training.best_policy_path = dir
            .path()
            .join("best.bin")
            .to_string_lossy()
            .into_owned();
        config.training.stats_path = dir
            .path()
            .join("stats.json")
            .to_string_lossy()
            .into_owned();

        let summary = run_training(&config, None, 2, &CancellationToken::new()).unwrap();

        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert!(summary.best.is_some());
        assert!(dir.path().join("best.bin").exists());
        assert!(dir.path().join("stats.json").exists());
        assert!(dir.path().join("ckpt-1").exists());
        assert!(dir.path().join("ckpt-2").exists());

        // Resume from the last checkpoint for one more generation
        let resumed = run_training(
            &config,
            Some(&dir.path().join("ckpt-2")),
            1,
            &CancellationToken::new(),
        )
        .unwrap();
        assert_eq!(resumed.outcome, RunOutcome::Completed);
        assert!(dir.path().join("ckpt-3").exists());
    }

    #[test]
    fn test_cancelled_training_skips_best_genome() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.evolution.population_size = 3;
        config.training.checkpoint_prefix = dir
            .path()
            .join("ckpt-")
            .to_string_lossy()
            .into_owned();
        config.training.best_policy_path = dir
            .path()
            .join("best.bin")
            .to_string_lossy()
            .into_owned();
        config.training.stats_path = dir
            .path()
            .join("stats.json")
            .to_string_lossy()
            .into_owned();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let summary = run_training(&config, None, 5, &cancel).unwrap();

        assert_eq!(summary.outcome, RunOutcome::Cancelled);
        assert!(summary.best_path.is_none());
        assert!(!dir.path().join("best.bin").exists());
        assert!(dir.path().join("ckpt-0").exists());
    }
}
