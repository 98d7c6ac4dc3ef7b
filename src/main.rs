use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use neat_pong::ai::{create_policy, NetworkPolicy, Policy, PolicyKind};
use neat_pong::cancel::{install_ctrl_c_handler, CancellationToken};
use neat_pong::config::{get_config_path, load_config_from, Config};
use neat_pong::debug::{self, LogTarget};
use neat_pong::evolution::{load_genome, RunOutcome};
use neat_pong::game::Side;
use neat_pong::game_modes::{run_human_vs_policy, run_training};

#[derive(Parser)]
#[command(name = "neat-pong")]
#[command(version, about = "Evolve Pong paddle policies and play against them")]
struct Cli {
    /// Play against a policy (without --train, skips training)
    #[arg(long)]
    test: bool,

    /// Train policies (without --test, skips the match)
    #[arg(long)]
    train: bool,

    /// Checkpoint file to resume training from
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Number of generations to train
    #[arg(long, default_value = "30")]
    generations: u32,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at DEBUG level
    #[arg(long)]
    debug: bool,

    /// Override the training seed
    #[arg(long)]
    seed: Option<u64>,

    /// Policy on the right paddle in test mode
    #[arg(long, value_enum, default_value = "best")]
    opponent: Opponent,
}

#[derive(Clone, Copy, ValueEnum)]
enum Opponent {
    /// The saved best genome
    Best,
    /// Chases the ball
    Tracking,
    /// Predicts the intercept, small errors
    Predictive,
    /// Predicts the intercept, large errors
    PredictiveEasy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Neither flag given: train, then play
    let (train, test) = if !cli.train && !cli.test {
        (true, true)
    } else {
        (cli.train, cli.test)
    };

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let mut config = load_config_from(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if let Some(seed) = cli.seed {
        config.training.seed = seed;
    }

    let log_file = PathBuf::from(&config.display.log_file);
    let target = if test {
        LogTarget::File(&log_file)
    } else {
        LogTarget::Stderr
    };
    debug::init(cli.debug, target)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    info!("Using config {}", config_path.display());

    let cancel = CancellationToken::new();
    install_ctrl_c_handler(cancel.clone()).context("Failed to install Ctrl+C handler")?;

    if train {
        println!("Training for {} generations...", cli.generations);
        let summary = run_training(
            &config,
            cli.checkpoint.as_deref(),
            cli.generations,
            &cancel,
        )?;

        match (&summary.best, &summary.best_path) {
            (Some(best), Some(path)) => println!(
                "Best genome {} (fitness {:.2}) saved to {}",
                best.key,
                best.fitness.unwrap_or(0.0),
                path.display()
            ),
            _ => println!("Training stopped: {:?}", summary.outcome),
        }

        if summary.outcome == RunOutcome::Cancelled {
            return Ok(());
        }
    }

    if test && !cancel.is_cancelled() {
        let opponent = build_opponent(cli.opponent, &config)?;
        run_human_vs_policy(&config, opponent, &cancel)?;
    }

    Ok(())
}

fn build_opponent(opponent: Opponent, config: &Config) -> Result<Box<dyn Policy>> {
    let kind = match opponent {
        Opponent::Best => {
            let path = Path::new(&config.training.best_policy_path);
            let genome = load_genome(path).with_context(|| {
                format!(
                    "No trained policy at {}; run with --train first",
                    path.display()
                )
            })?;
            return Ok(Box::new(NetworkPolicy::from_genome(&genome)));
        }
        Opponent::Tracking => PolicyKind::Tracking,
        Opponent::Predictive => PolicyKind::PredictiveHard,
        Opponent::PredictiveEasy => PolicyKind::PredictiveEasy,
    };
    Ok(create_policy(kind, Side::Right, &config.physics))
}
