use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{debug, info};

use crate::ai::{apply_action, Policy, Sensors};
use crate::cancel::CancellationToken;
use crate::config::Config;
use crate::game::{
    move_paddle, poll_input, update_with_events, Direction, GameState, InputAction, KeyMap,
    PhysicsEvents, Side,
};

use super::common::{frame_duration, limit_frame_rate};

/// A human on the left paddle against a policy on the right
///
/// No fitness is kept and no stopping rule applies; the match runs until the
/// player quits.
pub struct HumanMatch {
    pub game: GameState,
    opponent: Box<dyn Policy>,
    tap_steps: u32,
}

impl HumanMatch {
    pub fn new(game: GameState, opponent: Box<dyn Policy>, tap_steps: u32) -> Self {
        Self {
            game,
            opponent,
            tap_steps,
        }
    }

    /// Apply the player's inputs; returns false once a quit was requested
    pub fn handle_input(&mut self, actions: &[InputAction]) -> bool {
        for action in actions {
            let direction = match action {
                InputAction::Quit => return false,
                InputAction::PaddleUp => Direction::Up,
                InputAction::PaddleDown => Direction::Down,
            };
            for _ in 0..self.tap_steps {
                move_paddle(&mut self.game, Side::Left, direction);
            }
        }
        true
    }

    /// Let the policy move, then advance the physics one tick
    pub fn tick(&mut self) -> PhysicsEvents {
        let action = self
            .opponent
            .decide(&Sensors::observe(&self.game, Side::Right));
        apply_action(&mut self.game, Side::Right, action);
        update_with_events(&mut self.game)
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    fn status_line(&self) -> String {
        let info = self.game.info();
        format!(
            "You {} - {} {}  |  hits {} / {}  |  Q/Esc to quit",
            info.left_score,
            info.right_score,
            self.opponent.name(),
            info.left_hits,
            info.right_hits
        )
    }
}

/// Run the interactive match in raw terminal mode until the player quits
pub fn run_human_vs_policy(
    config: &Config,
    opponent: Box<dyn Policy>,
    cancel: &CancellationToken,
) -> Result<()> {
    let game = GameState::new(&config.physics);
    let mut human_match = HumanMatch::new(game, opponent, config.display.human_tap_steps);
    let keys = KeyMap::from_bindings(&config.keybindings);

    info!("Human vs {} started", human_match.opponent_name());

    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let result = run_loop(&mut human_match, &keys, config.display.target_fps, cancel);
    disable_raw_mode().context("Failed to restore terminal")?;
    println!();

    let info = human_match.game.info();
    info!(
        "Human vs {} finished: {}-{}",
        human_match.opponent_name(),
        info.left_score,
        info.right_score
    );
    result
}

fn run_loop(
    human_match: &mut HumanMatch,
    keys: &KeyMap,
    target_fps: u64,
    cancel: &CancellationToken,
) -> Result<()> {
    let frame = frame_duration(target_fps);
    let mut stdout = io::stdout();
    write!(stdout, "\r{}", human_match.status_line())?;
    stdout.flush()?;

    while !cancel.is_cancelled() {
        let now = Instant::now();

        let actions = poll_input(keys)?;
        if !human_match.handle_input(&actions) {
            break;
        }

        let events = human_match.tick();
        if events.any() {
            debug!("{:?}", events);
        }
        if let Some(side) = events.goal_scored {
            let info = human_match.game.info();
            info!(
                "{:?} scored: {}-{}",
                side, info.left_score, info.right_score
            );
            write!(stdout, "\r{}", human_match.status_line())?;
            stdout.flush()?;
        }

        limit_frame_rate(now, frame);
    }

    Ok(())
}
