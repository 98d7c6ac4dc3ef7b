use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::config::KeyBindings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    PaddleUp,
    PaddleDown,
}

/// Resolved key codes for the human-controlled paddle
#[derive(Debug, Clone)]
pub struct KeyMap {
    up: KeyCode,
    down: KeyCode,
    quit: KeyCode,
}

impl KeyMap {
    /// Build a key map from config strings, keeping the default for any unparseable key
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        Self {
            up: parse_key(&bindings.paddle_up).unwrap_or(KeyCode::Char('w')),
            down: parse_key(&bindings.paddle_down).unwrap_or(KeyCode::Char('s')),
            quit: parse_key(&bindings.quit).unwrap_or(KeyCode::Char('q')),
        }
    }

    /// Translate one key event; Esc and Ctrl+C always quit
    pub fn action_for(&self, key: &KeyEvent) -> Option<InputAction> {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(InputAction::Quit);
        }

        let code = normalize(key.code);
        if code == KeyCode::Esc || code == self.quit {
            Some(InputAction::Quit)
        } else if code == self.up {
            Some(InputAction::PaddleUp)
        } else if code == self.down {
            Some(InputAction::PaddleDown)
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_bindings(&KeyBindings::default())
    }
}

/// Parse a key name from the config file ("Up", "Esc", "W", ...)
pub fn parse_key(name: &str) -> Option<KeyCode> {
    match name {
        "Up" => Some(KeyCode::Up),
        "Down" => Some(KeyCode::Down),
        "Left" => Some(KeyCode::Left),
        "Right" => Some(KeyCode::Right),
        "Enter" => Some(KeyCode::Enter),
        "Esc" => Some(KeyCode::Esc),
        "Space" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(normalize(KeyCode::Char(c))),
                _ => None,
            }
        }
    }
}

// Letter keys match regardless of shift state
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Drain all pending terminal events and return the resulting actions.
pub fn poll_input(keys: &KeyMap) -> Result<Vec<InputAction>, std::io::Error> {
    let mut actions = Vec::new();

    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if let Some(action) = keys.action_for(&key) {
                actions.push(action);
            }
        }
    }

    Ok(actions)
}
