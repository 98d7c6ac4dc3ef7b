// neat-pong: Pong physics, evolved paddle policies and a human-vs-policy mode

pub mod ai;
pub mod cancel;
pub mod config;
pub mod debug;
pub mod error;
pub mod evolution;
pub mod game;
pub mod game_modes;
pub mod tictactoe;
