//! # Minimax Connect Four
//!
//! Connect Four against a fixed-depth minimax opponent. The engine scores
//! positions by counting streak windows and searches every move sequence to
//! the configured depth, without pruning.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board snapshots, sides, state machine
//! - [`ai`] — Agent trait, streak heuristic, negamax search
//! - [`session`] — Seats, scoreboard and rematches around the game state
//! - [`ui`] — Full-screen terminal UI built with Ratatui
//! - [`console`] — Line-based play over stdin/stdout
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
