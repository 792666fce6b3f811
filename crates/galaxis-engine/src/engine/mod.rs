//! Game engine logic and state management.
//!
//! This module builds the game on top of the core data structures:
//!
//! - [`GameSession`] - The state machine: active piece, next piece, pause and game over
//! - [`DropTimer`] - Deadlines of the automatic drop, driven by caller-supplied time
//! - [`GameStats`] / [`LifetimeStats`] - Per-game and cumulative statistics
//! - [`AchievementTracker`] - Unlock rules and galaxy points
//! - [`KeyValueStore`] / [`ProgressStore`] - Persistence of progress across runs
//! - [`PieceGenerator`] / [`PieceSeed`] - Deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] over a store and call [`GameSession::start`]
//! 2. Feed player input through [`GameSession::apply`]
//! 3. Call [`GameSession::advance`] whenever time passes; the timer fires the
//!    automatic drops that are due
//! 4. A piece that cannot move down lands: lines clear, score and level
//!    update, achievements are evaluated and the next piece spawns
//! 5. A spawn that collides ends the game and persists the progress
//!
//! Renderers read [`GameSession::snapshot`] and
//! [`GameSession::drain_events`] after each step.

pub use self::{
    achievement::*, config::*, event::*, game_stats::*, piece_generator::*, session::*,
    snapshot::*, store::*, timer::*,
};

mod achievement;
mod config;
mod event;
mod game_stats;
mod piece_generator;
mod session;
mod snapshot;
mod store;
mod timer;
