// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Spire: a turn-based deck-building roguelike engine for the terminal.
//!
//! This crate provides the game-state and combat-resolution engine:
//! - Deterministic runs reproducible from a single seed
//! - A map → combat → reward state machine with strict command validation
//! - Data-driven cards, powers and enemy patterns (no embedded closures)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      CLI / TUI (play, simulate)     │
//! ├─────────────────────────────────────┤
//! │     Orchestrator (game::Game)       │
//! ├─────────────────────────────────────┤
//! │  Services (game::combat, ::deck)    │
//! ├─────────────────────────────────────┤
//! │   Entities (player, enemy, map)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! The layers only call downward: the orchestrator mutates entities
//! through the services and never reaches back into rendering or input.

pub mod error;
pub mod game;
pub mod rng;

pub use error::{CommandError, CommandResult};

// Re-export key game types at crate root for convenience
pub use game::{Card, DungeonMap, Enemy, Game, GameState, NodeId, NodeKind, Player};
pub use rng::Rng;
