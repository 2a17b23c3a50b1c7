//! Game layer for Spire.
//!
//! Implements the run on top of the deterministic RNG:
//! - Entities (player, enemy, cards, powers, dungeon map)
//! - Deck service (starter deck, shuffling, reward rolls)
//! - Combat service (card play, drawing, pile recycling)
//! - The orchestrator driving the map → combat → reward loop

pub mod combat;
pub mod deck;

mod card;
mod enemy;
mod map;
mod player;
mod power;
mod state;

pub use card::{Card, CardEffect, CardKind, Rarity};
pub use enemy::{Enemy, EnemyMove, Intent};
pub use map::{DungeonMap, MapNode, NodeId, NodeKind};
pub use player::Player;
pub use power::{PERMANENT, Power, PowerEffect, PowerKind};
pub use state::{FLOOR_COUNT, Game, GameState, LANES_PER_FLOOR, TURN_DRAW};
