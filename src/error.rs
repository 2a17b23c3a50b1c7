//! Error types for game commands.

use std::fmt;

/// Failures of an orchestrator or combat command.
///
/// Every variant is a rejected precondition: the command returns before
/// mutating any state, so callers can retry with corrected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Card index is outside the current hand.
    NoSuchCard {
        /// The rejected hand index.
        index: usize,
        /// Number of cards currently in hand.
        hand_size: usize,
    },
    /// Playing the card costs more energy than is available.
    NotEnoughEnergy {
        /// Energy cost of the card.
        cost: i32,
        /// Energy currently available.
        available: i32,
    },
    /// The selected map node is not connected to the current node.
    UnreachableNode,
    /// Reward index is outside the offered cards.
    NoSuchReward {
        /// The rejected reward index.
        index: usize,
        /// Number of cards on offer.
        offered: usize,
    },
    /// A combat command was issued with no enemy present.
    NotInCombat,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NoSuchCard { index, hand_size } => {
                write!(f, "no card at hand index {index} (hand size {hand_size})")
            }
            CommandError::NotEnoughEnergy { cost, available } => {
                write!(f, "not enough energy: card costs {cost}, have {available}")
            }
            CommandError::UnreachableNode => {
                write!(f, "node is not reachable from the current node")
            }
            CommandError::NoSuchReward { index, offered } => {
                write!(f, "no reward at index {index} ({offered} offered)")
            }
            CommandError::NotInCombat => write!(f, "no combat in progress"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Result type for game commands.
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let e = CommandError::NotEnoughEnergy {
            cost: 2,
            available: 1,
        };
        let msg = e.to_string();
        assert!(msg.contains("costs 2"));
        assert!(msg.contains("have 1"));
    }

    #[test]
    fn test_no_such_card_display() {
        let e = CommandError::NoSuchCard {
            index: 5,
            hand_size: 3,
        };
        assert!(e.to_string().contains("index 5"));
    }
}
