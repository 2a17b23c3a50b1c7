//! Card-play resolution and drawing.
//!
//! Card effects are interpreted here, in one place, against the player
//! and the current enemy. All failures are rejected before any state
//! changes; exhausting both piles during a draw is not a failure.

use crate::error::{CommandError, CommandResult};
use crate::game::card::CardEffect;
use crate::game::deck;
use crate::game::enemy::Enemy;
use crate::game::player::Player;
use crate::rng::Rng;

/// Play the card at `index` in the player's hand against the enemy.
///
/// On success the card's effects run in listed order, the energy cost is
/// deducted, and the card moves hand → discard pile; the remaining hand
/// keeps its order. `on_card_played` power hooks fire last.
///
/// # Errors
///
/// Returns [`CommandError::NoSuchCard`] or
/// [`CommandError::NotEnoughEnergy`] with no state mutated.
pub fn use_card(player: &mut Player, enemy: &mut Enemy, index: usize) -> CommandResult<()> {
    if index >= player.hand.len() {
        return Err(CommandError::NoSuchCard {
            index,
            hand_size: player.hand.len(),
        });
    }

    let card = player.hand[index];
    if player.energy < card.energy_cost {
        return Err(CommandError::NotEnoughEnergy {
            cost: card.energy_cost,
            available: player.energy,
        });
    }

    for effect in card.effects {
        apply_effect(*effect, player, enemy);
    }
    player.energy -= card.energy_cost;

    let played = player.hand.remove(index);
    player.discard_pile.push(played);

    player.execute_card_played_powers(enemy);
    Ok(())
}

/// Draw up to `count` cards from the draw pile into the hand.
///
/// When the draw pile empties the discard pile is moved (not copied)
/// into it and shuffled. When both piles are empty the draw stops early;
/// this is silent truncation, never an error.
pub fn draw_cards(player: &mut Player, count: usize, rng: &mut Rng) {
    for _ in 0..count {
        if player.draw_pile.is_empty() {
            player.draw_pile = std::mem::take(&mut player.discard_pile);
            deck::shuffle(&mut player.draw_pile, rng);
        }
        if player.draw_pile.is_empty() {
            break;
        }
        let card = player.draw_pile.remove(0);
        player.hand.push(card);
    }
}

/// Interpret a single card effect.
fn apply_effect(effect: CardEffect, player: &mut Player, enemy: &mut Enemy) {
    match effect {
        CardEffect::DealDamage(amount) => enemy.apply_damage(amount),
        CardEffect::GainBlock(amount) => player.add_block(amount),
        CardEffect::ApplyVulnerable(amount) => enemy.apply_vulnerable(amount),
        CardEffect::ApplyWeak(amount) => enemy.apply_weak(amount),
        CardEffect::GainStrength(amount) => player.add_strength(amount),
        CardEffect::DoubleStrength => player.set_strength(player.strength * 2),
        CardEffect::Draw(count) => player.pending_draws += count,
        CardEffect::Grant(kind) => player.add_power(kind.instantiate()),
    }
}
