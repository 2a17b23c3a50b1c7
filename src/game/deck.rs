//! Deck construction, shuffling and reward generation.

use crate::game::card::{Card, Rarity};
use crate::rng::Rng;

/// Number of cards offered after a won combat.
pub const REWARD_CHOICES: usize = 3;

/// Build the fixed starter deck: 5 Strike, 4 Defend, 1 Bash,
/// 2 Pommel Strike (12 cards).
///
/// The order is deterministic; shuffling happens at combat start.
#[must_use]
pub fn starter_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(12);
    for _ in 0..5 {
        deck.push(Card::strike());
    }
    for _ in 0..4 {
        deck.push(Card::defend());
    }
    deck.push(Card::bash());
    for _ in 0..2 {
        deck.push(Card::pommel_strike());
    }
    deck
}

/// Shuffle a pile in place, uniformly over permutations.
pub fn shuffle(cards: &mut [Card], rng: &mut Rng) {
    rng.shuffle(cards);
}

/// Roll a reward offer of exactly [`REWARD_CHOICES`] cards.
///
/// Each slot is drawn independently: rarity weights are Common 70%,
/// Uncommon 25%, Rare 5%, then a fair coin picks between the tier's two
/// templates. Duplicates across slots are possible.
#[must_use]
pub fn random_reward(rng: &mut Rng) -> Vec<Card> {
    (0..REWARD_CHOICES).map(|_| roll_reward_card(rng)).collect()
}

fn roll_reward_card(rng: &mut Rng) -> Card {
    let rarity = match rng.percent() {
        0..=69 => Rarity::Common,
        70..=94 => Rarity::Uncommon,
        _ => Rarity::Rare,
    };
    let pair = Card::reward_pair(rarity);
    if rng.coin_flip() { pair[0] } else { pair[1] }
}
