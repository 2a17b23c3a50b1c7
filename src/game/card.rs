//! Card templates and effects.
//!
//! Cards are immutable `Copy` values over `'static` data: playing a card
//! never mutates the template, only the zones holding copies of it. A
//! card's behavior is a list of [`CardEffect`] values interpreted by the
//! combat service, so the full catalog is plain data.

use crate::game::power::PowerKind;

/// Rarity tier of a card, used for reward weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    /// 70% of reward rolls.
    Common,
    /// 25% of reward rolls.
    Uncommon,
    /// 5% of reward rolls.
    Rare,
}

/// Broad category of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// Deals damage to the enemy.
    Attack,
    /// Blocks, debuffs or other one-shot utility.
    Skill,
    /// Grants a lasting modifier.
    Power,
}

/// One atomic effect of playing a card.
///
/// Effects are applied in listed order against the player and the enemy;
/// the interpreter lives in the combat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    /// Deal damage to the enemy, absorbed by its block first.
    DealDamage(i32),
    /// Add block to the player.
    GainBlock(i32),
    /// Stack vulnerable on the enemy.
    ApplyVulnerable(i32),
    /// Stack weak on the enemy.
    ApplyWeak(i32),
    /// Add strength to the player.
    GainStrength(i32),
    /// Double the player's current strength.
    DoubleStrength,
    /// Queue extra card draws, satisfied right after the play resolves.
    Draw(usize),
    /// Attach a power to the player.
    Grant(PowerKind),
}

/// An immutable card template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// Display name.
    pub name: &'static str,
    /// One-line rules text.
    pub description: &'static str,
    /// Energy cost to play.
    pub energy_cost: i32,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Broad category.
    pub kind: CardKind,
    /// Effects applied in order when played.
    pub effects: &'static [CardEffect],
}

impl Card {
    /// Basic attack: deal 6 damage.
    #[must_use]
    pub const fn strike() -> Self {
        Self {
            name: "Strike",
            description: "Deal 6 damage",
            energy_cost: 1,
            rarity: Rarity::Common,
            kind: CardKind::Attack,
            effects: &[CardEffect::DealDamage(6)],
        }
    }

    /// Basic defense: gain 5 block.
    #[must_use]
    pub const fn defend() -> Self {
        Self {
            name: "Defend",
            description: "Gain 5 block",
            energy_cost: 1,
            rarity: Rarity::Common,
            kind: CardKind::Skill,
            effects: &[CardEffect::GainBlock(5)],
        }
    }

    /// Heavy attack: deal 8 damage and apply 2 vulnerable.
    #[must_use]
    pub const fn bash() -> Self {
        Self {
            name: "Bash",
            description: "Deal 8 damage, apply 2 vulnerable",
            energy_cost: 2,
            rarity: Rarity::Common,
            kind: CardKind::Attack,
            effects: &[CardEffect::DealDamage(8), CardEffect::ApplyVulnerable(2)],
        }
    }

    /// Attack with card advantage: deal 9 damage, draw 1 card.
    #[must_use]
    pub const fn pommel_strike() -> Self {
        Self {
            name: "Pommel Strike",
            description: "Deal 9 damage, draw 1 card",
            energy_cost: 1,
            rarity: Rarity::Common,
            kind: CardKind::Attack,
            effects: &[CardEffect::DealDamage(9), CardEffect::Draw(1)],
        }
    }

    /// Debuff skill: apply 3 vulnerable and 3 weak.
    #[must_use]
    pub const fn shockwave() -> Self {
        Self {
            name: "Shockwave",
            description: "Apply 3 vulnerable and 3 weak",
            energy_cost: 2,
            rarity: Rarity::Uncommon,
            kind: CardKind::Skill,
            effects: &[CardEffect::ApplyVulnerable(3), CardEffect::ApplyWeak(3)],
        }
    }

    /// Power card: gain 2 strength.
    #[must_use]
    pub const fn inflame() -> Self {
        Self {
            name: "Inflame",
            description: "Gain 2 strength",
            energy_cost: 1,
            rarity: Rarity::Uncommon,
            kind: CardKind::Power,
            effects: &[CardEffect::GainStrength(2)],
        }
    }

    /// Rare skill: double current strength.
    #[must_use]
    pub const fn limit_break() -> Self {
        Self {
            name: "Limit Break",
            description: "Double your strength",
            energy_cost: 3,
            rarity: Rarity::Rare,
            kind: CardKind::Skill,
            effects: &[CardEffect::DoubleStrength],
        }
    }

    /// Rare power: gain 3 strength at the start of each turn.
    #[must_use]
    pub const fn demon_form() -> Self {
        Self {
            name: "Demon Form",
            description: "At the start of each turn, gain 3 strength",
            energy_cost: 3,
            rarity: Rarity::Rare,
            kind: CardKind::Power,
            effects: &[CardEffect::Grant(PowerKind::DemonForm)],
        }
    }

    /// The two reward templates of a rarity tier.
    #[must_use]
    pub const fn reward_pair(rarity: Rarity) -> [Self; 2] {
        match rarity {
            Rarity::Common => [Self::strike(), Self::pommel_strike()],
            Rarity::Uncommon => [Self::shockwave(), Self::inflame()],
            Rarity::Rare => [Self::limit_break(), Self::demon_form()],
        }
    }
}
