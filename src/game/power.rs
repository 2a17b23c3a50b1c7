//! Powers: timed or permanent modifiers attached to the player.

/// Duration sentinel for a power that never expires.
pub const PERMANENT: i32 = -1;

/// One atomic effect fired by a power hook.
///
/// Interpreted by the player's hook passes; effects target the player
/// except [`PowerEffect::DealDamage`], which targets the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEffect {
    /// Add strength to the player.
    GainStrength(i32),
    /// Add block to the player.
    GainBlock(i32),
    /// Heal the player, clamped to max health.
    Heal(i32),
    /// Deal damage to the enemy.
    DealDamage(i32),
}

/// Built-in power templates grantable by cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerKind {
    /// +3 strength at the start of each turn, permanent.
    DemonForm,
}

impl PowerKind {
    /// Instantiate the template as an attachable [`Power`].
    #[must_use]
    pub const fn instantiate(self) -> Power {
        match self {
            PowerKind::DemonForm => Power {
                name: "Demon Form",
                description: "At the start of each turn, gain 3 strength",
                duration: PERMANENT,
                on_turn_start: Some(PowerEffect::GainStrength(3)),
                on_turn_end: None,
                on_card_played: None,
                on_damage_taken: None,
            },
        }
    }
}

/// A modifier attached to the player, triggered on turn boundaries.
///
/// Non-permanent durations count down once per start-of-turn pass; a power
/// is removed when its duration reaches exactly zero. A power registered
/// with duration 0 therefore fires its start-of-turn hook at most once, in
/// the first pass after it is added, and never survives to a second turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power {
    /// Display name.
    pub name: &'static str,
    /// One-line rules text.
    pub description: &'static str,
    /// Remaining turns, or [`PERMANENT`].
    pub duration: i32,
    /// Fired during the start-of-turn pass.
    pub on_turn_start: Option<PowerEffect>,
    /// Fired during the end-of-turn pass.
    pub on_turn_end: Option<PowerEffect>,
    /// Fired after each successfully played card.
    pub on_card_played: Option<PowerEffect>,
    /// Fired after an enemy action that cost the player health.
    pub on_damage_taken: Option<PowerEffect>,
}

impl Power {
    /// A power with the given name and duration and no hooks.
    ///
    /// Hook slots are filled in by the caller; this is the base for
    /// ad-hoc powers in tests and future card effects.
    #[must_use]
    pub const fn new(name: &'static str, duration: i32) -> Self {
        Self {
            name,
            description: "",
            duration,
            on_turn_start: None,
            on_turn_end: None,
            on_card_played: None,
            on_damage_taken: None,
        }
    }

    /// Whether this power never expires.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        self.duration == PERMANENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demon_form_template() {
        let power = PowerKind::DemonForm.instantiate();
        assert!(power.is_permanent());
        assert_eq!(power.on_turn_start, Some(PowerEffect::GainStrength(3)));
        assert_eq!(power.on_turn_end, None);
    }

    #[test]
    fn test_ad_hoc_power() {
        let mut power = Power::new("Thorns", 2);
        power.on_damage_taken = Some(PowerEffect::DealDamage(3));
        assert!(!power.is_permanent());
        assert_eq!(power.duration, 2);
    }
}
