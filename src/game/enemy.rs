//! Enemy state and cyclic behavior patterns.
//!
//! An enemy's behavior is a fixed list of [`EnemyMove`] values walked
//! round-robin. The upcoming intention shown to the player is *derived*
//! from the move at the cursor without executing it, so the preview and
//! the action that later runs can never disagree.

use crate::game::player::Player;

/// One deterministic enemy behavior, selectable in round-robin order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyMove {
    /// Hit the player for `damage` plus current strength.
    Attack {
        /// Base damage before the strength modifier.
        damage: i32,
    },
    /// Gain block.
    Defend {
        /// Block gained.
        block: i32,
    },
    /// Gain strength and block.
    Buff {
        /// Strength gained.
        strength: i32,
        /// Block gained.
        block: i32,
    },
}

/// The declared preview of an enemy's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    /// Short label for display.
    pub label: &'static str,
    /// Damage the move would deal right now (0 for non-attacks).
    pub damage: i32,
}

impl EnemyMove {
    /// Derive the display intent for this move at the given strength.
    ///
    /// Side-effect free: previewing never mutates anything.
    #[must_use]
    pub const fn intent(self, strength: i32) -> Intent {
        match self {
            EnemyMove::Attack { damage } => Intent {
                label: "Attack",
                damage: damage + strength,
            },
            EnemyMove::Defend { .. } => Intent {
                label: "Defend",
                damage: 0,
            },
            EnemyMove::Buff { .. } => Intent {
                label: "Buff",
                damage: 0,
            },
        }
    }
}

/// State for a single enemy during one combat.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    /// Display name.
    pub name: &'static str,
    /// Current health; at or below zero means defeated.
    pub health: i32,
    /// Health ceiling.
    pub max_health: i32,
    /// Ablative damage absorption, spent before health.
    pub block: i32,
    /// Flat attack modifier counter.
    pub strength: i32,
    /// Vulnerable stacks, decremented each turn.
    pub vulnerable: i32,
    /// Weak stacks, decremented each turn.
    pub weak: i32,
    /// Behavior list, never empty.
    patterns: &'static [EnemyMove],
    /// Cursor into `patterns` for the next move.
    pattern_idx: usize,
}

impl Enemy {
    const SLIME_PATTERNS: &'static [EnemyMove] = &[
        EnemyMove::Attack { damage: 5 },
        EnemyMove::Defend { block: 5 },
    ];

    const JAW_WORM_PATTERNS: &'static [EnemyMove] = &[
        EnemyMove::Buff {
            strength: 3,
            block: 6,
        },
        EnemyMove::Attack { damage: 11 },
        EnemyMove::Defend { block: 6 },
    ];

    /// Slime: 20 HP, alternates attacking and blocking.
    #[must_use]
    pub const fn slime() -> Self {
        Self::from_template("Slime", 20, Self::SLIME_PATTERNS)
    }

    /// Jaw Worm: 40 HP, cycles buff, attack, defend.
    #[must_use]
    pub const fn jaw_worm() -> Self {
        Self::from_template("Jaw Worm", 40, Self::JAW_WORM_PATTERNS)
    }

    /// Elite encounter: a Jaw Worm with +20 max HP and +2 strength.
    #[must_use]
    pub const fn elite_jaw_worm() -> Self {
        let mut enemy = Self::jaw_worm();
        enemy.max_health += 20;
        enemy.health += 20;
        enemy.strength += 2;
        enemy
    }

    /// Boss encounter: a Jaw Worm with tripled max HP (healed to the new
    /// max) and +5 strength.
    #[must_use]
    pub const fn boss_jaw_worm() -> Self {
        let mut enemy = Self::jaw_worm();
        enemy.max_health *= 3;
        enemy.health = enemy.max_health;
        enemy.strength += 5;
        enemy.name = "Colossal Jaw Worm";
        enemy
    }

    const fn from_template(
        name: &'static str,
        health: i32,
        patterns: &'static [EnemyMove],
    ) -> Self {
        Self {
            name,
            health,
            max_health: health,
            block: 0,
            strength: 0,
            vulnerable: 0,
            weak: 0,
            patterns,
            pattern_idx: 0,
        }
    }

    /// The move that will execute at the next turn end.
    #[must_use]
    pub fn next_move(&self) -> EnemyMove {
        self.patterns[self.pattern_idx]
    }

    /// The declared intention for the next move, at current strength.
    #[must_use]
    pub fn intention(&self) -> Intent {
        self.next_move().intent(self.strength)
    }

    /// Execute the queued move against the player, then advance the
    /// pattern cursor round-robin.
    pub fn perform_action(&mut self, player: &mut Player) {
        match self.next_move() {
            EnemyMove::Attack { damage } => player.apply_damage(damage + self.strength),
            EnemyMove::Defend { block } => self.add_block(block),
            EnemyMove::Buff { strength, block } => {
                self.strength += strength;
                self.add_block(block);
            }
        }
        self.pattern_idx = (self.pattern_idx + 1) % self.patterns.len();
    }

    /// Apply incoming damage, spending block before health.
    ///
    /// Block never goes negative; health may. Amounts at or below zero
    /// are ignored.
    pub fn apply_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        if self.block >= amount {
            self.block -= amount;
        } else {
            let spill = amount - self.block;
            self.block = 0;
            self.health -= spill;
        }
    }

    /// Add block. Additive and unbounded.
    pub fn add_block(&mut self, amount: i32) {
        self.block += amount;
    }

    /// Whether this enemy has been defeated.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Stack vulnerable. Additive, no cap.
    pub fn apply_vulnerable(&mut self, amount: i32) {
        self.vulnerable += amount;
    }

    /// Stack weak. Additive, no cap.
    pub fn apply_weak(&mut self, amount: i32) {
        self.weak += amount;
    }

    /// Add strength.
    pub fn add_strength(&mut self, amount: i32) {
        self.strength += amount;
    }
}
