//! Player state: vitals, card zones, statuses and attached powers.

use crate::game::card::Card;
use crate::game::enemy::Enemy;
use crate::game::power::{Power, PowerEffect};

/// State for the player across a whole run.
///
/// Cards only move along the cycle deck → draw pile → hand → discard pile
/// → draw pile; the zones never duplicate or lose a card. Health is not
/// floored at zero — any value at or below zero reads as defeated.
#[derive(Debug, Clone)]
pub struct Player {
    /// Current health; at or below zero means defeated.
    pub health: i32,
    /// Health ceiling for healing.
    pub max_health: i32,
    /// Ablative damage absorption, spent before health.
    pub block: i32,
    /// Currency earned from combat rewards.
    pub gold: u32,
    /// Per-turn resource spent to play cards.
    pub energy: i32,
    /// Energy restored at each turn start.
    pub max_energy: i32,
    /// Flat attack modifier counter.
    pub strength: i32,
    /// Flat defense modifier counter.
    pub dexterity: i32,
    /// Vulnerable stacks, decremented each turn.
    pub vulnerable: i32,
    /// Weak stacks, decremented each turn.
    pub weak: i32,
    /// Full owned card set, the source for each combat's draw pile.
    pub deck: Vec<Card>,
    /// Cards currently playable.
    pub hand: Vec<Card>,
    /// Face-down pile drawn from the front.
    pub draw_pile: Vec<Card>,
    /// Spent cards, recycled into the draw pile when it empties.
    pub discard_pile: Vec<Card>,
    /// Extra draws queued by card effects, drained after each play.
    pub pending_draws: usize,
    /// Active powers, processed in list order.
    pub powers: Vec<Power>,
}

impl Player {
    /// Create a fresh player with starting vitals and empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self {
            health: 80,
            max_health: 80,
            block: 0,
            gold: 0,
            energy: 3,
            max_energy: 3,
            strength: 0,
            dexterity: 0,
            vulnerable: 0,
            weak: 0,
            deck: Vec::new(),
            hand: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            pending_draws: 0,
            powers: Vec::new(),
        }
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

    /// Restore energy to its per-turn maximum.
    pub fn reset_energy(&mut self) {
        self.energy = self.max_energy;
    }

    /// Heal, clamped to max health.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Whether the player has been defeated.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Add (or with a negative amount, remove) strength.
    pub fn add_strength(&mut self, amount: i32) {
        self.strength += amount;
    }

    /// Set strength to an absolute value.
    pub fn set_strength(&mut self, amount: i32) {
        self.strength = amount;
    }

    /// Add (or with a negative amount, remove) dexterity.
    pub fn add_dexterity(&mut self, amount: i32) {
        self.dexterity += amount;
    }

    /// Stack vulnerable. Additive, no cap.
    pub fn apply_vulnerable(&mut self, amount: i32) {
        self.vulnerable += amount;
    }

    /// Stack weak. Additive, no cap.
    pub fn apply_weak(&mut self, amount: i32) {
        self.weak += amount;
    }

    /// Attach a power to the end of the power list.
    pub fn add_power(&mut self, power: Power) {
        self.powers.push(power);
    }

    /// Run the start-of-turn power pass.
    ///
    /// Fires every `on_turn_start` hook in list order, then decrements
    /// every non-permanent duration, then removes powers whose duration
    /// is now exactly zero.
    pub fn execute_start_turn_powers(&mut self, enemy: &mut Enemy) {
        self.fire_hooks(enemy, |p| p.on_turn_start);

        for power in &mut self.powers {
            if power.duration > 0 {
                power.duration -= 1;
            }
        }
        self.powers.retain(|p| p.duration != 0);
    }

    /// Run the end-of-turn power pass: `on_turn_end` hooks only, no
    /// duration bookkeeping.
    pub fn execute_end_turn_powers(&mut self, enemy: &mut Enemy) {
        self.fire_hooks(enemy, |p| p.on_turn_end);
    }

    /// Fire `on_card_played` hooks after a successful card play.
    pub fn execute_card_played_powers(&mut self, enemy: &mut Enemy) {
        self.fire_hooks(enemy, |p| p.on_card_played);
    }

    /// Fire `on_damage_taken` hooks after an enemy action cost health.
    pub fn execute_damage_taken_powers(&mut self, enemy: &mut Enemy) {
        self.fire_hooks(enemy, |p| p.on_damage_taken);
    }

    /// Collect one hook slot across the power list, then apply in order.
    ///
    /// Collecting first keeps the borrow of the power list out of the
    /// effect application, which mutates the player itself.
    fn fire_hooks(&mut self, enemy: &mut Enemy, select: fn(&Power) -> Option<PowerEffect>) {
        let effects: Vec<PowerEffect> = self.powers.iter().filter_map(select).collect();
        for effect in effects {
            self.apply_power_effect(effect, enemy);
        }
    }

    /// Interpret a single power effect.
    fn apply_power_effect(&mut self, effect: PowerEffect, enemy: &mut Enemy) {
        match effect {
            PowerEffect::GainStrength(amount) => self.add_strength(amount),
            PowerEffect::GainBlock(amount) => self.add_block(amount),
            PowerEffect::Heal(amount) => self.heal(amount),
            PowerEffect::DealDamage(amount) => enemy.apply_damage(amount),
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Kani formal verification proofs.
///
/// These prove the block-absorption arithmetic for damage resolution.
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    /// Prove that absorption conserves block + health losses.
    ///
    /// The total lost across block and health always equals the incoming
    /// damage, and block never goes negative.
    #[kani::proof]
    fn prove_absorption_conserves_damage() {
        let block: i32 = kani::any();
        let health: i32 = kani::any();
        let damage: i32 = kani::any();

        kani::assume(block >= 0 && block < 100_000);
        kani::assume(health > -100_000 && health < 100_000);
        kani::assume(damage >= 0 && damage < 100_000);

        // Mirror the absorption logic from apply_damage
        let (block_after, health_after) = if block >= damage {
            (block - damage, health)
        } else {
            (0, health - (damage - block))
        };

        assert!(block_after >= 0);
        assert!((block - block_after) + (health - health_after) == damage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::power::{PERMANENT, PowerKind};

    #[test]
    fn test_new_player_vitals() {
        let player = Player::new();
        assert_eq!(player.health, 80);
        assert_eq!(player.max_health, 80);
        assert_eq!(player.energy, 3);
        assert_eq!(player.max_energy, 3);
        assert_eq!(player.gold, 0);
        assert!(player.deck.is_empty());
    }

    #[test]
    fn test_apply_damage_fully_blocked() {
        let mut player = Player::new();
        player.add_block(10);
        player.apply_damage(6);
        assert_eq!(player.block, 4);
        assert_eq!(player.health, 80);
    }

    #[test]
    fn test_apply_damage_spills_into_health() {
        let mut player = Player::new();
        player.add_block(3);
        player.apply_damage(10);
        assert_eq!(player.block, 0);
        assert_eq!(player.health, 73);
    }

    #[test]
    fn test_apply_damage_exact_block() {
        let mut player = Player::new();
        player.add_block(7);
        player.apply_damage(7);
        assert_eq!(player.block, 0);
        assert_eq!(player.health, 80);
    }

    #[test]
    fn test_health_not_floored_at_zero() {
        let mut player = Player::new();
        player.apply_damage(100);
        assert_eq!(player.health, -20);
        assert!(player.is_defeated());
    }

    #[test]
    fn test_heal_clamped_to_max() {
        let mut player = Player::new();
        player.apply_damage(30);
        player.heal(100);
        assert_eq!(player.health, 80);
    }

    #[test]
    fn test_statuses_stack_additively() {
        let mut player = Player::new();
        player.apply_vulnerable(2);
        player.apply_vulnerable(3);
        player.apply_weak(1);
        player.add_strength(4);
        player.add_strength(-1);
        assert_eq!(player.vulnerable, 5);
        assert_eq!(player.weak, 1);
        assert_eq!(player.strength, 3);
    }

    #[test]
    fn test_start_turn_pass_fires_and_expires() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();

        let mut power = Power::new("Rage", 1);
        power.on_turn_start = Some(PowerEffect::GainStrength(2));
        player.add_power(power);

        player.execute_start_turn_powers(&mut enemy);
        assert_eq!(player.strength, 2);
        assert!(player.powers.is_empty(), "duration 1 expires after one pass");

        // A second pass must not fire the removed hook
        player.execute_start_turn_powers(&mut enemy);
        assert_eq!(player.strength, 2);
    }

    #[test]
    fn test_permanent_power_survives_passes() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();
        player.add_power(PowerKind::DemonForm.instantiate());

        for turn in 1..=3 {
            player.execute_start_turn_powers(&mut enemy);
            assert_eq!(player.strength, 3 * turn);
        }
        assert_eq!(player.powers.len(), 1);
        assert_eq!(player.powers[0].duration, PERMANENT);
    }

    #[test]
    fn test_duration_zero_power_fires_once_then_removed() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();

        let mut power = Power::new("Flicker", 0);
        power.on_turn_start = Some(PowerEffect::GainBlock(4));
        player.add_power(power);

        player.execute_start_turn_powers(&mut enemy);
        assert_eq!(player.block, 4, "hook fires in the registering pass");
        assert!(player.powers.is_empty(), "then the power is removed");
    }

    #[test]
    fn test_end_turn_pass_leaves_durations_alone() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();

        let mut power = Power::new("Metallicize", 2);
        power.on_turn_end = Some(PowerEffect::GainBlock(3));
        player.add_power(power);

        player.execute_end_turn_powers(&mut enemy);
        assert_eq!(player.block, 3);
        assert_eq!(player.powers[0].duration, 2);
    }

    #[test]
    fn test_power_can_damage_enemy() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();

        let mut power = Power::new("Thorns", PERMANENT);
        power.on_damage_taken = Some(PowerEffect::DealDamage(3));
        player.add_power(power);

        player.execute_damage_taken_powers(&mut enemy);
        assert_eq!(enemy.health, 17);
    }

    #[test]
    fn test_every_start_hook_fires() {
        let mut player = Player::new();
        let mut enemy = Enemy::slime();

        let mut surge = Power::new("Surge", PERMANENT);
        surge.on_turn_start = Some(PowerEffect::GainStrength(1));
        let mut echo = Power::new("Echo", PERMANENT);
        echo.on_turn_start = Some(PowerEffect::GainStrength(2));
        player.add_power(surge);
        player.add_power(echo);

        player.execute_start_turn_powers(&mut enemy);
        assert_eq!(player.strength, 3);
    }
}
