//! The game orchestrator: owns the run's state and drives transitions.
//!
//! All mutation of the player, enemy and map flows through the command
//! methods here, which delegate to the deck and combat services. The
//! rendering and input layers only read the public state and call these
//! commands; the orchestrator never calls back into them.

use crate::error::{CommandError, CommandResult};
use crate::game::card::Card;
use crate::game::combat;
use crate::game::deck;
use crate::game::enemy::Enemy;
use crate::game::map::{DungeonMap, NodeId, NodeKind};
use crate::game::player::Player;
use crate::rng::Rng;

/// Floors in a generated dungeon.
pub const FLOOR_COUNT: usize = 15;

/// Lanes per dungeon floor.
pub const LANES_PER_FLOOR: usize = 4;

/// Cards drawn at the start of each combat turn.
pub const TURN_DRAW: usize = 5;

/// The current screen of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Choosing the next node on the dungeon map.
    Map,
    /// Fighting the current enemy.
    Combat,
    /// Choosing (or skipping) a card reward after a won combat.
    Reward,
    /// Resting: heal or upgrade.
    Rest,
    /// Shop placeholder; any acknowledgement returns to the map.
    Shop,
    /// Event/treasure placeholder; any acknowledgement returns to the map.
    Event,
    /// The player was defeated.
    GameOver,
}

/// One full run: player, dungeon, current combat and screen state.
///
/// The orchestrator exclusively owns the player and the map for the
/// lifetime of the run. An enemy exists only during combat and is
/// dropped as soon as the combat ends, whichever way it ends.
#[derive(Debug, Clone)]
pub struct Game {
    /// The player, owned for the whole run.
    pub player: Player,
    /// The current enemy; `None` outside combat.
    pub enemy: Option<Enemy>,
    /// The generated dungeon.
    pub map: DungeonMap,
    /// Cards currently on offer after a won combat.
    pub card_rewards: Vec<Card>,
    /// Current screen of the state machine.
    pub state: GameState,
    rng: Rng,
    done: bool,
}

impl Game {
    /// Start a fresh run from a seed: starter deck, generated dungeon,
    /// map screen, positioned on a random first-floor node.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let mut player = Player::new();
        player.deck = deck::starter_deck();
        let map = DungeonMap::generate(FLOOR_COUNT, LANES_PER_FLOOR, &mut rng);

        Self {
            player,
            enemy: None,
            map,
            card_rewards: Vec::new(),
            state: GameState::Map,
            rng,
            done: false,
        }
    }

    /// Begin a combat at the current node.
    ///
    /// Resets the hand and discard pile, loads the full deck into the
    /// draw pile and shuffles it, spawns the node's enemy (regular nodes
    /// pick 50/50 between the two base templates), clears the player's
    /// vulnerable/weak, restores energy, draws the opening hand and runs
    /// the start-of-turn power pass.
    pub fn start_new_combat(&mut self) {
        self.player.hand.clear();
        self.player.discard_pile.clear();
        self.player.draw_pile = self.player.deck.clone();
        deck::shuffle(&mut self.player.draw_pile, &mut self.rng);

        let mut enemy = match self.map.current_node().kind {
            NodeKind::Elite => Enemy::elite_jaw_worm(),
            NodeKind::Boss => Enemy::boss_jaw_worm(),
            _ => {
                if self.rng.coin_flip() {
                    Enemy::slime()
                } else {
                    Enemy::jaw_worm()
                }
            }
        };

        self.player.vulnerable = 0;
        self.player.weak = 0;
        self.player.reset_energy();
        combat::draw_cards(&mut self.player, TURN_DRAW, &mut self.rng);
        self.player.execute_start_turn_powers(&mut enemy);

        self.enemy = Some(enemy);
        self.state = GameState::Combat;
    }

    /// Move to a connected map node and enter its encounter.
    ///
    /// Combat nodes start a combat; Rest and Shop open their screens;
    /// Event and Treasure both open the event screen.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::UnreachableNode`] (with no state change)
    /// if the node is not connected to the current one.
    pub fn select_map_node(&mut self, id: NodeId) -> CommandResult<()> {
        self.map.move_to(id)?;

        match self.map.current_node().kind {
            NodeKind::Enemy | NodeKind::Elite | NodeKind::Boss => self.start_new_combat(),
            NodeKind::Rest => self.state = GameState::Rest,
            NodeKind::Shop => self.state = GameState::Shop,
            NodeKind::Treasure | NodeKind::Event => self.state = GameState::Event,
        }
        Ok(())
    }

    /// Play the card at `index` in the hand.
    ///
    /// On success, extra draws queued by the card are satisfied
    /// immediately. If the enemy is now defeated the run moves to the
    /// reward screen, gold is granted by node kind (Enemy 10, Elite 25,
    /// Boss 50) and a three-card offer is rolled.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotInCombat`] outside combat, or the
    /// combat service's rejection, all with no state mutated.
    pub fn use_card(&mut self, index: usize) -> CommandResult<()> {
        let Some(enemy) = self.enemy.as_mut() else {
            return Err(CommandError::NotInCombat);
        };
        combat::use_card(&mut self.player, enemy, index)?;

        if self.player.pending_draws > 0 {
            let pending = std::mem::take(&mut self.player.pending_draws);
            combat::draw_cards(&mut self.player, pending, &mut self.rng);
        }

        if self.enemy.as_ref().is_some_and(Enemy::is_defeated) {
            self.enemy = None;
            self.state = GameState::Reward;
            self.player.gold += gold_reward(self.map.current_node().kind);
            self.card_rewards = deck::random_reward(&mut self.rng);
        }
        Ok(())
    }

    /// End the player's turn and resolve the enemy's queued move.
    ///
    /// Discards the hand, runs the end-of-turn power pass, decays
    /// vulnerable/weak on both sides, executes the enemy's declared
    /// action, then either ends the run (player defeated) or sets up the
    /// next turn: energy restored, five cards drawn, start-of-turn power
    /// pass.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotInCombat`] outside combat.
    pub fn end_turn(&mut self) -> CommandResult<()> {
        let mut enemy = self.enemy.take().ok_or(CommandError::NotInCombat)?;

        let mut hand = std::mem::take(&mut self.player.hand);
        self.player.discard_pile.append(&mut hand);

        self.player.execute_end_turn_powers(&mut enemy);

        if self.player.vulnerable > 0 {
            self.player.vulnerable -= 1;
        }
        if self.player.weak > 0 {
            self.player.weak -= 1;
        }
        if enemy.vulnerable > 0 {
            enemy.vulnerable -= 1;
        }
        if enemy.weak > 0 {
            enemy.weak -= 1;
        }

        let health_before = self.player.health;
        enemy.perform_action(&mut self.player);
        if self.player.health < health_before {
            self.player.execute_damage_taken_powers(&mut enemy);
        }

        if self.player.is_defeated() {
            self.state = GameState::GameOver;
            return Ok(());
        }

        self.player.reset_energy();
        combat::draw_cards(&mut self.player, TURN_DRAW, &mut self.rng);
        self.player.execute_start_turn_powers(&mut enemy);
        self.enemy = Some(enemy);
        Ok(())
    }

    /// Take the reward card at `index` into the deck and return to the
    /// map.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoSuchReward`] (offer unchanged) if the
    /// index is out of bounds.
    pub fn select_card_reward(&mut self, index: usize) -> CommandResult<()> {
        if index >= self.card_rewards.len() {
            return Err(CommandError::NoSuchReward {
                index,
                offered: self.card_rewards.len(),
            });
        }
        let card = self.card_rewards[index];
        self.player.deck.push(card);
        self.card_rewards.clear();
        self.return_to_map();
        Ok(())
    }

    /// Decline the reward offer and return to the map.
    pub fn skip_card_reward(&mut self) {
        self.card_rewards.clear();
        self.return_to_map();
    }

    /// Rest: heal a third of max health (clamped) and return to the map.
    pub fn rest_heal(&mut self) {
        let amount = self.player.max_health / 3;
        self.player.heal(amount);
        self.return_to_map();
    }

    /// Rest: upgrade a card. Card upgrading is not built yet; returns to
    /// the map with no other change.
    pub fn rest_upgrade(&mut self) {
        self.return_to_map();
    }

    /// Return to the map screen.
    pub fn return_to_map(&mut self) {
        self.state = GameState::Map;
    }

    /// Set the cooperative exit flag.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Whether the exit flag is set.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }
}

/// Gold granted for winning a combat at a node of this kind.
const fn gold_reward(kind: NodeKind) -> u32 {
    match kind {
        NodeKind::Enemy => 10,
        NodeKind::Elite => 25,
        NodeKind::Boss => 50,
        NodeKind::Rest | NodeKind::Shop | NodeKind::Treasure | NodeKind::Event => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_initial_state() {
        let game = Game::new(1);
        assert_eq!(game.state, GameState::Map);
        assert!(game.enemy.is_none());
        assert_eq!(game.player.deck.len(), 12);
        assert_eq!(game.map.current().floor, 0);
        assert!(!game.is_done());
    }

    #[test]
    fn test_start_new_combat_sets_up_zones() {
        let mut game = Game::new(2);
        game.start_new_combat();

        assert_eq!(game.state, GameState::Combat);
        assert!(game.enemy.is_some());
        assert_eq!(game.player.hand.len(), 5);
        assert_eq!(game.player.draw_pile.len(), 7);
        assert!(game.player.discard_pile.is_empty());
        assert_eq!(game.player.deck.len(), 12, "deck itself is untouched");
        assert_eq!(game.player.energy, game.player.max_energy);
    }

    #[test]
    fn test_start_new_combat_clears_player_debuffs() {
        let mut game = Game::new(3);
        game.player.vulnerable = 4;
        game.player.weak = 2;
        game.start_new_combat();
        assert_eq!(game.player.vulnerable, 0);
        assert_eq!(game.player.weak, 0);
    }

    #[test]
    fn test_regular_node_spawns_base_template() {
        let mut game = Game::new(4);
        game.start_new_combat();
        let name = game.enemy.as_ref().map(|e| e.name);
        assert!(name == Some("Slime") || name == Some("Jaw Worm"));
    }

    #[test]
    fn test_select_map_node_rejects_unconnected() {
        let mut game = Game::new(5);
        let before = game.map.current();

        let err = game.select_map_node(NodeId::new(5, 0)).unwrap_err();
        assert_eq!(err, CommandError::UnreachableNode);
        assert_eq!(game.map.current(), before);
        assert_eq!(game.state, GameState::Map);
    }

    #[test]
    fn test_select_map_node_routes_by_kind() {
        let mut game = Game::new(6);
        let target = game.map.connections()[0];
        let kind = game.map.node(target).map(|n| n.kind);
        game.select_map_node(target).unwrap();

        match kind {
            Some(NodeKind::Enemy | NodeKind::Elite | NodeKind::Boss) => {
                assert_eq!(game.state, GameState::Combat);
                assert!(game.enemy.is_some());
            }
            Some(NodeKind::Rest) => assert_eq!(game.state, GameState::Rest),
            Some(NodeKind::Shop) => assert_eq!(game.state, GameState::Shop),
            Some(NodeKind::Treasure | NodeKind::Event) => {
                assert_eq!(game.state, GameState::Event);
            }
            None => unreachable!("connection must resolve"),
        }
    }

    #[test]
    fn test_use_card_outside_combat_fails() {
        let mut game = Game::new(7);
        assert_eq!(game.use_card(0), Err(CommandError::NotInCombat));
    }

    #[test]
    fn test_end_turn_outside_combat_fails() {
        let mut game = Game::new(7);
        assert_eq!(game.end_turn(), Err(CommandError::NotInCombat));
    }

    #[test]
    fn test_defeating_enemy_grants_reward() {
        let mut game = Game::new(8);
        game.start_new_combat();

        // Pin the combat to a known spot: a nearly dead slime and a
        // guaranteed attack in hand.
        game.enemy = Some(Enemy::slime());
        if let Some(enemy) = game.enemy.as_mut() {
            enemy.health = 5;
        }
        game.player.hand = vec![Card::strike()];
        game.player.energy = 3;
        let gold_before = game.player.gold;

        game.use_card(0).unwrap();

        assert_eq!(game.state, GameState::Reward);
        assert!(game.enemy.is_none(), "enemy is discarded after combat");
        assert_eq!(game.player.gold, gold_before + 10);
        assert_eq!(game.card_rewards.len(), 3);
    }

    #[test]
    fn test_select_card_reward_adds_to_deck() {
        let mut game = Game::new(9);
        game.state = GameState::Reward;
        game.card_rewards = vec![Card::shockwave(), Card::inflame(), Card::strike()];

        game.select_card_reward(1).unwrap();
        assert_eq!(game.player.deck.len(), 13);
        assert_eq!(game.player.deck[12].name, "Inflame");
        assert!(game.card_rewards.is_empty());
        assert_eq!(game.state, GameState::Map);
    }

    #[test]
    fn test_select_card_reward_out_of_bounds() {
        let mut game = Game::new(10);
        game.state = GameState::Reward;
        game.card_rewards = vec![Card::strike()];

        let err = game.select_card_reward(3).unwrap_err();
        assert_eq!(
            err,
            CommandError::NoSuchReward {
                index: 3,
                offered: 1
            }
        );
        assert_eq!(game.card_rewards.len(), 1);
        assert_eq!(game.state, GameState::Reward);
    }

    #[test]
    fn test_skip_card_reward() {
        let mut game = Game::new(11);
        game.state = GameState::Reward;
        game.card_rewards = vec![Card::strike(), Card::defend(), Card::bash()];

        game.skip_card_reward();
        assert!(game.card_rewards.is_empty());
        assert_eq!(game.player.deck.len(), 12);
        assert_eq!(game.state, GameState::Map);
    }

    #[test]
    fn test_rest_heal_is_clamped() {
        let mut game = Game::new(12);
        game.state = GameState::Rest;
        game.player.health = 70;

        game.rest_heal();
        assert_eq!(game.player.health, 80, "80/3 = 26 heals past max, clamped");
        assert_eq!(game.state, GameState::Map);
    }

    #[test]
    fn test_rest_heal_partial() {
        let mut game = Game::new(13);
        game.state = GameState::Rest;
        game.player.health = 10;

        game.rest_heal();
        assert_eq!(game.player.health, 36);
    }

    #[test]
    fn test_rest_upgrade_returns_to_map() {
        let mut game = Game::new(14);
        game.state = GameState::Rest;
        let deck_before = game.player.deck.clone();

        game.rest_upgrade();
        assert_eq!(game.state, GameState::Map);
        assert_eq!(game.player.deck, deck_before);
    }

    #[test]
    fn test_end_turn_discards_hand_and_redraws() {
        let mut game = Game::new(15);
        game.start_new_combat();
        game.enemy = Some(Enemy::slime());

        game.end_turn().unwrap();
        assert_eq!(game.state, GameState::Combat);
        assert_eq!(game.player.hand.len(), 5, "fresh hand for the new turn");
        assert_eq!(game.player.energy, game.player.max_energy);
    }

    #[test]
    fn test_end_turn_decays_statuses() {
        let mut game = Game::new(16);
        game.start_new_combat();

        let mut slime = Enemy::slime();
        slime.apply_vulnerable(2);
        slime.apply_weak(1);
        game.enemy = Some(slime);
        game.player.apply_vulnerable(3);

        game.end_turn().unwrap();
        assert_eq!(game.player.vulnerable, 2);
        assert_eq!(game.player.weak, 0, "already zero, stays zero");
        let enemy = game.enemy.as_ref().expect("combat continues");
        assert_eq!(enemy.vulnerable, 1);
        assert_eq!(enemy.weak, 0);
    }

    #[test]
    fn test_player_defeat_ends_run() {
        let mut game = Game::new(17);
        game.start_new_combat();

        // Slime's first move deals 5; 3 health will not survive it
        game.enemy = Some(Enemy::slime());
        game.player.health = 3;
        game.player.block = 0;

        game.end_turn().unwrap();
        assert_eq!(game.state, GameState::GameOver);
        assert!(game.enemy.is_none());
        assert!(game.player.is_defeated());
    }

    #[test]
    fn test_done_flag_roundtrip() {
        let mut game = Game::new(18);
        assert!(!game.is_done());
        game.set_done(true);
        assert!(game.is_done());
        game.set_done(false);
        assert!(!game.is_done());
    }

    #[test]
    fn test_gold_reward_scaling() {
        assert_eq!(gold_reward(NodeKind::Enemy), 10);
        assert_eq!(gold_reward(NodeKind::Elite), 25);
        assert_eq!(gold_reward(NodeKind::Boss), 50);
        assert_eq!(gold_reward(NodeKind::Rest), 0);
    }
}
