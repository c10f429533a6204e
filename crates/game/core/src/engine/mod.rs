//! Battle state machine.
//!
//! [`Battle`] owns both combatants and alternates turns between them, player
//! first. Each call to [`Battle::act`] resolves exactly one turn; the caller
//! chooses the move and supplies the randomness. When a defender reaches 0 HP
//! the battle records the winner and refuses further actions.

mod encounter;
mod errors;

pub use encounter::{wild_level, wild_stats};
pub use errors::BattleError;

use crate::combat::{TurnOutcome, TurnRolls, resolve_turn_with_rolls, validate_turn};
use crate::config::CooldownPolicy;
use crate::env::{Env, RngOracle};
use crate::state::Combatant;

/// One side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

impl CooldownPolicy {
    /// Whether `side` must respect cooldowns under this policy.
    pub const fn gates(self, side: Side) -> bool {
        match self {
            Self::Uniform => true,
            Self::PlayerOnly => matches!(side, Side::Player),
        }
    }
}

/// What happened during one call to [`Battle::act`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    /// Round in which the turn was taken, starting at 1.
    pub round: u32,
    pub outcome: TurnOutcome,
    /// Both sides have acted and cooldowns were ticked.
    pub round_complete: bool,
    pub winner: Option<Side>,
}

/// Two combatants and the turn bookkeeping between them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    player: Combatant,
    enemy: Combatant,
    to_act: Side,
    round: u32,
    winner: Option<Side>,
    policy: CooldownPolicy,
}

impl Battle {
    pub fn new(player: Combatant, enemy: Combatant, policy: CooldownPolicy) -> Self {
        let winner = if enemy.is_defeated() {
            Some(Side::Player)
        } else if player.is_defeated() {
            Some(Side::Enemy)
        } else {
            None
        };
        Self {
            player,
            enemy,
            to_act: Side::Player,
            round: 1,
            winner,
            policy,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn to_act(&self) -> Side {
        self.to_act
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn policy(&self) -> CooldownPolicy {
        self.policy
    }

    pub fn is_gated(&self, side: Side) -> bool {
        self.policy.gates(side)
    }

    /// Slots `side` may pick right now.
    pub fn usable_slots(&self, side: Side) -> Vec<usize> {
        let combatant = self.combatant(side);
        if self.is_gated(side) {
            combatant.ready_slots().collect()
        } else {
            (0..combatant.moves().len()).collect()
        }
    }

    /// Resolves the acting side's turn with rolls drawn from `rng`.
    ///
    /// # Errors
    ///
    /// `Finished` once a winner exists; `Turn` for an invalid slot or a move
    /// on cooldown. Errors leave the battle and `rng` untouched.
    pub fn act(
        &mut self,
        slot: usize,
        rng: &mut (impl RngOracle + ?Sized),
        env: &Env<'_>,
    ) -> Result<TurnReport, BattleError> {
        self.check_turn(slot)?;
        let rolls = TurnRolls::draw(rng, &env.config().battle);
        self.act_with_rolls(slot, rolls, env)
    }

    /// Resolves the acting side's turn with explicit rolls.
    pub fn act_with_rolls(
        &mut self,
        slot: usize,
        rolls: TurnRolls,
        env: &Env<'_>,
    ) -> Result<TurnReport, BattleError> {
        self.check_turn(slot)?;
        let side = self.to_act;
        let gated = self.is_gated(side);
        let (attacker, defender) = match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        };

        let outcome = resolve_turn_with_rolls(attacker, defender, slot, gated, rolls, env)?;
        Ok(self.finish_turn(side, outcome))
    }

    fn check_turn(&self, slot: usize) -> Result<(), BattleError> {
        if self.is_over() {
            return Err(BattleError::Finished);
        }
        let side = self.to_act;
        validate_turn(
            self.combatant(side),
            self.combatant(side.opponent()),
            slot,
            self.is_gated(side),
        )?;
        Ok(())
    }

    fn finish_turn(&mut self, side: Side, outcome: TurnOutcome) -> TurnReport {
        let round = self.round;
        if outcome.defender_defeated {
            self.winner = Some(side);
            return TurnReport {
                side,
                round,
                outcome,
                round_complete: false,
                winner: self.winner,
            };
        }

        let round_complete = side == Side::Enemy;
        if round_complete {
            self.player.tick_cooldowns();
            if self.policy.gates(Side::Enemy) {
                self.enemy.tick_cooldowns();
            }
            self.round += 1;
        }
        self.to_act = side.opponent();

        TurnReport {
            side,
            round,
            outcome,
            round_complete,
            winner: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::PcgRng;
    use crate::state::{ElementType, MoveDef};
    use crate::stats::Stats;
    use proptest::prelude::*;

    fn kit() -> Vec<MoveDef> {
        vec![
            MoveDef::new("Ember", ElementType::Fire, 40, 100, 0),
            MoveDef::new("Flamethrower", ElementType::Fire, 90, 100, 2),
            MoveDef::new("Fire Blast", ElementType::Fire, 110, 85, 3),
            MoveDef::heal("Heal", 3),
        ]
    }

    fn battle(policy: CooldownPolicy) -> Battle {
        let player = Combatant::new("Charmander", 10, ElementType::Fire, Stats::new(60, 50, 30, 65), kit()).unwrap();
        let enemy = Combatant::new("Vulpix", 10, ElementType::Fire, Stats::new(60, 40, 30, 65), kit()).unwrap();
        Battle::new(player, enemy, policy)
    }

    #[test]
    fn player_acts_first_and_turns_alternate() {
        let config = GameConfig::default();
        let env = Env::new(&config);
        let mut battle = battle(CooldownPolicy::Uniform);

        let first = battle.act_with_rolls(0, TurnRolls::steady(), &env).unwrap();
        assert_eq!(first.side, Side::Player);
        assert!(!first.round_complete);
        assert_eq!(battle.to_act(), Side::Enemy);

        let second = battle.act_with_rolls(0, TurnRolls::steady(), &env).unwrap();
        assert_eq!(second.side, Side::Enemy);
        assert!(second.round_complete);
        assert_eq!(battle.round(), 2);
        assert_eq!(battle.to_act(), Side::Player);
    }

    #[test]
    fn cooldown_set_on_use_and_ticked_at_round_end() {
        let config = GameConfig::default();
        let env = Env::new(&config);
        let mut battle = battle(CooldownPolicy::Uniform);

        battle.act_with_rolls(1, TurnRolls::steady(), &env).unwrap();
        assert_eq!(battle.player().moves()[1].current_cooldown(), 2);

        battle.act_with_rolls(1, TurnRolls::steady(), &env).unwrap();
        assert_eq!(battle.player().moves()[1].current_cooldown(), 1);
        assert_eq!(battle.enemy().moves()[1].current_cooldown(), 1);
        assert_eq!(battle.usable_slots(Side::Player), vec![0, 2, 3]);

        let err = battle.act_with_rolls(1, TurnRolls::steady(), &env).unwrap_err();
        assert!(matches!(err, BattleError::Turn(_)));
        assert_eq!(battle.to_act(), Side::Player);
    }

    #[test]
    fn player_only_policy_lets_enemy_repeat() {
        let config = GameConfig::default();
        let env = Env::new(&config);
        let mut battle = battle(CooldownPolicy::PlayerOnly);

        battle.act_with_rolls(0, TurnRolls::steady(), &env).unwrap();
        battle.act_with_rolls(1, TurnRolls::steady(), &env).unwrap();
        assert_eq!(battle.enemy().moves()[1].current_cooldown(), 0);
        battle.act_with_rolls(0, TurnRolls::steady(), &env).unwrap();
        battle.act_with_rolls(1, TurnRolls::steady(), &env).unwrap();
        assert_eq!(battle.usable_slots(Side::Enemy), vec![0, 1, 2, 3]);
    }

    #[test]
    fn defeat_ends_the_battle() {
        let config = GameConfig::default();
        let env = Env::new(&config);
        let player = Combatant::new("Charmander", 10, ElementType::Fire, Stats::new(60, 50, 30, 65), kit()).unwrap();
        let enemy = Combatant::new("Caterpie", 2, ElementType::Bug, Stats::new(5, 10, 30, 10), kit()).unwrap();
        let mut battle = Battle::new(player, enemy, CooldownPolicy::Uniform);

        let report = battle.act_with_rolls(0, TurnRolls::steady(), &env).unwrap();
        assert_eq!(report.winner, Some(Side::Player));
        assert!(battle.is_over());
        assert!(matches!(
            battle.act_with_rolls(0, TurnRolls::steady(), &env),
            Err(BattleError::Finished)
        ));
    }

    #[test]
    fn seeded_battles_replay_identically() {
        let config = GameConfig::default();
        let env = Env::new(&config);
        let play = |seed: u64| {
            let mut battle = battle(CooldownPolicy::Uniform);
            let mut rng = PcgRng::from_seed(seed);
            let mut log = Vec::new();
            while !battle.is_over() && battle.round() < 200 {
                let slot = battle.usable_slots(battle.to_act())[0];
                log.push(battle.act(slot, &mut rng, &env).unwrap().outcome.describe());
            }
            (log, battle.winner())
        };
        assert_eq!(play(77), play(77));
    }

    proptest! {
        #[test]
        fn cooldowns_drop_by_at_most_one_per_round(seed in any::<u64>(), rounds in 1usize..30) {
            let config = GameConfig::default();
            let env = Env::new(&config);
            let mut battle = battle(CooldownPolicy::Uniform);
            let mut rng = PcgRng::from_seed(seed);

            for _ in 0..rounds {
                if battle.is_over() {
                    break;
                }
                let before: Vec<u32> = battle.player().moves().iter().map(|m| m.current_cooldown()).collect();
                let used = *battle.usable_slots(Side::Player).last().unwrap();
                let report = battle.act(used, &mut rng, &env).unwrap();
                if report.winner.is_some() {
                    break;
                }
                let enemy_slot = battle.usable_slots(Side::Enemy)[0];
                let report = battle.act(enemy_slot, &mut rng, &env).unwrap();
                if report.winner.is_some() {
                    break;
                }

                for (index, slot) in battle.player().moves().iter().enumerate() {
                    if index == used {
                        continue;
                    }
                    prop_assert_eq!(slot.current_cooldown(), before[index].saturating_sub(1));
                }
            }
        }
    }
}
