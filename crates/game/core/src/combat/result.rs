//! Turn outcome and single-turn resolution.

use crate::env::{Effectiveness, Env, RngOracle};
use crate::state::Combatant;

use super::damage::{DamageModifiers, calculate_damage};
use super::error::TurnError;
use super::hit::{TurnRolls, check_critical, check_hit};

/// Who a resolved move affected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnTarget {
    Attacker,
    Defender,
}

/// Result of one resolved turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub attacker: String,
    pub move_name: String,
    pub hit: bool,
    /// Damage dealt or HP healed as computed, before clamping to the meter.
    pub amount: u32,
    pub target: TurnTarget,
    pub attacker_hp_after: u32,
    pub defender_hp_after: u32,
    pub critical: bool,
    /// Set for damaging hits only.
    pub effectiveness: Option<Effectiveness>,
    pub defender_defeated: bool,
}

impl TurnOutcome {
    pub fn target_is_attacker(&self) -> bool {
        self.target == TurnTarget::Attacker
    }

    /// One battle log line.
    pub fn describe(&self) -> String {
        if !self.hit {
            return format!("{} used {}... but missed!", self.attacker, self.move_name);
        }
        if self.target_is_attacker() {
            return format!(
                "{} used {}! (+{} HP)",
                self.attacker, self.move_name, self.amount
            );
        }

        let mut line = format!("{} used {}!", self.attacker, self.move_name);
        if self.critical {
            line.push_str(" (Crit!)");
        }
        line.push_str(&format!(" -{}", self.amount));
        if let Some(message) = self.effectiveness.map(|e| e.message()).filter(|m| !m.is_empty()) {
            line.push_str(&format!(" ({message})"));
        }
        line
    }
}

/// Checks a turn without touching either side.
///
/// `gated` states whether the attacker's side must respect cooldowns.
pub fn validate_turn(
    attacker: &Combatant,
    defender: &Combatant,
    slot: usize,
    gated: bool,
) -> Result<(), TurnError> {
    if attacker.is_defeated() {
        return Err(TurnError::AttackerDefeated {
            name: attacker.name().to_string(),
        });
    }
    if defender.is_defeated() {
        return Err(TurnError::DefenderDefeated {
            name: defender.name().to_string(),
        });
    }
    let Some(chosen) = attacker.move_slot(slot) else {
        return Err(TurnError::InvalidSlot {
            slot,
            available: attacker.moves().len(),
        });
    };
    if gated && !chosen.is_ready() {
        return Err(TurnError::OnCooldown {
            name: chosen.def().name.clone(),
            remaining: chosen.current_cooldown(),
        });
    }
    Ok(())
}

/// Resolves one turn, drawing its rolls from `rng`.
///
/// Nothing is drawn when validation fails.
pub fn resolve_turn(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    slot: usize,
    gated: bool,
    rng: &mut (impl RngOracle + ?Sized),
    env: &Env<'_>,
) -> Result<TurnOutcome, TurnError> {
    validate_turn(attacker, defender, slot, gated)?;
    let rolls = TurnRolls::draw(rng, &env.config().battle);
    resolve_turn_with_rolls(attacker, defender, slot, gated, rolls, env)
}

/// Resolves one turn with explicit rolls.
///
/// 1. A roll above the move's accuracy misses: nothing changes.
/// 2. A heal restores `floor(max_hp * heal_fraction)` to the attacker.
/// 3. Anything else deals [`calculate_damage`] to the defender.
/// 4. On a hit, a gated attacker's move goes on cooldown.
pub fn resolve_turn_with_rolls(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    slot: usize,
    gated: bool,
    rolls: TurnRolls,
    env: &Env<'_>,
) -> Result<TurnOutcome, TurnError> {
    validate_turn(attacker, defender, slot, gated)?;
    let rules = &env.config().battle;
    let chosen = attacker.moves()[slot].def().clone();

    let mut outcome = TurnOutcome {
        attacker: attacker.name().to_string(),
        move_name: chosen.name.clone(),
        hit: false,
        amount: 0,
        target: if chosen.is_heal() {
            TurnTarget::Attacker
        } else {
            TurnTarget::Defender
        },
        attacker_hp_after: attacker.current_hp(),
        defender_hp_after: defender.current_hp(),
        critical: false,
        effectiveness: None,
        defender_defeated: false,
    };

    if !check_hit(rolls.accuracy, chosen.accuracy) {
        return Ok(outcome);
    }
    outcome.hit = true;

    if chosen.is_heal() {
        let amount = heal_amount(attacker.max_hp(), rules.heal_fraction);
        attacker.hp_mut().restore(amount);
        outcome.amount = amount;
    } else {
        let type_multiplier = env.types().multiplier(chosen.element, defender.element());
        let critical = check_critical(rolls.crit, rules.crit_chance);
        let modifiers = DamageModifiers {
            variance: rolls.variance,
            critical,
            type_multiplier,
        };
        let damage = calculate_damage(attacker, defender, chosen.power, modifiers, rules);
        defender.hp_mut().drain(damage);

        outcome.amount = damage;
        outcome.critical = critical;
        outcome.effectiveness = Some(Effectiveness::classify(type_multiplier));
    }

    if gated {
        attacker.start_cooldown(slot);
    }

    outcome.attacker_hp_after = attacker.current_hp();
    outcome.defender_hp_after = defender.current_hp();
    outcome.defender_defeated = defender.is_defeated();
    Ok(outcome)
}

/// `floor(max_hp * fraction)`.
pub fn heal_amount(max_hp: u32, fraction: f64) -> u32 {
    (f64::from(max_hp) * fraction).floor() as u32
}
