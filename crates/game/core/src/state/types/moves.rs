use arrayvec::ArrayVec;

use super::ElementType;
use crate::config::GameConfig;
use crate::state::MoveError;

/// Non-damaging effect carried by a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveEffect {
    /// Restores a fraction of the user's max HP.
    Heal,
}

/// Static move definition from the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveDef {
    pub name: String,
    pub element: ElementType,
    /// `0` means the move deals no damage.
    pub power: u32,
    /// Percent chance to hit, `0..=100`.
    pub accuracy: u8,
    /// Turns before the move can be used again.
    pub cooldown: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<MoveEffect>,
}

impl MoveDef {
    pub fn new(
        name: impl Into<String>,
        element: ElementType,
        power: u32,
        accuracy: u8,
        cooldown: u32,
    ) -> Self {
        Self {
            name: name.into(),
            element,
            power,
            accuracy,
            cooldown,
            effect: None,
        }
    }

    /// A `Support` heal with full accuracy.
    pub fn heal(name: impl Into<String>, cooldown: u32) -> Self {
        Self {
            name: name.into(),
            element: ElementType::Support,
            power: 0,
            accuracy: 100,
            cooldown,
            effect: Some(MoveEffect::Heal),
        }
    }

    pub fn is_heal(&self) -> bool {
        self.effect == Some(MoveEffect::Heal)
    }

    pub fn is_damaging(&self) -> bool {
        self.effect.is_none() && self.power > 0
    }

    /// Data-integrity checks for catalog entries.
    pub fn validate(&self) -> Result<(), MoveError> {
        if self.name.trim().is_empty() {
            return Err(MoveError::EmptyName);
        }
        if self.accuracy > 100 {
            return Err(MoveError::AccuracyOutOfRange {
                name: self.name.clone(),
                accuracy: self.accuracy,
            });
        }
        match self.effect {
            Some(MoveEffect::Heal) if self.power != 0 => Err(MoveError::HealWithPower {
                name: self.name.clone(),
                power: self.power,
            }),
            None if self.power == 0 => Err(MoveError::NoEffect {
                name: self.name.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// A move as equipped by a combatant, with its own cooldown counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    def: MoveDef,
    current_cooldown: u32,
}

impl MoveSlot {
    pub fn new(def: MoveDef) -> Self {
        Self {
            def,
            current_cooldown: 0,
        }
    }

    pub fn def(&self) -> &MoveDef {
        &self.def
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    pub(crate) fn start_cooldown(&mut self) {
        self.current_cooldown = self.def.cooldown;
    }

    pub(crate) fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn set_cooldown(&mut self, turns: u32) {
        self.current_cooldown = turns;
    }
}

/// Up to [`GameConfig::MAX_MOVES`] equipped moves, in menu order.
pub type MoveSet = ArrayVec<MoveSlot, { GameConfig::MAX_MOVES }>;
