//! Event types for each topic.

use serde::{Deserialize, Serialize};

use gacha_core::{BattleResult, EntryId, Rarity, SpeciesId, TurnReport};

use crate::repository::PlayerId;

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory(BattleResult),
    Defeat,
    /// The round limit was reached with both sides standing.
    Stalemate,
}

/// Events emitted while a battle runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        player: PlayerId,
        entry: EntryId,
        enemy: SpeciesId,
        enemy_level: u32,
    },

    /// One side acted. `message` is the rendered log line.
    Turn {
        player: PlayerId,
        report: TurnReport,
        message: String,
    },

    Finished {
        player: PlayerId,
        outcome: BattleOutcome,
        rounds: u32,
    },
}

/// Where a creature came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Acquisition {
    Pack(String),
    Starter,
}

/// Events for currency and inventory changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EconomyEvent {
    EnergySpent {
        player: PlayerId,
        amount: u32,
        remaining: u32,
    },

    CoinsSpent {
        player: PlayerId,
        amount: u64,
        remaining: u64,
    },

    CreatureObtained {
        player: PlayerId,
        entry: EntryId,
        species: SpeciesId,
        rarity: Rarity,
        source: Acquisition,
    },

    RewardsGranted {
        player: PlayerId,
        entry: EntryId,
        result: BattleResult,
    },

    Evolved {
        player: PlayerId,
        entry: EntryId,
        from: SpeciesId,
        to: SpeciesId,
    },
}
