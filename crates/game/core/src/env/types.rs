//! Type effectiveness oracle.

use crate::state::ElementType;

/// Lookup from `(attack, defense)` to a damage multiplier.
///
/// Implementations must return `1.0` for any pair they do not map.
pub trait TypeChartOracle: Send + Sync {
    fn multiplier(&self, attack: ElementType, defense: ElementType) -> f64;

    fn effectiveness(&self, attack: ElementType, defense: ElementType) -> Effectiveness {
        Effectiveness::classify(self.multiplier(attack, defense))
    }
}

/// Chart that treats every matchup as neutral.
///
/// Used when no chart is wired into the environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralTypeChart;

impl TypeChartOracle for NeutralTypeChart {
    fn multiplier(&self, _attack: ElementType, _defense: ElementType) -> f64 {
        1.0
    }
}

/// Coarse classification of a multiplier, used for battle messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effectiveness {
    Immune,
    NotVery,
    Neutral,
    Super,
}

impl Effectiveness {
    pub fn classify(multiplier: f64) -> Self {
        if multiplier <= 0.0 {
            Self::Immune
        } else if multiplier < 1.0 {
            Self::NotVery
        } else if multiplier > 1.0 {
            Self::Super
        } else {
            Self::Neutral
        }
    }

    /// Suffix appended to a damage log line, empty for neutral hits.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Immune => "It had no effect...",
            Self::NotVery => "It's not very effective...",
            Self::Neutral => "",
            Self::Super => "It's super effective!",
        }
    }
}
