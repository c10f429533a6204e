//! Flat creature stats.

/// Identifies one of the four stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Hp,
    Atk,
    Def,
    Spd,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [StatKind::Hp, StatKind::Atk, StatKind::Def, StatKind::Spd];

    pub(crate) const fn growth_field(&self) -> &'static str {
        match self {
            Self::Hp => "progression.growth.hp",
            Self::Atk => "progression.growth.atk",
            Self::Def => "progression.growth.def",
            Self::Spd => "progression.growth.spd",
        }
    }
}

/// Hit points, attack, defense and speed.
///
/// `spd` is carried for display and persistence; turn order does not read it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl Stats {
    pub const fn new(hp: u32, atk: u32, def: u32, spd: u32) -> Self {
        Self { hp, atk, def, spd }
    }

    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Hp => self.hp,
            StatKind::Atk => self.atk,
            StatKind::Def => self.def,
            StatKind::Spd => self.spd,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Hp => &mut self.hp,
            StatKind::Atk => &mut self.atk,
            StatKind::Def => &mut self.def,
            StatKind::Spd => &mut self.spd,
        }
    }

    /// First stat that is zero, in `hp, atk, def, spd` order.
    pub fn first_zero(&self) -> Option<StatKind> {
        StatKind::ALL.into_iter().find(|kind| self.get(*kind) == 0)
    }

    pub fn total(&self) -> u64 {
        StatKind::ALL
            .into_iter()
            .map(|kind| u64::from(self.get(kind)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_get_mut_agree() {
        let mut stats = Stats::new(40, 12, 9, 15);
        *stats.get_mut(StatKind::Def) += 3;
        assert_eq!(stats.get(StatKind::Def), 12);
        assert_eq!(stats.total(), 40 + 12 + 12 + 15);
    }

    #[test]
    fn first_zero_reports_in_order() {
        assert_eq!(Stats::new(1, 0, 0, 1).first_zero(), Some(StatKind::Atk));
        assert_eq!(Stats::new(1, 1, 1, 1).first_zero(), None);
    }
}
