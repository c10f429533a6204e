//! A creature taking part in a battle.

use crate::config::GameConfig;
use crate::state::{CombatantError, ElementType, InventoryEntry, MoveDef, MoveSet, MoveSlot};
use crate::stats::{HpMeter, Stats};

/// Battle-time view of a creature.
///
/// Built fresh at battle start and discarded at the end. Only the battle
/// engine mutates HP and cooldowns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    name: String,
    level: u32,
    element: ElementType,
    stats: Stats,
    hp: HpMeter,
    moves: MoveSet,
}

impl Combatant {
    /// Validates input and builds a combatant at full HP (`max_hp = stats.hp`).
    ///
    /// # Errors
    ///
    /// Rejects level 0, any zero stat, an empty or oversized move list, and
    /// moves that fail [`MoveDef::validate`].
    pub fn new(
        name: impl Into<String>,
        level: u32,
        element: ElementType,
        stats: Stats,
        moves: impl IntoIterator<Item = MoveDef>,
    ) -> Result<Self, CombatantError> {
        let name = name.into();
        if level == 0 {
            return Err(CombatantError::ZeroLevel { name });
        }
        if let Some(stat) = stats.first_zero() {
            return Err(CombatantError::ZeroStat { name, stat });
        }

        let moves: Vec<MoveDef> = moves.into_iter().collect();
        if moves.is_empty() {
            return Err(CombatantError::NoMoves { name });
        }
        if moves.len() > GameConfig::MAX_MOVES {
            return Err(CombatantError::TooManyMoves {
                name,
                count: moves.len(),
                max: GameConfig::MAX_MOVES,
            });
        }

        let mut set = MoveSet::new();
        for def in moves {
            def.validate()?;
            set.push(MoveSlot::new(def));
        }

        Ok(Self {
            name,
            level,
            element,
            stats,
            hp: HpMeter::full(stats.hp),
            moves: set,
        })
    }

    /// Builds the player's side from a persisted inventory entry.
    pub fn from_entry(
        entry: &InventoryEntry,
        element: ElementType,
        moves: impl IntoIterator<Item = MoveDef>,
    ) -> Result<Self, CombatantError> {
        Self::new(entry.name.clone(), entry.level, element, entry.stats, moves)
    }

    /// Starts the combatant at `hp` instead of full, clamped to max.
    #[must_use]
    pub fn with_current_hp(mut self, hp: u32) -> Self {
        self.hp = HpMeter::new(hp, self.hp.maximum());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn hp(&self) -> &HpMeter {
        &self.hp
    }

    pub fn current_hp(&self) -> u32 {
        self.hp.current()
    }

    pub fn max_hp(&self) -> u32 {
        self.hp.maximum()
    }

    pub fn is_defeated(&self) -> bool {
        self.hp.is_empty()
    }

    pub fn moves(&self) -> &[MoveSlot] {
        &self.moves
    }

    pub fn move_slot(&self, slot: usize) -> Option<&MoveSlot> {
        self.moves.get(slot)
    }

    /// Indices of moves whose cooldown is zero.
    pub fn ready_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_ready())
            .map(|(index, _)| index)
    }

    pub(crate) fn hp_mut(&mut self) -> &mut HpMeter {
        &mut self.hp
    }

    pub(crate) fn start_cooldown(&mut self, slot: usize) {
        if let Some(slot) = self.moves.get_mut(slot) {
            slot.start_cooldown();
        }
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        for slot in self.moves.iter_mut() {
            slot.tick();
        }
    }

    #[cfg(test)]
    pub(crate) fn moves_mut(&mut self) -> &mut [MoveSlot] {
        &mut self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntryId, Rarity, SpeciesId};
    use crate::stats::StatKind;

    fn tackle() -> MoveDef {
        MoveDef::new("Tackle", ElementType::Normal, 40, 100, 0)
    }

    #[test]
    fn new_starts_at_full_hp() {
        let combatant = Combatant::new(
            "Rattata",
            4,
            ElementType::Normal,
            Stats::new(30, 56, 35, 72),
            [tackle()],
        )
        .unwrap();
        assert_eq!(combatant.current_hp(), 30);
        assert_eq!(combatant.max_hp(), 30);
        assert!(!combatant.is_defeated());
    }

    #[test]
    fn zero_level_is_rejected() {
        let err = Combatant::new("Nobody", 0, ElementType::Normal, Stats::new(1, 1, 1, 1), [tackle()])
            .unwrap_err();
        assert!(matches!(err, CombatantError::ZeroLevel { .. }));
    }

    #[test]
    fn zero_defense_is_rejected() {
        let err = Combatant::new(
            "Paper",
            3,
            ElementType::Normal,
            Stats::new(10, 10, 0, 10),
            [tackle()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CombatantError::ZeroStat {
                stat: StatKind::Def,
                ..
            }
        ));
    }

    #[test]
    fn move_list_bounds_are_enforced() {
        let stats = Stats::new(10, 10, 10, 10);
        let none: [MoveDef; 0] = [];
        assert!(matches!(
            Combatant::new("Empty", 1, ElementType::Normal, stats, none),
            Err(CombatantError::NoMoves { .. })
        ));
        assert!(matches!(
            Combatant::new("Crowded", 1, ElementType::Normal, stats, vec![tackle(); 5]),
            Err(CombatantError::TooManyMoves { count: 5, .. })
        ));
    }

    #[test]
    fn malformed_move_is_rejected() {
        let mut heal = MoveDef::heal("Heal", 3);
        heal.power = 5;
        let err = Combatant::new("Chansey", 10, ElementType::Normal, Stats::new(50, 5, 5, 50), [heal])
            .unwrap_err();
        assert!(matches!(err, CombatantError::InvalidMove(_)));
    }

    #[test]
    fn from_entry_uses_entry_stats_and_level() {
        let entry = InventoryEntry {
            id: EntryId(1),
            species: SpeciesId(25),
            name: "Pikachu".into(),
            rarity: Rarity::SR,
            level: 12,
            exp: 40,
            stats: Stats::new(48, 60, 38, 95),
            sprite_url: String::new(),
            is_active: true,
        };
        let combatant = Combatant::from_entry(&entry, ElementType::Electric, [tackle()]).unwrap();
        assert_eq!(combatant.level(), 12);
        assert_eq!(combatant.max_hp(), 48);
        assert_eq!(combatant.element(), ElementType::Electric);
    }

    #[test]
    fn with_current_hp_clamps() {
        let combatant = Combatant::new("Onix", 9, ElementType::Rock, Stats::new(35, 45, 160, 70), [tackle()])
            .unwrap()
            .with_current_hp(500);
        assert_eq!(combatant.current_hp(), 35);
    }
}
