//! In-memory PlayerRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::api::{Result, RuntimeError};
use crate::repository::{PlayerId, PlayerRecord, PlayerRepository, RepositoryError};

/// In-memory implementation of PlayerRepository.
///
/// The write lock is held for the whole of an update, which makes every
/// transaction atomic with respect to all others.
#[derive(Debug, Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<HashMap<PlayerId, PlayerRecord>>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn create(&self, record: PlayerRecord) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if players.contains_key(record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id().to_string()).into());
        }
        players.insert(record.id().clone(), record);
        Ok(())
    }

    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(id).cloned())
    }

    fn update(
        &self,
        id: &PlayerId,
        apply: &mut dyn FnMut(&mut PlayerRecord) -> Result<()>,
    ) -> Result<PlayerRecord> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = players
            .get_mut(id)
            .ok_or_else(|| RuntimeError::PlayerNotFound(id.clone()))?;

        let mut draft = stored.clone();
        apply(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }

    fn list(&self) -> Result<Vec<PlayerId>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<PlayerId> = players.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Profile;
    use gacha_core::EconomyRules;

    fn record(id: &str) -> PlayerRecord {
        let id = PlayerId::new(id).unwrap();
        PlayerRecord::new(Profile::new(id, "Tester", &EconomyRules::default()))
    }

    #[test]
    fn create_rejects_duplicates() {
        let repo = InMemoryPlayerRepository::new();
        repo.create(record("misty")).unwrap();
        assert!(matches!(
            repo.create(record("misty")),
            Err(RuntimeError::Repository(RepositoryError::AlreadyExists(_)))
        ));
    }

    #[test]
    fn failed_update_leaves_record_untouched() {
        let repo = InMemoryPlayerRepository::new();
        repo.create(record("brock")).unwrap();
        let id = PlayerId::new("brock").unwrap();

        let result = repo.update(&id, &mut |record| {
            record.profile.coins = 0;
            Err(RuntimeError::NoCreatures)
        });
        assert!(matches!(result, Err(RuntimeError::NoCreatures)));
        assert_eq!(repo.load(&id).unwrap().unwrap().profile.coins, 1000);
    }

    #[test]
    fn transact_returns_value_and_persists() {
        let repo: &dyn PlayerRepository = &InMemoryPlayerRepository::new();
        repo.create(record("gary")).unwrap();
        let id = PlayerId::new("gary").unwrap();

        let (spent, stored) = repo
            .transact(&id, |record| {
                record.profile.coins -= 300;
                Ok(300)
            })
            .unwrap();
        assert_eq!(spent, 300);
        assert_eq!(stored.profile.coins, 700);
        assert_eq!(repo.require(&id).unwrap().profile.coins, 700);
    }

    #[test]
    fn update_unknown_player_is_not_found() {
        let repo = InMemoryPlayerRepository::new();
        let id = PlayerId::new("nobody").unwrap();
        assert!(matches!(
            repo.update(&id, &mut |_| Ok(())),
            Err(RuntimeError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn list_is_sorted() {
        let repo = InMemoryPlayerRepository::new();
        repo.create(record("zed")).unwrap();
        repo.create(record("amy")).unwrap();
        let ids: Vec<_> = repo.list().unwrap().into_iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, ["amy", "zed"]);
    }
}
