//! Repository contract for saving and loading player state.

use crate::api::{Result, RuntimeError};

use super::types::{PlayerId, PlayerRecord};

/// Persistence for player records.
///
/// Every mutation goes through [`update`](Self::update), which runs the
/// closure against a copy of the record and stores the copy only when the
/// closure succeeds. Implementations serialise updates per player, so a
/// check-then-spend inside one closure cannot race with another update.
pub trait PlayerRepository: Send + Sync {
    /// Store a new record. Fails if the id is taken.
    fn create(&self, record: PlayerRecord) -> Result<()>;

    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>>;

    /// Apply `apply` atomically and return the stored record.
    ///
    /// Returns `PlayerNotFound` for an unknown id. When `apply` fails the
    /// stored record is left untouched and its error is returned.
    fn update(
        &self,
        id: &PlayerId,
        apply: &mut dyn FnMut(&mut PlayerRecord) -> Result<()>,
    ) -> Result<PlayerRecord>;

    /// All player ids, sorted.
    fn list(&self) -> Result<Vec<PlayerId>>;
}

impl<'a> dyn PlayerRepository + 'a {
    /// Loads a record that must exist.
    pub fn require(&self, id: &PlayerId) -> Result<PlayerRecord> {
        self.load(id)?
            .ok_or_else(|| RuntimeError::PlayerNotFound(id.clone()))
    }

    /// Runs `apply` as one transaction and returns its value alongside the
    /// stored record.
    pub fn transact<T>(
        &self,
        id: &PlayerId,
        apply: impl FnOnce(&mut PlayerRecord) -> Result<T>,
    ) -> Result<(T, PlayerRecord)> {
        let mut apply = Some(apply);
        let mut output = None;
        let record = self.update(id, &mut |record| {
            let apply = apply
                .take()
                .ok_or(RuntimeError::Internal("transaction closure invoked twice"))?;
            output = Some(apply(record)?);
            Ok(())
        })?;
        let output = output.ok_or(RuntimeError::Internal("transaction closure not invoked"))?;
        Ok((output, record))
    }
}
