//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::api::{Result, RuntimeError};
use crate::repository::{PlayerId, PlayerRecord, PlayerRepository, RepositoryError};

/// File-based implementation of PlayerRepository.
///
/// # File Format
///
/// Each player is stored as `player_{id}.bin` in bincode format. Writes go
/// to a temp file first and are renamed into place, so a crash never leaves
/// a half-written record behind.
pub struct FilePlayerRepository {
    base_dir: PathBuf,
    /// Serialises read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FilePlayerRepository {
    /// Create a new file-based player repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            base_dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, id: &PlayerId) -> PathBuf {
        self.base_dir.join(format!("player_{}.bin", id))
    }

    fn read(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        let path = self.record_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let record: PlayerRecord = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        if record.id() != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds player '{}'",
                path.display(),
                record.id()
            ))
            .into());
        }

        tracing::debug!("Loaded player[{}] from {}", id, path.display());
        Ok(Some(record))
    }

    fn write(&self, record: &PlayerRecord) -> Result<()> {
        let path = self.record_path(record.id());
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(record)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved player[{}] to {}", record.id(), path.display());
        Ok(())
    }
}

impl PlayerRepository for FilePlayerRepository {
    fn create(&self, record: PlayerRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if self.record_path(record.id()).exists() {
            return Err(RepositoryError::AlreadyExists(record.id().to_string()).into());
        }
        self.write(&record)
    }

    fn load(&self, id: &PlayerId) -> Result<Option<PlayerRecord>> {
        self.read(id)
    }

    fn update(
        &self,
        id: &PlayerId,
        apply: &mut dyn FnMut(&mut PlayerRecord) -> Result<()>,
    ) -> Result<PlayerRecord> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut record = self
            .read(id)?
            .ok_or_else(|| RuntimeError::PlayerNotFound(id.clone()))?;
        apply(&mut record)?;
        self.write(&record)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<PlayerId>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;
        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("player_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = PlayerId::new(id)
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
