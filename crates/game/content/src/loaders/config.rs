//! Game configuration loader.

use std::path::Path;

use gacha_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/config.toml");

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. The result is validated, so a
    /// config that would stall a rule (a zero level threshold, an inverted
    /// roll range) is rejected here rather than at battle time.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The balance shipped with the crate.
    pub fn embedded() -> LoadResult<GameConfig> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid config: {}", e))?;
        Ok(config)
    }
}
