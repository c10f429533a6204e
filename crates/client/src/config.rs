//! Client configuration read from `GACHA_*` environment variables.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use gacha_runtime::RuntimeConfig;

/// Everything the binary needs before it can build a runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Player the commands act on.
    pub player: String,
    pub runtime: RuntimeConfig,
    /// Directory with content overrides; embedded data when unset.
    pub content_dir: Option<PathBuf>,
    /// Enables the file log layer when set.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            player: Self::DEFAULT_PLAYER.to_owned(),
            runtime: RuntimeConfig::default(),
            content_dir: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_PLAYER: &'static str = "local";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GACHA_PLAYER` - Player id (default: `local`)
    /// - `GACHA_SEED` - Seed for every random draw (default: entropy)
    /// - `GACHA_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `GACHA_IN_MEMORY` - Keep players in memory only (default: false)
    /// - `GACHA_CONTENT_DIR` - Content override directory (default: embedded)
    /// - `GACHA_AI_DELAY_MS` - Enemy think time (default: 1500)
    /// - `GACHA_ROUND_LIMIT` - Rounds before a stalemate (default: 100)
    /// - `GACHA_LOG_DIR` - Directory for the log file (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(player) = env::var("GACHA_PLAYER") {
            config.player = player;
        }

        config.runtime.seed = read_env::<u64>("GACHA_SEED");

        if let Some(ms) = read_env::<u64>("GACHA_AI_DELAY_MS") {
            config.runtime.ai_delay = Duration::from_millis(ms);
        }

        if let Some(limit) = read_env::<u32>("GACHA_ROUND_LIMIT") {
            config.runtime.round_limit = limit.max(1);
        }

        let in_memory = read_env::<bool>("GACHA_IN_MEMORY").unwrap_or(false);
        config.runtime.save_dir = if in_memory {
            None
        } else {
            env::var("GACHA_SAVE_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(RuntimeConfig::default_save_dir)
        };

        config.content_dir = env::var("GACHA_CONTENT_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("GACHA_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
