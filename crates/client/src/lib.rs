//! Headless command-line client for the creature gacha game.
//!
//! The binary is the composition root: it reads [`ClientConfig`] from the
//! environment, sets up logging, loads content, builds a
//! [`gacha_runtime::Runtime`] and runs one [`Command`] against it.
pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, USAGE};
pub use config::ClientConfig;

use anyhow::{Context, Result};
use gacha_content::ContentBundle;
use gacha_runtime::{OracleManager, PlayerId, Runtime};

/// Embedded content, or the directory in `GACHA_CONTENT_DIR` when set.
pub fn load_content(config: &ClientConfig) -> Result<ContentBundle> {
    match &config.content_dir {
        Some(dir) => ContentBundle::load_dir(dir)
            .with_context(|| format!("loading content from {}", dir.display())),
        None => ContentBundle::embedded(),
    }
}

pub fn build_runtime(config: &ClientConfig) -> Result<Runtime> {
    let content = load_content(config)?;
    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .oracles(OracleManager::new(content))
        .build()?;
    Ok(runtime)
}

/// Parses `args`, runs the command and returns its output.
pub async fn run<S: AsRef<str>>(config: &ClientConfig, args: &[S]) -> Result<String> {
    let command = Command::parse(args)?;
    let player = PlayerId::new(config.player.as_str())
        .with_context(|| format!("invalid GACHA_PLAYER '{}'", config.player))?;
    let runtime = build_runtime(config)?;
    command.execute(&runtime, &player).await
}
