//! `gacha` binary entry point.
//!
//! ```bash
//! gacha register Ash
//! gacha starter choose 4
//! GACHA_AI_DELAY_MS=0 gacha battle
//! ```

use anyhow::Result;
use gacha_client::{ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::debug!(player = %config.player, seed = ?config.runtime.seed, "starting client");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = gacha_client::run(&config, &args).await?;
    print!("{output}");
    Ok(())
}
