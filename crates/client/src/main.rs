//! Shogun Showdown run follower.
//!
//! Main entry point of the `showdown` binary.
//!
//! # Architecture
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (and an optional `.env` file)
//! 2. Logging to stderr and to a per-session file
//! 3. The runtime following the save file
//! 4. The renderer printing the narrative to stdout
//!
//! # Examples
//!
//! ```bash
//! # Follow the game's own save file
//! cargo run -p showdown-client
//!
//! # Splits only, branching over every enemy attack order
//! SHOWDOWN_SPLITS=1 SHOWDOWN_ENEMY_ORDER=exhaustive cargo run -p showdown-client
//! ```

mod config;
mod logging;
mod render;

use anyhow::{Context, Result};
use showdown_runtime::Runtime;

use config::AppConfig;
use render::Renderer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    let _guard = logging::setup_logging(&config.data_dir().join("logs"), config.session_id.as_deref())?;

    let runtime_config = config.runtime_config();
    tracing::info!("Starting Shogun Showdown follower");
    tracing::info!("Save file: {}", runtime_config.save_path.display());
    tracing::info!("Enemy order: {}", runtime_config.engine.enemy_order);

    let mut runtime = Runtime::builder()
        .config(runtime_config)
        .build()
        .await
        .context("failed to start the runtime")?;

    let renderer = Renderer::new(config.verbose, config.splits);
    loop {
        tokio::select! {
            report = runtime.next_report() => match report {
                Some(report) => {
                    for line in renderer.render(&report) {
                        println!("{line}");
                    }
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    runtime.shutdown().await.context("run follower stopped with an error")?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
