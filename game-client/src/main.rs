use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{Level, error, info};

use word_scramble_client::{
    Config, DriverOptions, GameDriver, HttpScoreService, ProfileStore,
};
use word_scramble_core::RoundEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of the game text
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .init();

    let config = Config::from_env()?;
    info!("Using word source {:?}", config.word_source);

    let profile = match ProfileStore::open(&config.profile_path) {
        Ok(profile) => profile,
        Err(e) => {
            error!(
                "Ignoring unreadable profile {}: {}",
                config.profile_path.display(),
                e
            );
            ProfileStore::in_memory()
        }
    };

    let engine = RoundEngine::new(config.engine_config(), config.progression(), "");
    let driver = GameDriver::new(
        engine,
        config.build_word_source(),
        Arc::new(HttpScoreService::new(config.score_service_url.clone())),
        profile,
        DriverOptions::from_config(&config),
        std::io::stdout(),
    );

    // Blocking stdin reads stay off the runtime
    let (line_tx, line_rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    driver.run(line_rx).await?;
    Ok(())
}
