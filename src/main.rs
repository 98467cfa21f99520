//! # Mine Simulator
//!
//! Runs the mine until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=info cargo run               # default configuration
//! RUST_LOG=info cargo run -- mine.toml  # settings from a TOML file
//! ```

use mine_sim::config::MineConfig;
use mine_sim::lifecycle::tracing::setup_tracing;
use mine_sim::lifecycle::{Collaborators, LifecycleError, MineSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), LifecycleError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => MineConfig::load(path)?,
        None => MineConfig::default(),
    };
    info!(?config, "Starting mine");

    let mut mine = MineSystem::build(&config, Collaborators::for_config(&config))?;
    mine.start_all()?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C, shutting down");
    }

    let departures = *mine.departures().borrow();
    let report = mine.shutdown().await?;

    info!(
        departed = departures.count,
        joined = report.joined.len(),
        timed_out = report.timed_out.len(),
        "Mine closed"
    );
    Ok(())
}
