// src/main.rs

// Declare modules
pub mod backends;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod numeric;
pub mod orchestrator;

use crate::{
    backends::{ConsoleDriver, Driver},
    config::Config,
    grid::GridState,
    orchestrator::{AppOrchestrator, OrchestratorStatus},
};

use anyhow::Context;
use log::{error, info};

/// Main entry point for the `bitplot` application.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting bitplot...");

    let config = Config::load_or_default();
    info!(
        "Grid: {}x{} cells, scale factor {}",
        config.appearance.columns, config.appearance.rows, config.encoding.scale_factor
    );

    let mut grid = GridState::new(config.appearance.columns, config.appearance.rows);
    let mut driver = ConsoleDriver::new(&config.appearance);

    {
        let mut orchestrator = AppOrchestrator::new(&mut grid, &mut driver, &config);
        orchestrator
            .draw_full_grid()
            .context("initial draw failed")?;

        info!("Entering main event loop. Type 'help' for commands.");
        loop {
            match orchestrator.process_event_cycle() {
                Ok(OrchestratorStatus::Running) => {}
                Ok(OrchestratorStatus::Shutdown) => {
                    info!("Shutdown requested. Exiting main loop.");
                    break;
                }
                Err(e) => {
                    error!(
                        "Error in event cycle: {:#}. Root cause: {:?}. Exiting.",
                        e,
                        e.root_cause()
                    );
                    break;
                }
            }
        }
    }

    driver.cleanup().context("driver cleanup failed")?;
    info!("bitplot exited.");
    Ok(())
}
