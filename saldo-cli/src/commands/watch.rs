//! Watch command - the refresh scheduler
//!
//! Runs cycles forever: the configured interval after a successful cycle,
//! the fixed 20-second retry after a halted one. Cycles are awaited to
//! completion before the next delay starts, so a slow cycle delays the
//! next tick instead of overlapping it.

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use saldo_core::{live_refresh_service, Renderer};
use tracing::warn;

use crate::output;

pub async fn run(dir: &Path) -> Result<()> {
    let config = super::load_config(dir)?;
    let service = live_refresh_service(&config)?;
    let renderer = Renderer::new(&config);

    output::info("Loading...");

    loop {
        let today = Local::now().date_naive();

        let delay = match service.run_cycle().await {
            Ok(snapshot) => {
                println!();
                println!(
                    "{}",
                    Local::now().format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
                );
                output::print_lines(&renderer.render(&snapshot, today));
                for warning in &snapshot.warnings {
                    warn!("{}", warning);
                }
                config.refresh_interval()
            }
            Err(e) => {
                println!();
                output::print_lines(&renderer.render_error(&e));
                config.error_retry()
            }
        };

        tokio::time::sleep(delay).await;
    }
}
