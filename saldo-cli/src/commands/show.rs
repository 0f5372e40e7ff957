//! Show command - one manual refresh cycle

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use saldo_core::{live_refresh_service, Renderer};

use crate::output;

pub async fn run(dir: &Path, json: bool) -> Result<()> {
    let config = super::load_config(dir)?;
    let service = live_refresh_service(&config)?;

    let snapshot = service
        .run_cycle()
        .await
        .context("Refresh cycle failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let today = Local::now().date_naive();
    let lines = Renderer::new(&config).render(&snapshot, today);
    output::print_lines(&lines);

    for warning in &snapshot.warnings {
        output::warning(warning);
    }

    Ok(())
}
