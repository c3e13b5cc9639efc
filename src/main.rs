mod config;
mod db;
mod error;
mod export;
mod flow;
mod logging;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load().context("Startup configuration failed")?;

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }
    logging::init(&config)?;

    let mut db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open store at {}", config.db_path.display()))?;

    match args.len() {
        0 | 1 => run::as_tui(&mut db, &config.currency),
        _ => run::as_cli(&args, &mut db, &config.currency),
    }
}
