//! Skill-stack puzzle miner
//!
//! Streams puzzle datasets and collects, per theme combination, the puzzles whose
//! solution shows the first motif enabling the second.

use tracing::info;

use puzzle_miner::config::MinerConfig;
use puzzle_miner::report;
use puzzle_miner::{Miner, MiningOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = MinerConfig::load()?;
    info!(
        roots = ?config.dataset_roots,
        sample_size = config.sample_size,
        workers = config.workers,
        pairs = config.pairs.len(),
        "Miner config loaded"
    );

    let miner = Miner::new(MiningOptions::from(&config));
    let mut reports = Vec::with_capacity(config.pairs.len());
    for pair in &config.pairs {
        info!(combination = %pair, "Mining combination");
        reports.push(
            miner
                .mine(pair, config.sample_size, &config.dataset_roots)
                .await?,
        );
    }

    print!("{}", report::summary_table(&reports));

    if let Some(path) = &config.json_output {
        report::write_json(path, &reports)?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}
