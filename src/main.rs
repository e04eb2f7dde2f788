//! # Kitchen Fulfillment Demo
//!
//! Feeds a JSON file of orders through the kitchen at a fixed rate and reports what
//! happened to them.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --file orders.json --throughput 2 --limit 20
//! ```

use clap::Parser;
use kitchen_fulfillment::lifecycle::{
    setup_tracing, spawn_event_logger, JsonFileSource, KitchenConfig, KitchenSystem, OrderSource,
    RandomSource, SeededRandomSource, ThreadRandomSource,
};
use kitchen_fulfillment::model::ErrorKind;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Instrument};

#[derive(Debug, Parser)]
#[command(name = "kitchen-fulfillment", version, about = "Simulate a perishable-goods kitchen")]
struct Cli {
    /// JSON array of orders to process
    #[arg(short, long)]
    file: PathBuf,

    /// Orders started per second
    #[arg(short, long, default_value_t = 0.5)]
    throughput: f64,

    /// Process at most this many orders
    #[arg(short, long)]
    limit: Option<usize>,

    /// Kitchen configuration JSON (shelves, timing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible courier travel times and evictions
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => KitchenConfig::from_json_file(path)?,
        None => KitchenConfig::default(),
    };
    let random: Arc<dyn RandomSource> = match cli.seed {
        Some(seed) => Arc::new(SeededRandomSource::new(seed)),
        None => Arc::new(ThreadRandomSource),
    };

    let mut orders = JsonFileSource::new(&cli.file).load().await?;
    if let Some(limit) = cli.limit {
        orders.truncate(limit);
    }
    info!(orders = orders.len(), throughput = cli.throughput, "Starting kitchen");

    let system = KitchenSystem::new(config, random)?;
    let logger = spawn_event_logger(system.subscribe());

    let span = tracing::info_span!("batch");
    let report = system
        .run_batch(orders, cli.throughput)
        .instrument(span)
        .await?;

    info!(
        received = report.stats.received,
        delivered = report.stats.delivered,
        discarded = report.stats.discarded,
        couriers = report.stats.couriers_allocated,
        mean_delivery = ?report.stats.mean_delivery(),
        elapsed = ?report.elapsed,
        "Batch complete"
    );
    info!(
        out_of_capacity = report.failed(ErrorKind::OutOfCapacity),
        not_found = report.failed(ErrorKind::OrderNotFound),
        expired = report.failed(ErrorKind::OrderExpired),
        "Failures"
    );

    system.shutdown().await?;
    let _ = logger.await;

    info!("Application completed successfully");
    Ok(())
}
