//! Minimal stand-in for a real load runtime: a handful of virtual users
//! looping the workload's iteration entry point against the in-process mock
//! service for a fixed duration.

use anyhow::Result;
use graphload::prelude::*;
use mock_graph::MockGraph;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

const VIRTUAL_USERS: usize = 4;
const RUN_FOR: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("graphload=debug,mock_graph=info,local_run=info")
        .init();

    let mock = MockGraph::spawn().await;
    info!("Mock profile service listening on {}", mock.addr());

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("identities.json");
    let dataset = Dataset::load(path)?;
    info!("Driving {} identities per batch", dataset.len());

    let config = WorkloadConfig::new(mock.endpoint()).with_max_in_flight(64);
    let workload = Workload::new(config, dataset, reqwest::Client::new())?;

    let deadline = Instant::now() + RUN_FOR;
    let mut vus = JoinSet::new();
    for vu in 0..VIRTUAL_USERS {
        let workload = workload.clone();
        vus.spawn(async move {
            let mut success = 0;
            let mut error = 0;
            let mut iterations = 0u64;
            while Instant::now() < deadline {
                let summary = workload.iteration().await;
                success += summary.success;
                error += summary.error;
                iterations += 1;
            }
            info!(vu, iterations, "Virtual user finished");
            (success, error)
        });
    }

    let (mut success, mut error) = (0u64, 0u64);
    while let Some(joined) = vus.join_next().await {
        let (s, e) = joined?;
        success += s;
        error += e;
    }

    info!(success, error, hits = mock.hits(), "Run complete");
    Ok(())
}
