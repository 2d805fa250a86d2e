mod utils;
use utils::init;

use graphload::prelude::*;
use mock_graph::MockGraph;
use std::collections::HashSet;
use std::time::{Duration, Instant};

fn workload_for(mock: &MockGraph, ids: &[&str]) -> Workload {
    let dataset = Dataset::from_ids(ids.iter().map(|s| s.to_string()).collect());
    Workload::new(
        WorkloadConfig::new(mock.endpoint()),
        dataset,
        reqwest::Client::new(),
    )
    .unwrap()
}

#[tokio::test]
async fn every_identity_reaches_the_service() {
    init();
    let mock = MockGraph::spawn().await;
    let workload = workload_for(&mock, &["alice", "bob", "carol"]);

    let summary = workload.iteration().await;

    assert_eq!(summary.success, 3);
    assert_eq!(summary.error, 0);
    assert_eq!(mock.hits(), 3);

    let received = mock.received();
    let identities: HashSet<String> = received
        .iter()
        .map(|v| v["identity"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        identities,
        HashSet::from(["alice".to_string(), "bob".to_string(), "carol".to_string()])
    );
    assert!(received.iter().all(|v| v["platform"] == "twitter"));
}

#[tokio::test]
async fn barrier_waits_for_the_slowest_request() {
    init();
    let delay = Duration::from_millis(300);
    let mock = MockGraph::spawn_with_delay(delay).await;
    let workload = workload_for(&mock, &["alice", "bob", "carol", "slow:dave"]);

    let start = Instant::now();
    let summary = workload.iteration().await;

    assert!(
        start.elapsed() >= delay,
        "iteration returned before the slow request finished"
    );
    assert_eq!(summary.success, 4);
    assert_eq!(mock.hits(), 4);
}

#[tokio::test]
async fn one_failure_does_not_abort_siblings() {
    init();
    let mock = MockGraph::spawn().await;
    let workload = workload_for(&mock, &["alice", "fail:bob", "carol", "dave"]);

    let summary = workload.iteration().await;

    assert_eq!(summary.success, 3);
    assert_eq!(summary.error, 1);
    assert_eq!(mock.hits(), 4);
}

#[tokio::test]
async fn connection_refused_fails_every_request_but_completes() {
    init();
    // Bind-then-drop to get a local port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dataset = Dataset::from_ids(vec!["alice".to_string(), "bob".to_string()]);
    let workload =
        Workload::new(WorkloadConfig::new(endpoint), dataset, reqwest::Client::new()).unwrap();

    let summary = workload.iteration().await;

    assert_eq!(summary.success, 0);
    assert_eq!(summary.error, 2);
}

#[tokio::test]
async fn in_flight_ceiling_is_respected() {
    init();
    let mock = MockGraph::spawn_with_delay(Duration::from_millis(100)).await;
    let ids: Vec<String> = (0..8).map(|i| format!("slow:user-{i}")).collect();
    let config = WorkloadConfig::new(mock.endpoint()).with_max_in_flight(2);
    let workload =
        Workload::new(config, Dataset::from_ids(ids), reqwest::Client::new()).unwrap();

    let summary = workload.iteration().await;

    assert_eq!(summary.success, 8);
    assert!(
        mock.peak_in_flight() <= 2,
        "peak in flight was {}",
        mock.peak_in_flight()
    );
}
