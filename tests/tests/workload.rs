mod utils;
use utils::init;

use graphload::prelude::*;
use mock_graph::MockGraph;
use std::io::Write;
use tokio::task::JoinSet;

#[tokio::test]
async fn empty_dataset_issues_zero_requests() {
    init();
    let mock = MockGraph::spawn().await;
    let workload = Workload::new(
        WorkloadConfig::new(mock.endpoint()),
        Dataset::from_ids(vec![]),
        reqwest::Client::new(),
    )
    .unwrap();

    let summary = workload.iteration().await;

    assert_eq!(summary.total(), 0);
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn concurrent_virtual_users_share_one_workload() {
    init();
    let mock = MockGraph::spawn().await;
    let dataset = Dataset::from_ids(vec!["alice".to_string(), "bob".to_string()]);
    let workload = Workload::new(
        WorkloadConfig::new(mock.endpoint()),
        dataset,
        reqwest::Client::new(),
    )
    .unwrap();

    let mut vus = JoinSet::new();
    for _ in 0..4 {
        let workload = workload.clone();
        vus.spawn(async move {
            let mut success = 0;
            for _ in 0..5 {
                success += workload.iteration().await.success;
            }
            success
        });
    }

    let mut total = 0;
    while let Some(joined) = vus.join_next().await {
        total += joined.unwrap();
    }

    // 4 virtual users x 5 iterations x 2 identities
    assert_eq!(total, 40);
    assert_eq!(mock.hits(), 40);
}

#[tokio::test]
async fn dataset_file_drives_the_workload_end_to_end() {
    init();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"["alice", "bob"]"#).unwrap();

    let mock = MockGraph::spawn().await;
    let dataset = Dataset::load(file.path()).unwrap();
    let workload = Workload::new(
        WorkloadConfig::new(mock.endpoint()),
        dataset,
        reqwest::Client::new(),
    )
    .unwrap();

    let summary = workload.iteration().await;

    assert_eq!(summary.success, 2);
    assert_eq!(mock.hits(), 2);
}
