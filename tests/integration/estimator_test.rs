// Tests for the background throughput estimator

use std::sync::Arc;
use std::time::Duration;

use hwdash::core::dashboard::{NetworkRateEstimator, SharedState};

use super::common::MockSource;

#[tokio::test]
async fn test_publishes_rates_then_freezes_on_failure() {
    let source = MockSource::healthy();
    source.push_counters(1_000_000, 2_000_000);
    source.push_counters(2_000_000, 2_500_000);
    // the third read finds the interface gone

    let state = Arc::new(SharedState::new());
    let estimator = NetworkRateEstimator::new(
        source.clone(),
        "eth0",
        Duration::from_millis(5),
        Arc::clone(&state),
    );

    estimator.run().await;

    let upload = state.upload_mbps.get();
    let download = state.download_mbps.get();
    assert!(upload > 0.0);
    assert!((upload / download - 2.0).abs() < 1e-9);
    assert!(!state.estimator_alive());
}

#[tokio::test]
async fn test_failure_at_start_keeps_defaults() {
    let source = MockSource::healthy();
    let state = Arc::new(SharedState::new());
    let estimator = NetworkRateEstimator::new(
        source,
        "eth0",
        Duration::from_millis(5),
        Arc::clone(&state),
    );

    estimator.run().await;

    assert_eq!(state.upload_mbps.get(), 0.0);
    assert_eq!(state.download_mbps.get(), 0.0);
    assert!(state.upload_mbps.captured_at().is_none());
    assert!(!state.estimator_alive());
}

#[tokio::test]
async fn test_alive_while_sampling() {
    let source = MockSource::healthy();
    for i in 0..200u64 {
        source.push_counters(i * 1_000, i * 2_000);
    }

    let state = Arc::new(SharedState::new());
    let estimator = NetworkRateEstimator::new(
        source,
        "eth0",
        Duration::from_millis(5),
        Arc::clone(&state),
    );
    let handle = tokio::spawn(estimator.run());

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(state.estimator_alive());

    handle.await.unwrap();
    assert!(!state.estimator_alive());
    assert!(state.download_mbps.captured_at().is_some());
}
