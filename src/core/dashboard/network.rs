//! Background upload/download throughput estimation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;

use super::source::MetricsSource;
use super::state::SharedState;

/// Byte counters of the monitored interface and when they were read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkCounterSnapshot {
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub taken_at: Instant,
}

/// Throughput between two snapshots, in megabits per second.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkRate {
    pub upload_mbps: f64,
    pub download_mbps: f64,
}

impl NetworkRate {
    pub fn between(previous: &NetworkCounterSnapshot, current: &NetworkCounterSnapshot) -> Self {
        let elapsed = current
            .taken_at
            .saturating_duration_since(previous.taken_at)
            .as_secs_f64();

        Self {
            upload_mbps: megabits_per_second(
                current.bytes_sent.saturating_sub(previous.bytes_sent),
                elapsed,
            ),
            download_mbps: megabits_per_second(
                current.bytes_received.saturating_sub(previous.bytes_received),
                elapsed,
            ),
        }
    }
}

/// bytes/s -> kB/s (÷1000), then kB/s -> Mb/s (÷1024 ×8).
pub fn megabits_per_second(delta_bytes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs <= 0.0 {
        return 0.0;
    }
    let kilobytes = delta_bytes as f64 / elapsed_secs / 1000.0;
    kilobytes / 1024.0 * 8.0
}

/// Samples the interface counters on its own cadence and publishes rates.
///
/// The first failure ends the loop for good; the last published rate stays in
/// [`SharedState`] and the estimator-alive flag is cleared.
pub struct NetworkRateEstimator<S> {
    source: S,
    interface: String,
    interval: Duration,
    state: Arc<SharedState>,
}

impl<S: MetricsSource> NetworkRateEstimator<S> {
    pub fn new(source: S, interface: impl Into<String>, interval: Duration, state: Arc<SharedState>) -> Self {
        Self {
            source,
            interface: interface.into(),
            interval,
            state,
        }
    }

    fn capture(&mut self) -> Result<NetworkCounterSnapshot> {
        let counters = self.source.net_io_counters(&self.interface)?;
        Ok(NetworkCounterSnapshot {
            bytes_sent: counters.bytes_sent,
            bytes_received: counters.bytes_received,
            taken_at: Instant::now(),
        })
    }

    async fn sample_forever(&mut self) -> Result<()> {
        let mut previous = self.capture()?;
        self.state.set_estimator_alive(true);

        loop {
            tokio::time::sleep(self.interval).await;

            let current = self.capture()?;
            let rate = NetworkRate::between(&previous, &current);

            self.state.upload_mbps.set(rate.upload_mbps);
            self.state.download_mbps.set(rate.download_mbps);

            // Elapsed time is measured from this capture, not from loop start.
            previous = current;
        }
    }

    /// Run until the first failure. Never restarts itself.
    pub async fn run(mut self) {
        log::info!("Network rate estimator started on {}", self.interface);

        if let Err(e) = self.sample_forever().await {
            log::error!(
                "Network rate estimator stopped (BackgroundEstimatorFailure, {}): {}",
                e.classification(),
                e
            );
        }
        self.state.set_estimator_alive(false);
    }
}
