//! One-shot metrics report (for scripting).

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::{CpuScale, DashboardConfig, NET_SAMPLE_INTERVAL};
use crate::core::dashboard::{
    MetricsSource, NetworkCounterSnapshot, NetworkRate, RateSampler, SharedState, Tier,
};
use crate::platform::SysinfoSource;

/// Execute the snapshot command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let mut config = DashboardConfig::default();
    if matches.get_flag("per-core") {
        config.cpu_scale = CpuScale::PerCoreSum;
    }

    let state = Arc::new(SharedState::new());
    let mut sampler = RateSampler::new(Box::new(SysinfoSource::new()), Arc::clone(&state), &config);

    sampler.record_hostname();
    let primary = sampler.discover();

    // CPU usage needs two refreshes a minimum interval apart.
    std::thread::sleep(config.cpu_settle);
    for tier in [Tier::Slow, Tier::Fast, Tier::Medium] {
        sampler.run_tier(tier);
    }

    if let Some(primary) = primary {
        state.interface.set(primary.name.clone());
        let rate = measure_rate(&primary.name).with_context(|| {
            format!("Failed to measure throughput on {}", primary.name)
        })?;
        state.upload_mbps.set(rate.upload_mbps);
        state.download_mbps.set(rate.download_mbps);
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn measure_rate(interface: &str) -> Result<NetworkRate> {
    let mut source = SysinfoSource::new();

    let mut capture = || -> Result<NetworkCounterSnapshot> {
        let counters = source.net_io_counters(interface)?;
        Ok(NetworkCounterSnapshot {
            bytes_sent: counters.bytes_sent,
            bytes_received: counters.bytes_received,
            taken_at: Instant::now(),
        })
    };

    let previous = capture()?;
    std::thread::sleep(NET_SAMPLE_INTERVAL);
    let current = capture()?;

    Ok(NetworkRate::between(&previous, &current))
}
