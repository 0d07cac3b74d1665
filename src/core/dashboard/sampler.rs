//! Tiered metric collection.
//!
//! Each tier reads everything it needs from the source first and only then
//! writes into [`SharedState`], so a failing read leaves every slot of that
//! tier at its previous value.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::{CpuScale, DashboardConfig};
use crate::error::{DashError, Result};

use super::discovery::{discover_primary_interface, PrimaryInterface};
use super::source::MetricsSource;
use super::state::SharedState;

/// Sampling frequency class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Every tick: CPU utilization and temperature.
    Fast,
    /// Memory and swap.
    Medium,
    /// Disk and IP address.
    Slow,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Fast => "fast",
            Tier::Medium => "medium",
            Tier::Slow => "slow",
        }
    }
}

/// Tiers due on `tick`, fastest first.
pub fn tiers_due(tick: u64, medium_every: u64, slow_every: u64) -> Vec<Tier> {
    let mut due = vec![Tier::Fast];
    if medium_every > 0 && tick % medium_every == 0 {
        due.push(Tier::Medium);
    }
    if slow_every > 0 && tick % slow_every == 0 {
        due.push(Tier::Slow);
    }
    due
}

pub struct RateSampler {
    source: Box<dyn MetricsSource>,
    state: Arc<SharedState>,
    cpu_scale: CpuScale,
    disk_path: PathBuf,
    interface_candidates: Vec<String>,
}

impl RateSampler {
    pub fn new(
        source: Box<dyn MetricsSource>,
        state: Arc<SharedState>,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            source,
            state,
            cpu_scale: config.cpu_scale,
            disk_path: config.disk_path.clone(),
            interface_candidates: config.interface_candidates.clone(),
        }
    }

    /// CPU utilization and temperature.
    pub fn collect_fast(&mut self) -> Result<()> {
        log::debug!("collect_fast()");

        let cpu = self
            .source
            .cpu_percent(self.cpu_scale.is_per_core())?
            .aggregate();

        let temperature = match self.source.cpu_temperature()? {
            Some(celsius) => celsius,
            None => {
                let e = DashError::sensor_unavailable("no temperature sensor data, reporting 0");
                log::warn!("{} ({})", e, e.classification());
                0.0
            }
        };

        self.state.cpu_percent.set(cpu);
        self.state.cpu_temperature.set(temperature);
        Ok(())
    }

    /// Memory and swap utilization, followed by the status line.
    pub fn collect_medium(&mut self) -> Result<()> {
        log::debug!("collect_medium()");

        let memory = self.source.virtual_memory()?;
        let swap = self.source.swap_memory()?;

        self.state.memory_percent.set(memory.percent);
        self.state.swap_percent.set(swap.percent);

        self.log_status();
        Ok(())
    }

    /// Root filesystem usage and the displayed IP address.
    pub fn collect_slow(&mut self) -> Result<()> {
        log::debug!("collect_slow()");

        let disk = self.source.disk_usage(&self.disk_path)?;
        let primary =
            discover_primary_interface(self.source.as_mut(), &self.interface_candidates);

        self.state.disk_percent.set(disk.percent);
        self.state.disk_used_gb.set(disk.used_gb());
        self.state
            .ip_address
            .set(PrimaryInterface::address_label(primary.as_ref()));
        Ok(())
    }

    pub fn collect(&mut self, tier: Tier) -> Result<()> {
        match tier {
            Tier::Fast => self.collect_fast(),
            Tier::Medium => self.collect_medium(),
            Tier::Slow => self.collect_slow(),
        }
    }

    /// Run one tier and contain its failure. Returns whether it succeeded.
    pub fn run_tier(&mut self, tier: Tier) -> bool {
        match self.collect(tier) {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "{} tier skipped ({}): {}",
                    tier.name(),
                    e.classification(),
                    e
                );
                false
            }
        }
    }

    /// Primary interface discovery against this sampler's source.
    pub fn discover(&mut self) -> Option<PrimaryInterface> {
        discover_primary_interface(self.source.as_mut(), &self.interface_candidates)
    }

    /// Read the hostname once; failures leave the slot empty.
    pub fn record_hostname(&mut self) {
        match self.source.hostname() {
            Ok(hostname) => self.state.hostname.set(hostname),
            Err(e) => log::warn!("Hostname unavailable ({}): {}", e.classification(), e),
        }
    }

    fn log_status(&self) {
        let snapshot = self.state.snapshot();
        log::info!(
            "Values -> CPU: {}%, CPU_TEMP: {}°C, RAM: {}%, SWAP: {}%, DISK: {}%",
            snapshot.cpu_percent as i32,
            snapshot.cpu_temperature as i32,
            snapshot.memory_percent as i32,
            snapshot.swap_percent as i32,
            snapshot.disk_percent as i32,
        );
    }
}
