//! `MetricsSource` backed by the sysinfo crate.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

#[cfg(not(unix))]
use sysinfo::Disks;
use sysinfo::{Components, CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::core::dashboard::{CpuUsage, DiskUsage, MemoryUsage, MetricsSource, NetCounters};
use crate::error::{DashError, Result};

/// Reads host metrics through sysinfo. Each call refreshes only what it needs.
pub struct SysinfoSource {
    system: System,
    components: Components,
    #[cfg(not(unix))]
    disks: Disks,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::everything());

        let mut system = System::new_with_specifics(refresh_kind);
        // CPU usage is a delta between two refreshes; prime the first one.
        system.refresh_cpu_usage();

        Self {
            system,
            components: Components::new_with_refreshed_list(),
            #[cfg(not(unix))]
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// Whether the host exposes any temperature sensor at all.
    pub fn has_temperature_sensors(&self) -> bool {
        !self.components.list().is_empty()
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(used: u64, total: u64) -> f32 {
    if total > 0 {
        (used as f32 / total as f32) * 100.0
    } else {
        0.0
    }
}

impl MetricsSource for SysinfoSource {
    fn cpu_percent(&mut self, per_core: bool) -> Result<CpuUsage> {
        self.system.refresh_cpu_usage();

        if per_core {
            Ok(CpuUsage::PerCore(
                self.system.cpus().iter().map(|cpu| cpu.cpu_usage()).collect(),
            ))
        } else {
            Ok(CpuUsage::Total(self.system.global_cpu_usage()))
        }
    }

    fn cpu_temperature(&mut self) -> Result<Option<f32>> {
        self.components.refresh(true);

        Ok(self
            .components
            .list()
            .first()
            .and_then(|component| component.temperature()))
    }

    fn virtual_memory(&mut self) -> Result<MemoryUsage> {
        self.system.refresh_memory();
        Ok(MemoryUsage {
            percent: percent(self.system.used_memory(), self.system.total_memory()),
        })
    }

    fn swap_memory(&mut self) -> Result<MemoryUsage> {
        self.system.refresh_memory();
        Ok(MemoryUsage {
            percent: percent(self.system.used_swap(), self.system.total_swap()),
        })
    }

    #[cfg(unix)]
    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage> {
        super::fs_usage::disk_usage(path)
    }

    #[cfg(not(unix))]
    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage> {
        self.disks.refresh(true);

        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == path)
            .ok_or_else(|| {
                DashError::metric_collection(format!(
                    "no filesystem mounted at {}",
                    path.display()
                ))
            })?;

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());

        Ok(DiskUsage {
            percent: percent(used, total),
            used_bytes: used,
        })
    }

    fn net_io_counters(&mut self, interface: &str) -> Result<NetCounters> {
        self.networks.refresh(true);

        let data = self.networks.list().get(interface).ok_or_else(|| {
            DashError::interface_lookup(format!("interface {} not found", interface))
        })?;

        Ok(NetCounters {
            bytes_sent: data.total_transmitted(),
            bytes_received: data.total_received(),
        })
    }

    fn interface_ipv4(&mut self, name: &str) -> Result<Option<Ipv4Addr>> {
        self.networks.refresh(true);

        let data = self
            .networks
            .list()
            .get(name)
            .ok_or_else(|| DashError::interface_lookup(format!("interface {} not found", name)))?;

        Ok(data.ip_networks().iter().find_map(|network| match network.addr {
            IpAddr::V4(address) => Some(address),
            IpAddr::V6(_) => None,
        }))
    }

    fn hostname(&mut self) -> Result<String> {
        System::host_name().ok_or_else(|| DashError::other("hostname unavailable"))
    }
}
