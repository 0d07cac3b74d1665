use std::net::Ipv4Addr;
use std::path::Path;

use crate::error::Result;

/// CPU utilization as reported by the source.
#[derive(Debug, Clone, PartialEq)]
pub enum CpuUsage {
    Total(f32),
    PerCore(Vec<f32>),
}

impl CpuUsage {
    /// Single figure for display: the total, or the sum across cores.
    pub fn aggregate(&self) -> f32 {
        match self {
            CpuUsage::Total(percent) => *percent,
            CpuUsage::PerCore(cores) => cores.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryUsage {
    pub percent: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskUsage {
    pub percent: f32,
    pub used_bytes: u64,
}

impl DiskUsage {
    pub fn used_gb(&self) -> f64 {
        self.used_bytes as f64 / 1024f64.powi(3)
    }
}

/// Cumulative byte counters of one interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// Trait for host metrics providers
///
/// Every call is a stateless pull that may fail on its own; callers decide
/// how a failure degrades. Implementations are provided in the platform layer.
pub trait MetricsSource: Send {
    fn cpu_percent(&mut self, per_core: bool) -> Result<CpuUsage>;

    /// First entry of the first temperature sensor group, `None` when the host
    /// exposes no sensor data.
    fn cpu_temperature(&mut self) -> Result<Option<f32>>;

    fn virtual_memory(&mut self) -> Result<MemoryUsage>;

    fn swap_memory(&mut self) -> Result<MemoryUsage>;

    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage>;

    fn net_io_counters(&mut self, interface: &str) -> Result<NetCounters>;

    /// First IPv4 address assigned to `name`. Errors when the interface does
    /// not exist.
    fn interface_ipv4(&mut self, name: &str) -> Result<Option<Ipv4Addr>>;

    fn hostname(&mut self) -> Result<String>;
}

impl<T: MetricsSource + ?Sized> MetricsSource for Box<T> {
    fn cpu_percent(&mut self, per_core: bool) -> Result<CpuUsage> {
        (**self).cpu_percent(per_core)
    }

    fn cpu_temperature(&mut self) -> Result<Option<f32>> {
        (**self).cpu_temperature()
    }

    fn virtual_memory(&mut self) -> Result<MemoryUsage> {
        (**self).virtual_memory()
    }

    fn swap_memory(&mut self) -> Result<MemoryUsage> {
        (**self).swap_memory()
    }

    fn disk_usage(&mut self, path: &Path) -> Result<DiskUsage> {
        (**self).disk_usage(path)
    }

    fn net_io_counters(&mut self, interface: &str) -> Result<NetCounters> {
        (**self).net_io_counters(interface)
    }

    fn interface_ipv4(&mut self, name: &str) -> Result<Option<Ipv4Addr>> {
        (**self).interface_ipv4(name)
    }

    fn hostname(&mut self) -> Result<String> {
        (**self).hostname()
    }
}
