//! Compiled dashboard settings.
//!
//! Nothing here is persisted. `DashboardConfig::default()` is what the device
//! runs with; the struct only exists so the CLI can flip a handful of switches
//! and tests can shrink the periods.

use std::path::PathBuf;
use std::time::Duration;

/// Display geometry of the 1.69" ST7789V2 panel (portrait).
pub const DISPLAY_WIDTH: u32 = 240;
pub const DISPLAY_HEIGHT: u32 = 280;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const MEDIUM_TIER_EVERY: u64 = 10;
pub const SLOW_TIER_EVERY: u64 = 30;
pub const SPLASH_DURATION: Duration = Duration::from_secs(4);
pub const NET_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);
pub const FAILURE_BACKOFF: Duration = Duration::from_secs(1);
pub const BACKLIGHT_PERCENT: u8 = 100;

/// Wired before wireless.
pub const INTERFACE_CANDIDATES: [&str; 2] = ["eth0", "wlan0"];
pub const DISK_PATH: &str = "/";

pub const BACKGROUND_IMAGE: &str = "./img/lcdbg2.png";
pub const SPLASH_IMAGE: &str = "./img/splashScreen.png";

/// How CPU utilization is aggregated and which range it is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuScale {
    /// Overall utilization, 0–100.
    #[default]
    Total,
    /// Sum of the per-core utilizations, 0–400 (four cores).
    PerCoreSum,
}

impl CpuScale {
    pub fn max(self) -> f32 {
        match self {
            CpuScale::Total => 100.0,
            CpuScale::PerCoreSum => 400.0,
        }
    }

    pub fn is_per_core(self) -> bool {
        matches!(self, CpuScale::PerCoreSum)
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub cpu_scale: CpuScale,
    pub tick_period: Duration,
    pub medium_every: u64,
    pub slow_every: u64,
    pub splash_duration: Duration,
    pub net_sample_interval: Duration,
    pub failure_backoff: Duration,
    /// Wait before the first CPU reading so it spans a real interval.
    pub cpu_settle: Duration,
    pub backlight_percent: u8,
    pub interface_candidates: Vec<String>,
    pub disk_path: PathBuf,
    pub background_image: PathBuf,
    pub splash_image: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cpu_scale: CpuScale::default(),
            tick_period: TICK_PERIOD,
            medium_every: MEDIUM_TIER_EVERY,
            slow_every: SLOW_TIER_EVERY,
            splash_duration: SPLASH_DURATION,
            net_sample_interval: NET_SAMPLE_INTERVAL,
            failure_backoff: FAILURE_BACKOFF,
            cpu_settle: sysinfo::MINIMUM_CPU_UPDATE_INTERVAL,
            backlight_percent: BACKLIGHT_PERCENT,
            interface_candidates: INTERFACE_CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            disk_path: PathBuf::from(DISK_PATH),
            background_image: PathBuf::from(BACKGROUND_IMAGE),
            splash_image: PathBuf::from(SPLASH_IMAGE),
        }
    }
}
