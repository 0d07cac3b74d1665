//! Startup environment checks.
//!
//! These run before the display is touched; any failure aborts the process
//! with a descriptive message.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashError, Result};
use crate::platform::display::SinkKind;

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";
pub const BOOT_CONFIG_PATH: &str = "/boot/firmware/config.txt";
pub const SPI_DEVICES: [&str; 4] = [
    "/dev/spidev0.0",
    "/dev/spidev0.1",
    "/dev/spidev1.0",
    "/dev/spidev1.1",
];

/// Files consulted by [`check_preconditions`].
#[derive(Debug, Clone)]
pub struct PreconditionPaths {
    pub cpuinfo: PathBuf,
    pub boot_config: PathBuf,
    pub spi_devices: Vec<PathBuf>,
}

impl Default for PreconditionPaths {
    fn default() -> Self {
        Self {
            cpuinfo: PathBuf::from(CPUINFO_PATH),
            boot_config: PathBuf::from(BOOT_CONFIG_PATH),
            spi_devices: SPI_DEVICES.iter().map(PathBuf::from).collect(),
        }
    }
}

/// Checks if `/proc/cpuinfo` names a Raspberry Pi.
pub fn is_raspberry_pi(cpuinfo: &Path) -> bool {
    fs::read_to_string(cpuinfo)
        .map(|contents| contents.contains("Raspberry Pi"))
        .unwrap_or(false)
}

/// Checks for any SPI device node.
pub fn is_spi_enabled(devices: &[PathBuf]) -> bool {
    devices.iter().any(|device| device.exists())
}

/// Checks `config.txt` for an uncommented `dtparam=spi=on`.
pub fn is_spi_enabled_config(boot_config: &Path) -> bool {
    fs::read_to_string(boot_config)
        .map(|contents| {
            contents
                .lines()
                .map(str::trim)
                .any(|line| line.starts_with("dtparam=spi=on"))
        })
        .unwrap_or(false)
}

/// Run every check in order: hardware class, SPI, temperature sensors.
pub fn check_preconditions(paths: &PreconditionPaths, has_temperature_sensors: bool) -> Result<()> {
    if !is_raspberry_pi(&paths.cpuinfo) {
        return Err(DashError::precondition("Only Raspberry Pi is supported"));
    }

    if !is_spi_enabled(&paths.spi_devices) && !is_spi_enabled_config(&paths.boot_config) {
        return Err(DashError::precondition("SPI is not enabled on Raspberry Pi"));
    }

    if !has_temperature_sensors {
        return Err(DashError::precondition("Temperature sensors are not supported"));
    }

    Ok(())
}

/// The selected sink's device node must exist before the display is touched.
pub fn check_display_device(kind: SinkKind, device: &Path) -> Result<()> {
    match kind {
        SinkKind::Png => Ok(()),
        SinkKind::Spi | SinkKind::Framebuffer if device.exists() => Ok(()),
        SinkKind::Spi => Err(DashError::precondition(format!(
            "SPI device {} not found",
            device.display()
        ))),
        SinkKind::Framebuffer => Err(DashError::precondition(format!(
            "Framebuffer {} not found (is the fbtft overlay loaded?)",
            device.display()
        ))),
    }
}
