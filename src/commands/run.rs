//! Dashboard command handler.
//!
//! Drives the LCD until interrupted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use tokio::sync::broadcast;

use crate::core::config::{CpuScale, DashboardConfig};
use crate::core::dashboard::{Dashboard, DisplaySink};
use crate::platform::{check_display_device, FramebufferSink, PngSink, SinkKind, SysinfoSource};
use crate::ui::Assets;

/// Options taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub per_core: bool,
    pub sink: SinkKind,
    pub device: PathBuf,
    pub backlight: Option<PathBuf>,
    pub no_splash: bool,
    pub skip_checks: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            per_core: false,
            sink: SinkKind::Spi,
            device: PathBuf::from(SinkKind::Spi.default_device()),
            backlight: None,
            no_splash: false,
            skip_checks: false,
        }
    }
}

impl RunOptions {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let sink_name = matches
            .get_one::<String>("sink")
            .map(String::as_str)
            .unwrap_or("spi");
        let sink = SinkKind::parse(sink_name).ok_or_else(|| {
            anyhow!("Unknown sink '{}' (expected spi, framebuffer or png)", sink_name)
        })?;

        let device = matches
            .get_one::<String>("device")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(sink.default_device()));

        Ok(Self {
            per_core: matches.get_flag("per-core"),
            sink,
            device,
            backlight: matches.get_one::<String>("backlight").map(PathBuf::from),
            no_splash: matches.get_flag("no-splash"),
            skip_checks: matches.get_flag("skip-checks"),
        })
    }

    pub fn dashboard_config(&self) -> DashboardConfig {
        let mut config = DashboardConfig::default();
        if self.per_core {
            config.cpu_scale = CpuScale::PerCoreSum;
        }
        if self.no_splash {
            config.splash_duration = Duration::ZERO;
        }
        config
    }

    fn build_sink(&self) -> Result<Box<dyn DisplaySink>> {
        Ok(match self.sink {
            SinkKind::Spi => spi_sink(&self.device)?,
            SinkKind::Framebuffer => Box::new(FramebufferSink::new(
                self.device.clone(),
                self.backlight.clone(),
            )),
            SinkKind::Png => Box::new(PngSink::new(self.device.clone())),
        })
    }
}

#[cfg(target_os = "linux")]
fn spi_sink(device: &Path) -> Result<Box<dyn DisplaySink>> {
    use crate::platform::display::spi::RppalBus;
    use crate::platform::{SpiPins, St7789Sink};

    let bus = RppalBus::open(device, SpiPins::default())
        .with_context(|| format!("Failed to open SPI panel on {}", device.display()))?;
    Ok(Box::new(St7789Sink::new(bus)))
}

#[cfg(not(target_os = "linux"))]
fn spi_sink(device: &Path) -> Result<Box<dyn DisplaySink>> {
    Err(anyhow!(
        "SPI panel {} is only supported on Linux; use --sink png",
        device.display()
    ))
}

/// Execute the run command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let options = RunOptions::from_matches(matches)?;
    run_with(options)
}

pub fn run_with(options: RunOptions) -> Result<()> {
    log::info!("Raspberry Pi Hardware Monitor Start");

    if options.skip_checks {
        log::warn!("Startup checks skipped");
    } else {
        super::check::verify()?;
        check_display_device(options.sink, &options.device)?;
    }

    let config = options.dashboard_config();
    let assets = Assets::load(&config);
    let dashboard = Dashboard::new(
        config,
        Box::new(SysinfoSource::new()),
        options.build_sink()?,
        assets,
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .thread_name("hwdash-worker")
        .build()
        .context("Failed to build Tokio runtime")?;

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    ctrlc::set_handler(move || {
        // send() only fails once the loop has already stopped listening
        let _ = shutdown_tx.send(());
    })
    .context("Failed to install interrupt handler")?;

    let stats = runtime
        .block_on(dashboard.run(Box::new(SysinfoSource::new()), shutdown_rx))
        .context("Dashboard failed to start")?;

    log::info!(
        "Ran {} ticks ({} failed)",
        stats.ticks,
        stats.failed_ticks
    );
    log::info!("Hardware Monitor End");
    Ok(())
}
