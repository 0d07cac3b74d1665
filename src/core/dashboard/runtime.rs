//! Fixed-tick main loop: sample, compose, push.
//!
//! Phases run INIT → SPLASH → RUNNING → STOPPED. Inside RUNNING every tick
//! either completes or fails; a failed tick is logged, backed off, and the loop
//! carries on.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::core::config::DashboardConfig;
use crate::error::Result;
use crate::ui::{AnimationState, Assets, Frame, FrameComposer};

use super::discovery::PrimaryInterface;
use super::network::NetworkRateEstimator;
use super::sampler::{tiers_due, RateSampler, Tier};
use super::schedule::TickCadence;
use super::sink::DisplaySink;
use super::source::MetricsSource;
use super::state::SharedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Init,
    Splash,
    Running,
    Stopped,
}

/// Tick counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub failed_ticks: u64,
}

pub struct Dashboard {
    config: DashboardConfig,
    state: Arc<SharedState>,
    sampler: RateSampler,
    composer: FrameComposer,
    splash: Frame,
    sink: Box<dyn DisplaySink>,
    animation: AnimationState,
    phase: LoopPhase,
    tick: u64,
}

impl Dashboard {
    pub fn new(
        config: DashboardConfig,
        source: Box<dyn MetricsSource>,
        sink: Box<dyn DisplaySink>,
        assets: Assets,
    ) -> Self {
        let state = Arc::new(SharedState::new());
        let sampler = RateSampler::new(source, Arc::clone(&state), &config);
        let composer = FrameComposer::new(assets.background, config.cpu_scale);

        Self {
            config,
            state,
            sampler,
            composer,
            splash: assets.splash,
            sink,
            animation: AnimationState::default(),
            phase: LoopPhase::Init,
            tick: 0,
        }
    }

    pub fn state(&self) -> Arc<SharedState> {
        Arc::clone(&self.state)
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Bring up the display, pick the monitored interface, start the throughput
    /// estimator and warm up every tier.
    ///
    /// Must be called from within a Tokio runtime. A display that cannot be
    /// initialized is the only error returned.
    pub async fn init(&mut self, estimator_source: Box<dyn MetricsSource>) -> Result<()> {
        self.phase = LoopPhase::Init;

        self.sink.init()?;
        self.sink.clear()?;
        if let Err(e) = self.sink.set_backlight(self.config.backlight_percent) {
            log::warn!("Backlight not set ({}): {}", e.classification(), e);
        }

        self.sampler.record_hostname();

        let primary = self.sampler.discover();
        self.state
            .ip_address
            .set(PrimaryInterface::address_label(primary.as_ref()));

        // The monitored interface is fixed here; later discoveries only update
        // the displayed address.
        let interface = match primary {
            Some(primary) => Some(primary.name),
            None => {
                let fallback = self.config.interface_candidates.first().cloned();
                log::warn!(
                    "No interface with an IPv4 address, monitoring {:?}",
                    fallback
                );
                fallback
            }
        };

        match interface {
            Some(interface) => {
                self.state.interface.set(interface.clone());
                let estimator = NetworkRateEstimator::new(
                    estimator_source,
                    interface,
                    self.config.net_sample_interval,
                    Arc::clone(&self.state),
                );
                tokio::spawn(estimator.run());
            }
            None => log::warn!("No interface candidates configured, throughput disabled"),
        }

        // CPU usage is a delta since the previous refresh.
        if !self.config.cpu_settle.is_zero() {
            tokio::time::sleep(self.config.cpu_settle).await;
        }
        for tier in [Tier::Slow, Tier::Fast, Tier::Medium] {
            self.sampler.run_tier(tier);
        }
        Ok(())
    }

    /// Show the splash image for the configured duration. Returns `false` when
    /// interrupted.
    pub async fn splash(&mut self, shutdown: &mut broadcast::Receiver<()>) -> Result<bool> {
        self.phase = LoopPhase::Splash;
        self.sink.show(&self.splash)?;

        tokio::select! {
            _ = tokio::time::sleep(self.config.splash_duration) => Ok(true),
            _ = shutdown.recv() => Ok(false),
        }
    }

    /// One tick: due tiers, then compose and push.
    ///
    /// Tier failures are contained by the sampler; only composing or pushing
    /// the frame can fail the tick. The tick counter advances either way.
    pub fn tick(&mut self) -> Result<()> {
        let tick = self.tick;
        self.tick += 1;

        for tier in tiers_due(tick, self.config.medium_every, self.config.slow_every) {
            self.sampler.run_tier(tier);
        }

        let frame = self
            .composer
            .compose(&self.state.snapshot(), &mut self.animation);
        self.sink.show(&frame)
    }

    /// Tick until `shutdown` fires.
    pub async fn run_loop(&mut self, shutdown: &mut broadcast::Receiver<()>) -> LoopStats {
        self.phase = LoopPhase::Running;
        log::info!("Entering forever loop");

        let mut stats = LoopStats::default();
        let mut cadence = TickCadence::starting_at(Instant::now(), self.config.tick_period);

        loop {
            stats.ticks += 1;
            let wait = match self.tick() {
                Ok(()) => cadence.remaining(Instant::now()),
                Err(e) => {
                    stats.failed_ticks += 1;
                    log::error!("Tick failed ({}): {}", e.classification(), e);
                    self.config.failure_backoff
                }
            };

            let interrupted = tokio::select! {
                _ = tokio::time::sleep(wait) => false,
                _ = shutdown.recv() => true,
            };
            if interrupted {
                log::info!("Loop interrupted by user");
                break;
            }

            cadence.advance(Instant::now());
        }

        self.phase = LoopPhase::Stopped;
        log::info!("End forever loop");
        stats
    }

    /// Full lifecycle. Returns once interrupted, or early if the display could
    /// not be brought up.
    pub async fn run(
        mut self,
        estimator_source: Box<dyn MetricsSource>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<LoopStats> {
        self.init(estimator_source).await?;

        if !self.config.splash_duration.is_zero() && !self.splash(&mut shutdown).await? {
            self.phase = LoopPhase::Stopped;
            log::info!("Loop interrupted by user");
            return Ok(LoopStats::default());
        }

        Ok(self.run_loop(&mut shutdown).await)
    }
}
