//! Latest-known-value store shared by the samplers, the network estimator and
//! the frame composer.
//!
//! Every metric lives in its own [`Slot`]. A slot is written by exactly one
//! producer and replaced wholesale on each write, so readers see either the
//! previous value or the new one, never a mix.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
struct Reading<T> {
    value: T,
    captured_at: Option<DateTime<Utc>>,
}

/// A single named, atomically-replaced latest-value holder.
#[derive(Debug)]
pub struct Slot<T> {
    reading: RwLock<Reading<T>>,
}

impl<T: Clone> Slot<T> {
    pub fn new(default: T) -> Self {
        Self {
            reading: RwLock::new(Reading {
                value: default,
                captured_at: None,
            }),
        }
    }

    pub fn set(&self, value: T) {
        *self.reading.write() = Reading {
            value,
            captured_at: Some(Utc::now()),
        };
    }

    pub fn get(&self) -> T {
        self.reading.read().value.clone()
    }

    /// `None` until the first successful write.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.reading.read().captured_at
    }
}

impl<T: Clone + Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Every metric the dashboard shows.
///
/// Created once at startup with defaults (0 / empty string) and shared behind
/// an `Arc` for the lifetime of the process.
#[derive(Debug)]
pub struct SharedState {
    // fast tier
    pub cpu_percent: Slot<f32>,
    pub cpu_temperature: Slot<f32>,
    // medium tier
    pub memory_percent: Slot<f32>,
    pub swap_percent: Slot<f32>,
    // slow tier
    pub disk_percent: Slot<f32>,
    pub disk_used_gb: Slot<f64>,
    pub ip_address: Slot<String>,
    // startup
    pub hostname: Slot<String>,
    pub interface: Slot<String>,
    // network estimator
    pub upload_mbps: Slot<f64>,
    pub download_mbps: Slot<f64>,
    estimator_alive: AtomicBool,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            cpu_percent: Slot::default(),
            cpu_temperature: Slot::default(),
            memory_percent: Slot::default(),
            swap_percent: Slot::default(),
            disk_percent: Slot::default(),
            disk_used_gb: Slot::default(),
            ip_address: Slot::default(),
            hostname: Slot::default(),
            interface: Slot::default(),
            upload_mbps: Slot::default(),
            download_mbps: Slot::default(),
            estimator_alive: AtomicBool::new(false),
        }
    }

    /// Whether the background throughput loop is still producing values.
    pub fn estimator_alive(&self) -> bool {
        self.estimator_alive.load(Ordering::Acquire)
    }

    pub fn set_estimator_alive(&self, alive: bool) {
        self.estimator_alive.store(alive, Ordering::Release);
    }

    /// Copy every slot into a plain value for rendering or reporting.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            cpu_percent: self.cpu_percent.get(),
            cpu_temperature: self.cpu_temperature.get(),
            memory_percent: self.memory_percent.get(),
            swap_percent: self.swap_percent.get(),
            disk_percent: self.disk_percent.get(),
            disk_used_gb: self.disk_used_gb.get(),
            ip_address: self.ip_address.get(),
            hostname: self.hostname.get(),
            interface: self.interface.get(),
            upload_mbps: self.upload_mbps.get(),
            download_mbps: self.download_mbps.get(),
            estimator_alive: self.estimator_alive(),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`SharedState`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub cpu_percent: f32,
    pub cpu_temperature: f32,
    pub memory_percent: f32,
    pub swap_percent: f32,
    pub disk_percent: f32,
    pub disk_used_gb: f64,
    pub ip_address: String,
    pub hostname: String,
    pub interface: String,
    pub upload_mbps: f64,
    pub download_mbps: f64,
    pub estimator_alive: bool,
}
