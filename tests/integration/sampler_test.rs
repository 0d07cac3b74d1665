// Tests for tiered metric collection
// A tier either writes all of its slots or none of them

use std::sync::Arc;

use hwdash::core::dashboard::{RateSampler, SharedState, Tier};
use hwdash::core::{CpuScale, DashboardConfig};

use super::common::MockSource;

fn sampler_with(source: &MockSource, config: &DashboardConfig) -> (RateSampler, Arc<SharedState>) {
    let state = Arc::new(SharedState::new());
    let sampler = RateSampler::new(Box::new(source.clone()), Arc::clone(&state), config);
    (sampler, state)
}

#[test]
fn test_fast_tier_reads_cpu_and_temperature() {
    let source = MockSource::healthy();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());

    sampler.collect_fast().unwrap();

    assert_eq!(state.cpu_percent.get(), 42.0);
    assert_eq!(state.cpu_temperature.get(), 51.5);
    assert!(state.cpu_percent.captured_at().is_some());
}

#[test]
fn test_fast_tier_per_core_sums_cores() {
    let source = MockSource::healthy();
    let config = DashboardConfig {
        cpu_scale: CpuScale::PerCoreSum,
        ..Default::default()
    };
    let (mut sampler, state) = sampler_with(&source, &config);

    sampler.collect_fast().unwrap();

    assert_eq!(state.cpu_percent.get(), 260.0);
}

#[test]
fn test_missing_temperature_sensor_reports_zero() {
    let source = MockSource::healthy();
    source.script().temperature = None;
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());
    state.cpu_temperature.set(48.0);

    sampler.collect_fast().unwrap();

    assert_eq!(state.cpu_temperature.get(), 0.0);
    assert_eq!(state.cpu_percent.get(), 42.0);
}

#[test]
fn test_fast_tier_failure_keeps_previous_values() {
    let source = MockSource::healthy();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());
    sampler.collect_fast().unwrap();

    source.script().cpu_total = 99.0;
    source.script().temperature = Some(80.0);
    source.fail("cpu_temperature");

    assert!(sampler.collect_fast().is_err());
    assert_eq!(state.cpu_percent.get(), 42.0);
    assert_eq!(state.cpu_temperature.get(), 51.5);
}

#[test]
fn test_medium_tier_is_all_or_nothing() {
    let source = MockSource::healthy();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());
    sampler.collect_medium().unwrap();
    assert_eq!(state.memory_percent.get(), 33.0);
    assert_eq!(state.swap_percent.get(), 4.0);

    source.script().memory_percent = 90.0;
    source.fail("swap_memory");

    assert!(sampler.collect_medium().is_err());
    assert_eq!(state.memory_percent.get(), 33.0);
    assert_eq!(state.swap_percent.get(), 4.0);

    source.recover("swap_memory");
    sampler.collect_medium().unwrap();
    assert_eq!(state.memory_percent.get(), 90.0);
}

#[test]
fn test_slow_tier_reads_disk_and_address() {
    let source = MockSource::healthy();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());

    sampler.collect_slow().unwrap();

    assert_eq!(state.disk_percent.get(), 61.0);
    assert!((state.disk_used_gb.get() - 12.0).abs() < 1e-9);
    assert_eq!(state.ip_address.get(), "192.168.1.5");
}

#[test]
fn test_slow_tier_without_address_shows_sentinel() {
    let source = MockSource::healthy();
    source.script().addresses.clear();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());

    sampler.collect_slow().unwrap();

    assert_eq!(state.ip_address.get(), "none");
}

#[test]
fn test_slow_tier_disk_failure_keeps_address() {
    let source = MockSource::healthy();
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());
    sampler.collect_slow().unwrap();

    source
        .script()
        .addresses
        .insert("eth0".to_string(), Some("10.0.0.7".parse().unwrap()));
    source.fail("disk_usage");

    assert!(sampler.collect_slow().is_err());
    assert_eq!(state.ip_address.get(), "192.168.1.5");
    assert_eq!(state.disk_percent.get(), 61.0);
}

#[test]
fn test_run_tier_contains_failures() {
    let source = MockSource::healthy();
    source.fail("cpu_percent");
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());

    assert!(!sampler.run_tier(Tier::Fast));
    assert!(sampler.run_tier(Tier::Medium));
    assert_eq!(state.cpu_percent.get(), 0.0);
    assert!(state.cpu_percent.captured_at().is_none());
}

#[test]
fn test_hostname_failure_leaves_empty() {
    let source = MockSource::healthy();
    source.fail("hostname");
    let (mut sampler, state) = sampler_with(&source, &DashboardConfig::default());

    sampler.record_hostname();

    assert_eq!(state.hostname.get(), "");
}
