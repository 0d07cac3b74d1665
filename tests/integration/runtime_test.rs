// Tests for the main loop lifecycle
// Uses millisecond tick periods so the loop can run for real

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

use hwdash::core::dashboard::{Dashboard, LoopPhase, LoopStats};
use hwdash::ui::Assets;

use super::common::{fast_config, MockSource, RecordingSink};

fn dashboard(source: &MockSource, sink: &RecordingSink) -> Dashboard {
    Dashboard::new(
        fast_config(),
        Box::new(source.clone()),
        Box::new(sink.clone()),
        Assets::plain(),
    )
}

#[test]
fn test_first_tick_runs_every_tier_and_pushes_frame() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);

    dashboard.tick().unwrap();

    let snapshot = dashboard.state().snapshot();
    assert_eq!(snapshot.cpu_percent, 42.0);
    assert_eq!(snapshot.memory_percent, 33.0);
    assert_eq!(snapshot.disk_percent, 61.0);
    assert_eq!(snapshot.ip_address, "192.168.1.5");
    let log = sink.log();
    assert_eq!(log.frames, 1);
    assert_eq!(log.last_frame.as_ref().map(|frame| frame.width()), Some(240));
}

#[test]
fn test_medium_tier_waits_for_tenth_tick() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);
    dashboard.tick().unwrap();

    source.script().memory_percent = 75.0;
    for _ in 1..10 {
        dashboard.tick().unwrap();
    }
    assert_eq!(dashboard.state().memory_percent.get(), 33.0);

    // tick 10
    dashboard.tick().unwrap();
    assert_eq!(dashboard.state().memory_percent.get(), 75.0);
}

#[test]
fn test_sink_failure_fails_tick_but_keeps_samples() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    sink.log().fail_show = true;
    let mut dashboard = dashboard(&source, &sink);

    assert!(dashboard.tick().is_err());
    assert_eq!(dashboard.state().cpu_percent.get(), 42.0);
    assert_eq!(sink.log().frames, 0);
}

#[test]
fn test_sampler_failure_does_not_fail_tick() {
    let source = MockSource::healthy();
    source.fail("cpu_percent");
    source.fail("disk_usage");
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);

    dashboard.tick().unwrap();

    assert_eq!(sink.log().frames, 1);
    assert_eq!(dashboard.state().cpu_percent.get(), 0.0);
}

#[tokio::test]
async fn test_init_prepares_display_and_state() {
    let source = MockSource::healthy();
    source.push_counters(0, 0);
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);

    dashboard.init(Box::new(source.clone())).await.unwrap();

    {
        let log = sink.log();
        assert_eq!(log.inits, 1);
        assert_eq!(log.clears, 1);
        assert_eq!(log.backlight, Some(100));
    }

    let snapshot = dashboard.state().snapshot();
    assert_eq!(snapshot.interface, "wlan0");
    assert_eq!(snapshot.hostname, "raspberrypi");
    assert_eq!(snapshot.swap_percent, 4.0);
    assert_eq!(dashboard.phase(), LoopPhase::Init);
}

#[tokio::test]
async fn test_init_without_address_monitors_first_candidate() {
    let source = MockSource::healthy();
    source.script().addresses.clear();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);

    dashboard.init(Box::new(source.clone())).await.unwrap();

    let snapshot = dashboard.state().snapshot();
    assert_eq!(snapshot.interface, "eth0");
    assert_eq!(snapshot.ip_address, "none");
}

#[tokio::test]
async fn test_display_init_failure_is_returned() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    sink.log().fail_init = true;
    let dashboard = dashboard(&source, &sink);
    let (_tx, rx) = broadcast::channel(1);

    let result = dashboard.run(Box::new(source.clone()), rx).await;

    assert!(result.is_err());
    assert_eq!(sink.log().frames, 0);
}

#[tokio::test]
async fn test_loop_ticks_until_interrupted() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);
    dashboard.init(Box::new(source.clone())).await.unwrap();

    let (tx, mut rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(80)).await;
        let _ = tx.send(());
    });

    let stats = dashboard.run_loop(&mut rx).await;

    assert!(stats.ticks >= 3);
    assert_eq!(stats.failed_ticks, 0);
    assert_eq!(sink.log().frames as u64, stats.ticks);
    assert_eq!(dashboard.phase(), LoopPhase::Stopped);
}

#[tokio::test]
async fn test_failed_ticks_back_off_and_continue() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);
    dashboard.init(Box::new(source.clone())).await.unwrap();
    sink.log().fail_show = true;

    let (tx, mut rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        let _ = tx.send(());
    });

    let stats = dashboard.run_loop(&mut rx).await;

    assert!(stats.failed_ticks >= 2);
    assert_eq!(stats.failed_ticks, stats.ticks);
}

#[tokio::test]
async fn test_interrupt_during_splash_stops_before_loop() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut config = fast_config();
    config.splash_duration = Duration::from_secs(30);
    let dashboard = Dashboard::new(
        config,
        Box::new(source.clone()),
        Box::new(sink.clone()),
        Assets::plain(),
    );

    let (tx, rx) = broadcast::channel(1);
    tx.send(()).unwrap();

    let stats = dashboard.run(Box::new(source.clone()), rx).await.unwrap();

    assert_eq!(stats, LoopStats::default());
    // only the splash frame was pushed
    assert_eq!(sink.log().frames, 1);
}

#[tokio::test]
async fn test_first_cpu_reading_waits_for_settle_interval() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut config = fast_config();
    config.cpu_settle = Duration::from_millis(40);
    let mut dashboard = Dashboard::new(
        config,
        Box::new(source.clone()),
        Box::new(sink.clone()),
        Assets::plain(),
    );

    let started = Instant::now();
    dashboard.init(Box::new(source.clone())).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(40));
    let captured = dashboard.state().cpu_percent.captured_at();
    assert!(captured.is_some());
    assert_eq!(dashboard.state().cpu_percent.get(), 42.0);
}

#[tokio::test]
async fn test_monitored_interface_stays_fixed_when_address_moves() {
    let source = MockSource::healthy();
    let sink = RecordingSink::default();
    let mut dashboard = dashboard(&source, &sink);
    dashboard.init(Box::new(source.clone())).await.unwrap();
    dashboard.tick().unwrap();

    // wired link comes up after startup
    source
        .script()
        .addresses
        .insert("eth0".to_string(), Some(Ipv4Addr::new(10, 0, 0, 7)));

    // ticks 1..=29 leave the slow tier alone
    for _ in 1..30 {
        dashboard.tick().unwrap();
    }
    assert_eq!(dashboard.state().ip_address.get(), "192.168.1.5");

    // tick 30
    dashboard.tick().unwrap();
    let snapshot = dashboard.state().snapshot();
    assert_eq!(snapshot.ip_address, "10.0.0.7");
    assert_eq!(snapshot.interface, "wlan0");
}
