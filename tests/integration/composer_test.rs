// Tests for frame composition against full snapshots

use embedded_graphics::pixelcolor::Rgb565;

use hwdash::core::{CpuScale, DashboardSnapshot};
use hwdash::ui::assets::blank_frame;
use hwdash::ui::colors::{TEXT_PRIMARY, TEXT_STALE};
use hwdash::ui::{AnimationState, Color, Frame, FrameComposer, ACCENT_PALETTE};

fn region_contains(frame: &Frame, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>, color: Color) -> bool {
    let wanted = Rgb565::from(color);
    ys.clone()
        .any(|y| xs.clone().any(|x| frame.pixel(x, y) == Some(wanted)))
}

#[test]
fn test_never_populated_state_still_renders() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::Total);
    let mut animation = AnimationState::default();

    for _ in 0..3 {
        let frame = composer.compose(&DashboardSnapshot::default(), &mut animation);
        assert_eq!((frame.width(), frame.height()), (240, 280));
    }
}

#[test]
fn test_cpu_value_uses_ramp_color() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::Total);

    let idle = composer.compose(&DashboardSnapshot::default(), &mut AnimationState::default());
    assert!(region_contains(&idle, 95..145, 125..155, Color::new(0, 255, 0)));

    let busy = DashboardSnapshot {
        cpu_percent: 100.0,
        ..Default::default()
    };
    let busy = composer.compose(&busy, &mut AnimationState::default());
    assert!(region_contains(&busy, 95..145, 125..155, Color::new(255, 0, 0)));
}

#[test]
fn test_per_core_scale_uses_wider_range() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::PerCoreSum);
    let snapshot = DashboardSnapshot {
        cpu_percent: 200.0,
        ..Default::default()
    };

    let frame = composer.compose(&snapshot, &mut AnimationState::default());

    assert!(region_contains(&frame, 95..145, 125..155, Color::new(255, 255, 0)));
}

#[test]
fn test_stale_network_values_are_muted() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::Total);
    let mut snapshot = DashboardSnapshot {
        interface: "eth0".to_string(),
        download_mbps: 12.3,
        upload_mbps: 1.2,
        estimator_alive: true,
        ..Default::default()
    };

    let live = composer.compose(&snapshot, &mut AnimationState::default());
    assert!(region_contains(&live, 0..78, 38..72, TEXT_PRIMARY));
    assert!(!region_contains(&live, 0..78, 38..72, TEXT_STALE));

    snapshot.estimator_alive = false;
    let stale = composer.compose(&snapshot, &mut AnimationState::default());
    assert!(region_contains(&stale, 0..78, 38..72, TEXT_STALE));
    assert!(!region_contains(&stale, 0..78, 38..72, TEXT_PRIMARY));
}

#[test]
fn test_accent_color_follows_animation() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::Total);
    let mut animation = AnimationState::default();

    let first = composer.compose(&DashboardSnapshot::default(), &mut animation);
    let second = composer.compose(&DashboardSnapshot::default(), &mut animation);

    assert!(region_contains(&first, 125..205, 168..184, ACCENT_PALETTE[0]));
    assert!(region_contains(&second, 125..205, 168..184, ACCENT_PALETTE[1]));
    assert_ne!(first, second);
}

#[test]
fn test_animation_wraps_after_palette() {
    let composer = FrameComposer::new(blank_frame(), CpuScale::Total);
    let mut animation = AnimationState::default();

    for _ in 0..ACCENT_PALETTE.len() {
        composer.compose(&DashboardSnapshot::default(), &mut animation);
    }

    assert_eq!(animation.index(), 0);
}
