// Host-side integration tests for pointer kinematics and the decaying trail.

use viz_core::constants::{FORCE_MAX, POINTER_STOP_MS, TRAIL_WINDOW_MS};
use viz_core::{PointerTracker, TrackerParams};

fn tracker() -> PointerTracker {
    PointerTracker::new(800.0, 600.0, TrackerParams::default())
}

/// Drive the 16 ms decay tick from `from` to `to` inclusive.
fn run_decay(t: &mut PointerTracker, from: f64, to: f64) {
    let mut now = from;
    while now <= to {
        t.decay_tick(now);
        now += 16.0;
    }
    t.decay_tick(to);
}

#[test]
fn first_sample_has_zero_velocity() {
    let mut t = tracker();
    t.on_pointer_move(100.0, 100.0, 1_000.0);
    assert_eq!(t.velocity().length(), 0.0);
    assert!(t.is_moving());
    assert_eq!(t.trail().len(), 1);
}

#[test]
fn velocity_is_pixels_per_millisecond() {
    let mut t = tracker();
    t.on_pointer_move(100.0, 100.0, 1_000.0);
    t.on_pointer_move(120.0, 90.0, 1_010.0);
    let v = t.velocity();
    assert!((v.x - 2.0).abs() < 1e-5);
    assert!((v.y + 1.0).abs() < 1e-5);
}

#[test]
fn same_timestamp_does_not_divide_by_zero() {
    let mut t = tracker();
    t.on_pointer_move(10.0, 10.0, 50.0);
    t.on_pointer_move(40.0, 10.0, 50.0);
    assert!(t.velocity().is_finite());
    assert_eq!(t.velocity().length(), 0.0);
}

#[test]
fn burst_then_idle_empties_trail_and_stops() {
    let mut t = tracker();
    let mut now = 0.0;
    for i in 0..30 {
        t.on_pointer_move(100.0 + i as f32 * 5.0, 200.0, now);
        t.decay_tick(now);
        now += 8.0;
    }
    assert!(t.is_moving());
    assert!(!t.trail().is_empty());

    let last = now - 8.0;
    run_decay(&mut t, now, last + TRAIL_WINDOW_MS);
    assert!(t.trail().is_empty());
    assert!(!t.is_moving());
    assert_eq!(t.velocity().length(), 0.0);
}

#[test]
fn trail_only_holds_recent_points() {
    let mut t = tracker();
    for i in 0..100 {
        t.on_pointer_move(i as f32, 0.0, i as f64 * 10.0);
    }
    let newest = 99.0 * 10.0;
    assert!(t
        .trail()
        .iter()
        .all(|p| newest - p.timestamp_ms < TRAIL_WINDOW_MS));
}

#[test]
fn trail_opacity_fades_with_age() {
    let mut t = tracker();
    t.on_pointer_move(0.0, 0.0, 0.0);
    t.decay_tick(TRAIL_WINDOW_MS / 2.0);
    let p = t.trail()[0];
    assert!((p.opacity - 0.5).abs() < 1e-4);
}

#[test]
fn stop_fires_once_after_delay_and_restarts_on_move() {
    let mut t = tracker();
    t.on_pointer_move(10.0, 10.0, 0.0);
    t.on_pointer_move(20.0, 10.0, 50.0);
    // The second move pushed the deadline out.
    assert!(!t.poll_stop(POINTER_STOP_MS));
    assert!(t.is_moving());
    assert!(t.poll_stop(50.0 + POINTER_STOP_MS));
    assert!(!t.is_moving());
    assert!(!t.poll_stop(1_000.0));
    assert_eq!(t.stop_deadline(), None);
}

#[test]
fn force_field_is_zero_at_pointer_and_points_toward_it() {
    let mut t = tracker();
    t.on_pointer_move(300.0, 200.0, 0.0);
    assert_eq!(t.force_field(300.0, 200.0, 0.5).length(), 0.0);

    let f = t.force_field(100.0, 200.0, 0.5);
    assert!(f.x > 0.0);
    assert!(f.y.abs() < 1e-6);

    // Very close points are capped.
    let near = t.force_field(299.999, 200.0, 0.5);
    assert!(near.length() <= FORCE_MAX + 1e-3);
}

#[test]
fn color_influence_follows_position_and_motion() {
    let mut t = tracker();
    t.on_pointer_move(400.0, 300.0, 0.0);
    let c = t.color_influence();
    assert!((c.hue - 270.0).abs() < 1e-3);
    assert!((c.saturation - 0.85).abs() < 1e-5);
    assert!((c.lightness - 0.55).abs() < 1e-5);
    assert!(c.is_active);
    assert!((0.0..=1.0).contains(&c.intensity));

    t.poll_stop(1_000.0);
    assert!(!t.color_influence().is_active);
}

#[test]
fn ripple_strength_falls_off_with_distance() {
    let mut t = tracker();
    t.on_pointer_move(0.0, 0.0, 0.0);
    let at = t.ripple_effect(0.0, 0.0, 1.0);
    let far = t.ripple_effect(800.0, 600.0, 1.0);
    assert!((at.strength - 1.0).abs() < 1e-6);
    assert!(far.strength.abs() < 1e-5);
    assert!((far.distance - 1.0).abs() < 1e-5);
}
