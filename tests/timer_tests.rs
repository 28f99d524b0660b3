// Host-side integration tests for single-slot deferred timers.

use viz_core::DeferredSlot;

#[test]
fn rearming_replaces_the_pending_deadline() {
    let mut slot = DeferredSlot::new();
    slot.arm(0.0, 100.0);
    slot.arm(50.0, 100.0);
    assert_eq!(slot.deadline(), Some(150.0));
    assert!(!slot.fire_if_due(100.0));
    assert!(slot.fire_if_due(150.0));
    assert!(!slot.is_armed());
}

#[test]
fn fires_at_most_once_per_arming() {
    let mut slot = DeferredSlot::new();
    slot.arm(10.0, 5.0);
    let fired = (0..100)
        .filter(|&t| slot.fire_if_due(t as f64))
        .count();
    assert_eq!(fired, 1);
}

#[test]
fn cancel_and_remaining() {
    let mut slot = DeferredSlot::default();
    assert_eq!(slot.remaining(0.0), None);
    slot.arm(0.0, 40.0);
    assert_eq!(slot.remaining(10.0), Some(30.0));
    assert_eq!(slot.remaining(90.0), Some(0.0));
    slot.cancel();
    assert!(!slot.fire_if_due(1_000.0));
}

#[test]
fn negative_delay_is_due_immediately() {
    let mut slot = DeferredSlot::new();
    slot.arm(20.0, -5.0);
    assert!(slot.fire_if_due(20.0));
}
