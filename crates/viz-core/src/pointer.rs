//! Pointer kinematics: position, velocity, fading trail and the influence
//! queries the render loop reads each frame.
//!
//! All timestamps are milliseconds on a monotonic clock supplied by the caller.

use crate::constants::*;
use crate::timer::DeferredSlot;
use glam::Vec2;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub timestamp_ms: f64,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct TrackerParams {
    pub trail_window_ms: f64,
    pub stop_delay_ms: f64,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            trail_window_ms: TRAIL_WINDOW_MS,
            stop_delay_ms: POINTER_STOP_MS,
        }
    }
}

/// Hue in degrees, saturation/lightness/intensity in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorInfluence {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub intensity: f32,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub strength: f32,
    pub distance: f32,
    pub velocity_influence: f32,
}

pub struct PointerTracker {
    pub params: TrackerParams,
    position: Vec2,
    normalized: Vec2,
    velocity: Vec2,
    is_moving: bool,
    trail: VecDeque<TrailPoint>,
    last_sample_ms: Option<f64>,
    viewport: Vec2,
    stop_timer: DeferredSlot,
}

impl PointerTracker {
    pub fn new(width: f32, height: f32, params: TrackerParams) -> Self {
        Self {
            params,
            position: Vec2::ZERO,
            normalized: Vec2::splat(0.5),
            velocity: Vec2::ZERO,
            is_moving: false,
            trail: VecDeque::new(),
            last_sample_ms: None,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
            stop_timer: DeferredSlot::new(),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn normalized_position(&self) -> Vec2 {
        self.normalized
    }

    /// Pixels per millisecond.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn trail(&self) -> &VecDeque<TrailPoint> {
        &self.trail
    }

    /// When the pending "pointer stopped" check is due, if any.
    pub fn stop_deadline(&self) -> Option<f64> {
        self.stop_timer.deadline()
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, now_ms: f64) {
        let pos = Vec2::new(x, y);
        self.velocity = match self.last_sample_ms {
            Some(last) if now_ms > last => (pos - self.position) / (now_ms - last) as f32,
            _ => Vec2::ZERO,
        };
        self.position = pos;
        self.normalized = pos / self.viewport;

        self.trail.push_back(TrailPoint {
            x,
            y,
            timestamp_ms: now_ms,
            opacity: 1.0,
        });
        let window = self.params.trail_window_ms;
        self.trail.retain(|p| now_ms - p.timestamp_ms < window);

        self.is_moving = true;
        self.stop_timer.arm(now_ms, self.params.stop_delay_ms);
        self.last_sample_ms = Some(now_ms);
    }

    /// Periodic fade of the trail. Runs whether or not the pointer is moving,
    /// and settles the stop timer so both effects line up.
    pub fn decay_tick(&mut self, now_ms: f64) {
        let window = self.params.trail_window_ms;
        for p in self.trail.iter_mut() {
            let age = (now_ms - p.timestamp_ms) / window;
            p.opacity = (1.0 - age as f32).max(0.0);
        }
        self.trail.retain(|p| p.opacity > 0.0);
        self.poll_stop(now_ms);
    }

    /// Returns true if the pointer transitioned to stopped on this call.
    pub fn poll_stop(&mut self, now_ms: f64) -> bool {
        if self.stop_timer.fire_if_due(now_ms) {
            self.is_moving = false;
            self.velocity = Vec2::ZERO;
            return true;
        }
        false
    }

    pub fn cancel_timers(&mut self) {
        self.stop_timer.cancel();
    }

    /// Attraction toward the last pointer position. A point sitting exactly on
    /// the pointer feels no force.
    pub fn force_field(&self, px: f32, py: f32, strength: f32) -> Vec2 {
        let delta = self.position - Vec2::new(px, py);
        let distance = delta.length();
        if distance == 0.0 {
            return Vec2::ZERO;
        }
        let magnitude = (strength / (distance * FORCE_DISTANCE_SCALE)).min(FORCE_MAX);
        delta / distance * magnitude
    }

    pub fn color_influence(&self) -> ColorInfluence {
        let n = self.normalized;
        let speed = self.velocity.length();
        ColorInfluence {
            hue: (n.x * 360.0 + n.y * 180.0).rem_euclid(360.0),
            saturation: 0.7 + n.y * 0.3,
            lightness: 0.4 + n.x * 0.3,
            intensity: (speed * INTENSITY_VELOCITY_GAIN + INTENSITY_FLOOR).min(1.0),
            is_active: self.is_moving,
        }
    }

    pub fn ripple_effect(&self, cx: f32, cy: f32, intensity: f32) -> Ripple {
        let distance = self.position.distance(Vec2::new(cx, cy)) / self.viewport.length();
        let falloff = (1.0 - distance).clamp(0.0, 1.0);
        Ripple {
            strength: falloff * intensity,
            distance,
            velocity_influence: (self.velocity.length() * RIPPLE_VELOCITY_GAIN).min(1.0),
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(1.0, 1.0, TrackerParams::default())
    }
}
