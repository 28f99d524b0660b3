//! Per-frame layer geometry for the canvas painter.
//!
//! Everything here is plain data computed from the viewport, the frame clock,
//! the bands and the palette; the web painter only translates it into canvas
//! calls.

use crate::bands::AudioBands;
use crate::constants::*;
use crate::palette::{Hsla, Palette};
use crate::pointer::PointerTracker;
use glam::Vec2;
use std::f32::consts::TAU;

/// Animation time base. Advances by a fixed step per tick so the look does not
/// depend on wall-clock jitter.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    time: f32,
}

impl FrameClock {
    pub fn advance(&mut self) -> f32 {
        self.time += FRAME_STEP;
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    SourceOver,
    Multiply,
    Screen,
}

impl Blend {
    pub fn composite_op(self) -> &'static str {
        match self {
            Blend::SourceOver => "source-over",
            Blend::Multiply => "multiply",
            Blend::Screen => "screen",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Hsla,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    Radial {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Full-surface gradient fill.
#[derive(Clone, Debug, PartialEq)]
pub struct Wash {
    pub blend: Blend,
    pub gradient: Gradient,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowingShape {
    /// Closed outline; the last point repeats the first.
    pub outline: Vec<Vec2>,
    pub fill: Gradient,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Hsla,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub center: Vec2,
    pub radius: f32,
    pub color: Hsla,
    pub line_width: f64,
}

pub fn fade_color() -> Hsla {
    Hsla::new(0.0, 0.0, 0.0, FADE_ALPHA)
}

/// Bass-driven multiply wash followed by a drifting mids-driven screen wash.
pub fn gradient_washes(
    viewport: Vec2,
    time: f32,
    bands: &AudioBands,
    palette: &Palette,
) -> [Wash; 2] {
    let (w, h) = (viewport.x, viewport.y);
    let (bass, mids) = (bands.bass, bands.mids);

    let linear = Wash {
        blend: Blend::Multiply,
        gradient: Gradient::Linear {
            from: Vec2::ZERO,
            to: viewport,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: palette.background.with_alpha(bass * 0.4 + 0.08),
                },
                ColorStop {
                    offset: 0.5,
                    color: palette.primary.with_alpha(bass * 0.24 + 0.04),
                },
                ColorStop {
                    offset: 1.0,
                    color: palette.secondary.with_alpha(bass * 0.32 + 0.06),
                },
            ],
        },
    };

    let radial = Wash {
        blend: Blend::Screen,
        gradient: Gradient::Radial {
            inner: Vec2::new(
                w * (0.3 + (time * 0.001).sin() * 0.2),
                h * (0.3 + (time * 0.0015).cos() * 0.2),
            ),
            inner_radius: 0.0,
            outer: viewport * 0.5,
            outer_radius: w.max(h) * RADIAL_WASH_SPAN,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: palette.accent.with_alpha(mids * 0.16 + 0.04),
                },
                ColorStop {
                    offset: 1.0,
                    color: Hsla::TRANSPARENT,
                },
            ],
        },
    };

    [linear, radial]
}

/// Radius of the organic polygon at angle `angle`.
#[inline]
pub fn shape_radius(angle: f32, time: f32, bands: &AudioBands) -> f32 {
    let base = SHAPE_BASE_RADIUS + bands.bass * SHAPE_BASS_RADIUS;
    base + (time * 0.003 + angle * 3.0).sin() * (50.0 + bands.mids * 100.0)
        + (time * 0.005 + angle * 2.0).cos() * (30.0 + bands.treble * 80.0)
}

pub fn flowing_shape(
    viewport: Vec2,
    time: f32,
    bands: &AudioBands,
    palette: &Palette,
) -> FlowingShape {
    let center = viewport * 0.5;
    let outline = (0..=SHAPE_VERTICES)
        .map(|i| {
            let angle = i as f32 / SHAPE_VERTICES as f32 * TAU;
            let r = shape_radius(angle, time, bands);
            center + Vec2::new(angle.cos(), angle.sin()) * r
        })
        .collect();

    FlowingShape {
        outline,
        fill: Gradient::Radial {
            inner: center,
            inner_radius: 0.0,
            outer: center,
            outer_radius: viewport.x.max(viewport.y) * SHAPE_GRADIENT_SPAN,
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: palette.primary.with_alpha(0.5),
                },
                ColorStop {
                    offset: 0.5,
                    color: palette.secondary.with_alpha(0.25),
                },
                ColorStop {
                    offset: 1.0,
                    color: Hsla::TRANSPARENT,
                },
            ],
        },
    }
}

/// Trail points as dots, oldest largest, tinted with the accent color.
pub fn trail_dots(pointer: &PointerTracker, palette: &Palette) -> Vec<Dot> {
    let trail = pointer.trail();
    let len = trail.len() as f32;
    trail
        .iter()
        .enumerate()
        .map(|(i, p)| Dot {
            center: Vec2::new(p.x, p.y),
            radius: (1.0 - i as f32 / len) * TRAIL_DOT_MAX_SIZE,
            color: palette.accent.with_alpha(p.opacity * TRAIL_ALPHA),
        })
        .collect()
}

/// Ring around the pointer while it is moving; grows with speed.
pub fn ripple_ring(pointer: &PointerTracker, palette: &Palette) -> Option<Ring> {
    if !pointer.is_moving() {
        return None;
    }
    Some(Ring {
        center: pointer.position(),
        radius: pointer.velocity().length() * RIPPLE_VELOCITY_RADIUS + RIPPLE_BASE_RADIUS,
        color: palette.accent.with_alpha(RIPPLE_ALPHA),
        line_width: RIPPLE_LINE_WIDTH,
    })
}
