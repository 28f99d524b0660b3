// Host-side integration tests for colors, layer geometry and the silent
// placeholder source.

use glam::Vec2;
use viz_core::constants::{SHAPE_VERTICES, SILENT_PLACEHOLDER_RATE, SILENT_PLACEHOLDER_SECS};
use viz_core::scene::{self, Blend, FrameClock, Gradient};
use viz_core::wav::silent_wav;
use viz_core::{AudioBands, Hsla, Palette, PointerTracker, TrackerParams};

fn close(a: [f32; 4], b: [f32; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[test]
fn hsl_primaries_convert_to_rgb() {
    assert!(close(Hsla::new(0.0, 1.0, 0.5, 1.0).to_rgba(), [1.0, 0.0, 0.0, 1.0]));
    assert!(close(Hsla::new(120.0, 1.0, 0.5, 1.0).to_rgba(), [0.0, 1.0, 0.0, 1.0]));
    assert!(close(Hsla::new(240.0, 1.0, 0.5, 0.5).to_rgba(), [0.0, 0.0, 1.0, 0.5]));
    assert!(close(Hsla::new(0.0, 0.0, 1.0, 1.0).to_rgba(), [1.0, 1.0, 1.0, 1.0]));
}

#[test]
fn hsla_wraps_hue_and_clamps_channels() {
    let c = Hsla::new(-30.0, 1.5, -0.2, 2.0);
    assert!((c.h - 330.0).abs() < 1e-4);
    assert_eq!((c.s, c.l, c.a), (1.0, 0.0, 1.0));
    assert_eq!(Hsla::new(360.0, 0.5, 0.5, 1.0).h, 0.0);
}

#[test]
fn css_text_is_rgba_with_alpha() {
    let red = Hsla::new(0.0, 1.0, 0.5, 1.0).with_alpha(0.3).css();
    assert_eq!(red, "rgba(255, 0, 0, 0.300)");
    assert_eq!(Hsla::new(0.0, 0.0, 1.0, 1.0).css(), "rgba(255, 255, 255, 1.000)");
    assert_eq!(Hsla::TRANSPARENT.css(), "rgba(0, 0, 0, 0.000)");
}

#[test]
fn palette_is_opaque_and_in_range_for_any_bands() {
    let pointer = PointerTracker::new(800.0, 600.0, TrackerParams::default());
    for level in [0u8, 64, 128, 255] {
        let bands = AudioBands::from_magnitudes(&[level; 256]);
        for time in [0.0, 16.0, 10_000.0, 1.0e6] {
            let pal = Palette::compute(time, &bands, &pointer.color_influence());
            for c in [pal.primary, pal.secondary, pal.accent, pal.background] {
                assert!((0.0..360.0).contains(&c.h));
                assert!((0.0..=1.0).contains(&c.s) && (0.0..=1.0).contains(&c.l));
                assert_eq!(c.a, 1.0);
            }
        }
    }
}

#[test]
fn frame_clock_steps_by_sixteen() {
    let mut clock = FrameClock::default();
    assert_eq!(clock.advance(), 16.0);
    assert_eq!(clock.advance(), 32.0);
    assert_eq!(clock.time(), 32.0);
}

#[test]
fn flowing_shape_outline_is_closed() {
    let bands = AudioBands::from_magnitudes(&[90u8; 256]);
    let pointer = PointerTracker::default();
    let pal = Palette::compute(160.0, &bands, &pointer.color_influence());
    let viewport = Vec2::new(1024.0, 768.0);
    let shape = scene::flowing_shape(viewport, 160.0, &bands, &pal);

    assert_eq!(shape.outline.len(), SHAPE_VERTICES + 1);
    let (first, last) = (shape.outline[0], shape.outline[SHAPE_VERTICES]);
    assert!(first.distance(last) < 1e-2);
    match shape.fill {
        Gradient::Radial {
            inner, outer_radius, ..
        } => {
            assert_eq!(inner, viewport * 0.5);
            assert!((outer_radius - 1024.0 * 0.6).abs() < 1e-3);
        }
        Gradient::Linear { .. } => panic!("shape fill should be radial"),
    }
}

#[test]
fn washes_multiply_then_screen() {
    let bands = AudioBands::silent(256);
    let pal = Palette::compute(0.0, &bands, &PointerTracker::default().color_influence());
    let washes = scene::gradient_washes(Vec2::new(400.0, 300.0), 0.0, &bands, &pal);
    assert_eq!(washes[0].blend, Blend::Multiply);
    assert_eq!(washes[1].blend, Blend::Screen);
    assert_eq!(Blend::Screen.composite_op(), "screen");
}

#[test]
fn ripple_only_while_moving_and_trail_dots_shrink() {
    let mut pointer = PointerTracker::new(800.0, 600.0, TrackerParams::default());
    let pal = Palette::compute(0.0, &AudioBands::silent(256), &pointer.color_influence());
    assert!(scene::ripple_ring(&pointer, &pal).is_none());

    for i in 0..5 {
        pointer.on_pointer_move(100.0 + i as f32 * 10.0, 100.0, i as f64 * 10.0);
    }
    let ring = scene::ripple_ring(&pointer, &pal).expect("moving pointer draws a ripple");
    assert!(ring.radius > 20.0);

    let dots = scene::trail_dots(&pointer, &pal);
    assert_eq!(dots.len(), 5);
    assert!(dots.windows(2).all(|w| w[0].radius > w[1].radius));
}

#[test]
fn silent_wav_header_is_well_formed() {
    let wav = silent_wav(SILENT_PLACEHOLDER_SECS, SILENT_PLACEHOLDER_RATE);
    let samples = (SILENT_PLACEHOLDER_SECS * SILENT_PLACEHOLDER_RATE as f32) as usize;
    assert_eq!(wav.len(), 44 + samples);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(&wav[36..40], b"data");

    let u32_at = |i: usize| u32::from_le_bytes([wav[i], wav[i + 1], wav[i + 2], wav[i + 3]]);
    let u16_at = |i: usize| u16::from_le_bytes([wav[i], wav[i + 1]]);
    assert_eq!(u32_at(4) as usize, wav.len() - 8);
    assert_eq!(u16_at(20), 1);
    assert_eq!(u16_at(22), 1);
    assert_eq!(u32_at(24), SILENT_PLACEHOLDER_RATE);
    assert_eq!(u16_at(34), 8);
    assert_eq!(u32_at(40) as usize, samples);
    assert!(wav[44..].iter().all(|&b| b == 0x80));
}
