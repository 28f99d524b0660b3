//! Structured colors and the per-frame palette.

use crate::bands::AudioBands;
use crate::pointer::ColorInfluence;

/// Hue in degrees \[0, 360), saturation/lightness/alpha in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    pub fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub const TRANSPARENT: Hsla = Hsla {
        h: 0.0,
        s: 0.0,
        l: 0.0,
        a: 0.0,
    };

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear RGBA in \[0, 1\].
    pub fn to_rgba(self) -> [f32; 4] {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let hp = self.h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.l - c / 2.0;
        [r + m, g + m, b + m, self.a]
    }

    /// CSS `rgba()` text for canvas style setters.
    pub fn css(self) -> String {
        let [r, g, b, a] = self.to_rgba();
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("rgba({}, {}, {}, {:.3})", byte(r), byte(g), byte(b), a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Hsla,
    pub secondary: Hsla,
    pub accent: Hsla,
    pub background: Hsla,
}

impl Palette {
    /// Palette for frame time `time` (nominal clock units), current bands and
    /// pointer influence. Every color is opaque; layers set their own alpha.
    pub fn compute(time: f32, bands: &AudioBands, influence: &ColorInfluence) -> Self {
        let (bass, mids, treble) = (bands.bass, bands.mids, bands.treble);
        let base = (time * 0.02 + influence.hue * 0.3).rem_euclid(360.0);
        Self {
            primary: Hsla::new(
                base + bass * 60.0,
                0.70 + mids * 0.30,
                0.40 + treble * 0.20,
                1.0,
            ),
            secondary: Hsla::new(
                base + 120.0 + mids * 40.0,
                0.60 + bass * 0.40,
                0.35 + mids * 0.25,
                1.0,
            ),
            accent: Hsla::new(
                base + 240.0 + treble * 80.0,
                0.80 + treble * 0.20,
                0.50 + bass * 0.30,
                1.0,
            ),
            background: Hsla::new(base, 0.20 + bass * 0.30, 0.05 + mids * 0.10, 1.0),
        }
    }
}
