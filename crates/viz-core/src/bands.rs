use crate::constants::{
    ANALYSER_SMOOTHING, BASS_BINS, FFT_SIZE, MAGNITUDE_MAX, MIDS_BINS, TREBLE_BINS,
};
use std::ops::Range;

/// Analyser node configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyserParams {
    pub fft_size: u32,
    pub smoothing: f64,
}

impl Default for AnalyserParams {
    fn default() -> Self {
        Self {
            fft_size: FFT_SIZE,
            smoothing: ANALYSER_SMOOTHING,
        }
    }
}

impl AnalyserParams {
    /// Magnitude bins per snapshot.
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

/// Banded energy extracted from one analyser snapshot.
///
/// `bass`, `mids`, `treble` and `volume` are normalized to \[0, 1\].
/// `frequency_data` keeps the raw byte magnitudes the bands were computed from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioBands {
    pub bass: f32,
    pub mids: f32,
    pub treble: f32,
    pub volume: f32,
    pub frequency_data: Vec<u8>,
}

impl AudioBands {
    /// Silence with a zeroed magnitude buffer of `bins` entries.
    pub fn silent(bins: usize) -> Self {
        Self {
            frequency_data: vec![0; bins],
            ..Self::default()
        }
    }

    pub fn from_magnitudes(magnitudes: &[u8]) -> Self {
        let mut bands = Self::silent(magnitudes.len());
        bands.update_from(magnitudes);
        bands
    }

    /// Recompute in place, reusing the magnitude buffer between ticks.
    pub fn update_from(&mut self, magnitudes: &[u8]) {
        self.bass = band_level(magnitudes, BASS_BINS);
        self.mids = band_level(magnitudes, MIDS_BINS);
        self.treble = band_level(magnitudes, TREBLE_BINS);
        self.volume = band_level(magnitudes, 0..magnitudes.len());
        self.frequency_data.clear();
        self.frequency_data.extend_from_slice(magnitudes);
    }
}

/// Mean magnitude over `range` (clipped to the buffer), scaled into \[0, 1\].
/// An empty intersection reads as silence.
pub fn band_level(magnitudes: &[u8], range: Range<usize>) -> f32 {
    let end = range.end.min(magnitudes.len());
    let start = range.start.min(end);
    let bins = &magnitudes[start..end];
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&m| m as u32).sum();
    let mean = sum as f32 / bins.len() as f32;
    (mean / MAGNITUDE_MAX).clamp(0.0, 1.0)
}
