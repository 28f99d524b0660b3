// Shared tuning constants for the analyser, pointer tracker, particles and scene.

// Analysis
pub const FFT_SIZE: u32 = 512; // analysis window; bin count is half of this
pub const ANALYSER_SMOOTHING: f64 = 0.8;
pub const MAGNITUDE_MAX: f32 = 255.0;
pub const BASS_BINS: std::ops::Range<usize> = 0..60;
pub const MIDS_BINS: std::ops::Range<usize> = 60..170;
pub const TREBLE_BINS: std::ops::Range<usize> = 170..256;

// Playback
pub const AUTO_ADVANCE_MS: f64 = 30_000.0;
pub const SILENT_PLACEHOLDER_SECS: f32 = 2.0;
pub const SILENT_PLACEHOLDER_RATE: u32 = 8_000;

// Pointer
pub const TRAIL_WINDOW_MS: f64 = 500.0;
pub const POINTER_STOP_MS: f64 = 100.0;
pub const TRAIL_DECAY_INTERVAL_MS: i32 = 16;
pub const FORCE_DISTANCE_SCALE: f32 = 0.01;
pub const FORCE_MAX: f32 = 50.0;
pub const INTENSITY_VELOCITY_GAIN: f32 = 10.0;
pub const INTENSITY_FLOOR: f32 = 0.3;
pub const RIPPLE_VELOCITY_GAIN: f32 = 0.1;

// Render clock
pub const FRAME_STEP: f32 = 16.0; // nominal time units per tick, independent of wall clock

// Particles
pub const PARTICLE_COUNT: usize = 150;
pub const PARTICLE_MAX_LIFE: f32 = 200.0;
pub const PARTICLE_FORCE_STRENGTH: f32 = 0.5;
pub const PARTICLE_FORCE_GAIN: f32 = 0.01;
pub const ATTRACTION_ACTIVE: f32 = 1.0;
pub const ATTRACTION_IDLE: f32 = 0.3;
pub const PARTICLE_AUDIO_PUSH: f32 = 2.0;
pub const PARTICLE_DAMPING: f32 = 0.995;
pub const PARTICLE_MIN_SIZE: f32 = 0.5;
pub const PARTICLE_SIZE_RATE: f32 = 0.1;
pub const PARTICLE_HUE_RATE: f32 = 2.0;
pub const PARTICLE_SATURATION: f32 = 0.7;
pub const PARTICLE_LIGHTNESS: f32 = 0.6;

// Scene
pub const FADE_ALPHA: f32 = 0.05;
pub const SHAPE_VERTICES: usize = 12;
pub const SHAPE_BASE_RADIUS: f32 = 200.0;
pub const SHAPE_BASS_RADIUS: f32 = 300.0;
pub const SHAPE_GRADIENT_SPAN: f32 = 0.6; // fraction of max(w, h)
pub const RADIAL_WASH_SPAN: f32 = 0.8;
pub const TRAIL_DOT_MAX_SIZE: f32 = 8.0;
pub const TRAIL_ALPHA: f32 = 0.3;
pub const RIPPLE_ALPHA: f32 = 0.38;
pub const RIPPLE_BASE_RADIUS: f32 = 20.0;
pub const RIPPLE_VELOCITY_RADIUS: f32 = 50.0;
pub const RIPPLE_LINE_WIDTH: f64 = 2.0;

// Controls shell
pub const CONTROLS_HIDE_MS: i32 = 3_000;
