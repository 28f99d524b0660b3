use crate::bands::AudioBands;
use crate::constants::*;
use crate::pointer::PointerTracker;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub hue: f32,
    pub opacity: f32,
}

impl Particle {
    /// Draw alpha: remaining-life fraction × base opacity × volume factor.
    #[inline]
    pub fn alpha(&self, volume: f32) -> f32 {
        let life_frac = (self.life / self.max_life).clamp(0.0, 1.0);
        (life_frac * self.opacity * (0.3 + volume * 0.7)).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldParams {
    pub count: usize,
    pub max_life: f32,
    pub damping: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            max_life: PARTICLE_MAX_LIFE,
            damping: PARTICLE_DAMPING,
        }
    }
}

/// Fixed-size particle ensemble. Particles respawn in place, the backing
/// vector is only rebuilt by `reinitialize`.
pub struct ParticleField {
    pub params: FieldParams,
    particles: Vec<Particle>,
    bounds: Vec2,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, params: FieldParams, rng: StdRng) -> Self {
        let mut field = Self {
            params,
            particles: Vec::with_capacity(params.count),
            bounds: Vec2::ZERO,
            rng,
        };
        field.reinitialize(width, height);
        field
    }

    pub fn with_seed(width: f32, height: f32, params: FieldParams, seed: u64) -> Self {
        Self::new(width, height, params, StdRng::seed_from_u64(seed))
    }

    /// Resize to a new viewport and regenerate every particle.
    pub fn reinitialize(&mut self, width: f32, height: f32) {
        self.bounds = Vec2::new(width.max(1.0), height.max(1.0));
        let (w, h) = (self.bounds.x, self.bounds.y);
        let max_life = self.params.max_life;
        let rng = &mut self.rng;
        self.particles.clear();
        self.particles.extend((0..self.params.count).map(|_| Particle {
            x: rng.gen_range(0.0..w),
            y: rng.gen_range(0.0..h),
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(-1.0..1.0),
            size: rng.gen_range(1.0..4.0),
            life: rng.gen_range(max_life * 0.5..max_life),
            max_life,
            hue: rng.gen_range(0.0..360.0),
            opacity: rng.gen_range(0.3..0.8),
        }));
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// One physics step at frame time `time`.
    pub fn update(&mut self, time: f32, bands: &AudioBands, pointer: &PointerTracker) {
        let attraction = if pointer.is_moving() {
            ATTRACTION_ACTIVE
        } else {
            ATTRACTION_IDLE
        };
        let (w, h) = (self.bounds.x, self.bounds.y);
        let damping = self.params.damping;

        for (i, p) in self.particles.iter_mut().enumerate() {
            let force = pointer.force_field(p.x, p.y, PARTICLE_FORCE_STRENGTH);
            p.vx += force.x * PARTICLE_FORCE_GAIN * attraction;
            p.vy += force.y * PARTICLE_FORCE_GAIN * attraction;

            let phase = i as f32;
            p.vx += (time * 0.001 + phase).sin() * bands.bass * PARTICLE_AUDIO_PUSH;
            p.vy += (time * 0.0015 + phase).cos() * bands.mids * PARTICLE_AUDIO_PUSH;

            p.x += p.vx;
            p.y += p.vy;
            p.vx *= damping;
            p.vy *= damping;

            wrap(&mut p.x, w);
            wrap(&mut p.y, h);

            p.hue = (p.hue + bands.treble * PARTICLE_HUE_RATE).rem_euclid(360.0);
            p.size = (p.size + (bands.volume - 0.5) * PARTICLE_SIZE_RATE).max(PARTICLE_MIN_SIZE);
            p.life -= 1.0;

            if p.life <= 0.0 {
                p.x = self.rng.gen_range(0.0..w);
                p.y = self.rng.gen_range(0.0..h);
                p.life = p.max_life;
                p.hue = self.rng.gen_range(0.0..360.0);
            }
        }
    }
}

// Toroidal: leaving one edge re-enters at the opposite one.
#[inline]
fn wrap(v: &mut f32, extent: f32) {
    if *v < 0.0 {
        *v = extent;
    } else if *v > extent {
        *v = 0.0;
    }
}
