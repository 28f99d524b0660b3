// Host-side integration tests for the particle field.

use viz_core::{AudioBands, FieldParams, Particle, ParticleField, PointerTracker, TrackerParams};

fn quiet() -> AudioBands {
    AudioBands::silent(256)
}

fn idle_pointer(w: f32, h: f32) -> PointerTracker {
    PointerTracker::new(w, h, TrackerParams::default())
}

#[test]
fn initial_particles_are_within_bounds_and_ranges() {
    let field = ParticleField::with_seed(640.0, 480.0, FieldParams::default(), 7);
    assert_eq!(field.len(), 150);
    for p in field.particles() {
        assert!((0.0..640.0).contains(&p.x) && (0.0..480.0).contains(&p.y));
        assert!((-1.0..1.0).contains(&p.vx) && (-1.0..1.0).contains(&p.vy));
        assert!((1.0..4.0).contains(&p.size));
        assert!(p.life >= p.max_life * 0.5 && p.life < p.max_life);
        assert!((0.0..360.0).contains(&p.hue));
        assert!((0.3..0.8).contains(&p.opacity));
    }
}

#[test]
fn same_seed_gives_same_field() {
    let a = ParticleField::with_seed(300.0, 200.0, FieldParams::default(), 42);
    let b = ParticleField::with_seed(300.0, 200.0, FieldParams::default(), 42);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn expired_particle_respawns_in_bounds_with_full_life() {
    let (w, h) = (500.0, 400.0);
    let mut field = ParticleField::with_seed(w, h, FieldParams::default(), 3);
    field.particles_mut()[0].life = 1.0;
    field.update(16.0, &quiet(), &idle_pointer(w, h));
    let p = field.particles()[0];
    assert_eq!(p.life, p.max_life);
    assert!((0.0..w).contains(&p.x) && (0.0..h).contains(&p.y));
    assert!((0.0..360.0).contains(&p.hue));
}

#[test]
fn leaving_an_edge_reenters_at_the_opposite_one() {
    let (w, h) = (200.0, 100.0);
    let mut field = ParticleField::with_seed(w, h, FieldParams::default(), 9);
    {
        let ps = field.particles_mut();
        ps[0] = Particle {
            x: 0.5,
            y: 50.0,
            vx: -5.0,
            vy: 0.0,
            size: 2.0,
            life: 100.0,
            max_life: 200.0,
            hue: 10.0,
            opacity: 0.5,
        };
        ps[1] = Particle {
            x: 199.5,
            y: 99.5,
            vx: 5.0,
            vy: 5.0,
            ..ps[0]
        };
    }
    field.update(0.0, &quiet(), &idle_pointer(w, h));
    let ps = field.particles();
    assert_eq!(ps[0].x, w);
    assert_eq!(ps[1].x, 0.0);
    assert_eq!(ps[1].y, 0.0);
}

#[test]
fn positions_stay_in_bounds_over_many_frames() {
    let (w, h) = (320.0, 240.0);
    let mut field = ParticleField::with_seed(w, h, FieldParams::default(), 11);
    let mut pointer = idle_pointer(w, h);
    let loud = AudioBands::from_magnitudes(&[220u8; 256]);
    let mut time = 0.0;
    for frame in 0..600 {
        pointer.on_pointer_move(
            (frame as f32 * 3.0) % w,
            (frame as f32 * 2.0) % h,
            frame as f64 * 16.0,
        );
        time += 16.0;
        field.update(time, &loud, &pointer);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= w, "x {} at frame {frame}", p.x);
            assert!(p.y >= 0.0 && p.y <= h, "y {} at frame {frame}", p.y);
            assert!(p.size >= 0.5);
            assert!((0.0..360.0).contains(&p.hue));
        }
    }
}

#[test]
fn reinitialize_regenerates_for_new_bounds() {
    let mut field = ParticleField::with_seed(100.0, 100.0, FieldParams::default(), 5);
    field.reinitialize(50.0, 20.0);
    assert_eq!(field.len(), 150);
    assert_eq!(field.bounds(), glam::Vec2::new(50.0, 20.0));
    assert!(field
        .particles()
        .iter()
        .all(|p| p.x < 50.0 && p.y < 20.0));
}

#[test]
fn alpha_scales_with_volume_and_life() {
    let p = Particle {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        size: 1.0,
        life: 100.0,
        max_life: 200.0,
        hue: 0.0,
        opacity: 0.8,
    };
    assert!((p.alpha(0.0) - 0.5 * 0.8 * 0.3).abs() < 1e-6);
    assert!((p.alpha(1.0) - 0.5 * 0.8).abs() < 1e-6);
}
