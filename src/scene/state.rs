//! Backdrop scene state

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::curves::{Curve, default_curves};
use super::particle::{Particle, Viewport};
use crate::consts::*;
use crate::settings::TimeStep;

/// Normalized pointer position, each axis in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Default for Pointer {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

impl Pointer {
    pub fn new(x: f32, y: f32) -> Self {
        let unit = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self { x: unit(x), y: unit(y) }
    }
}

/// Everything the backdrop needs between frames
#[derive(Debug, Clone)]
pub struct CurveScene {
    /// Simulated seconds; never decreases
    pub time: f64,
    pub particles: Vec<Particle>,
    pub curves: Vec<Curve>,
    pointer: Pointer,
    viewport: Viewport,
    time_step: TimeStep,
    rng: Pcg32,
}

impl CurveScene {
    pub fn new(seed: u64, viewport: Viewport, particle_count: usize, time_step: TimeStep) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..particle_count)
            .map(|_| Particle::spawn(&mut rng, viewport))
            .collect();
        Self {
            time: 0.0,
            particles,
            curves: default_curves(),
            pointer: Pointer::default(),
            viewport,
            time_step,
            rng,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Replace the cached viewport; out-of-bounds particles respawn next step
    ///
    /// Coming from an empty viewport every particle sits at the origin, so the
    /// whole field is scattered over the new one instead.
    pub fn resize(&mut self, width: f32, height: f32) {
        let was_empty = self.viewport.is_empty();
        self.viewport = Viewport::new(width, height);
        if was_empty && !self.viewport.is_empty() {
            let viewport = self.viewport;
            for p in &mut self.particles {
                *p = Particle::spawn(&mut self.rng, viewport);
            }
        }
    }

    /// Record the latest pointer position (last writer wins)
    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Simulated seconds to advance for a frame that took `frame_dt` seconds
    pub fn step_size(&self, frame_dt: f32) -> f32 {
        match self.time_step {
            TimeStep::PerFrame => FRAME_DT,
            TimeStep::Elapsed if frame_dt.is_finite() => frame_dt.clamp(0.0, MAX_FRAME_DT),
            TimeStep::Elapsed => FRAME_DT,
        }
    }

    /// Advance the clock and the particle field by one frame
    pub fn step(&mut self, frame_dt: f32) {
        let dt = self.step_size(frame_dt);
        self.time += dt as f64;

        let steps = dt / FRAME_DT;
        let viewport = self.viewport;
        for p in &mut self.particles {
            p.advance(steps);
            if !viewport.contains(p.pos) {
                *p = Particle::spawn(&mut self.rng, viewport);
            }
        }
    }

    /// Crosshair guide intersection, pulled toward the pointer
    pub fn crosshair(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width * (0.3 + 0.4 * self.pointer.x),
            self.viewport.height * (0.3 + 0.4 * self.pointer.y),
        )
    }

    /// Sampled polyline for every curve at the current time
    pub fn curve_points(&self) -> Vec<Vec<Vec2>> {
        self.curves
            .iter()
            .map(|c| c.sample(self.time, self.pointer, self.viewport))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scene(step: TimeStep) -> CurveScene {
        CurveScene::new(42, Viewport::new(800.0, 600.0), 40, step)
    }

    #[test]
    fn test_per_frame_ignores_wall_time() {
        let mut s = scene(TimeStep::PerFrame);
        s.step(0.5);
        s.step(0.001);
        assert!((s.time - 2.0 * FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_caps_stalls() {
        let mut s = scene(TimeStep::Elapsed);
        s.step(0.02);
        s.step(5.0);
        s.step(-1.0);
        s.step(f32::NAN);
        assert!((s.time - (0.02 + MAX_FRAME_DT + FRAME_DT) as f64).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut a = scene(TimeStep::PerFrame);
        let mut b = scene(TimeStep::PerFrame);
        for _ in 0..600 {
            a.step(FRAME_DT);
            b.step(FRAME_DT);
        }
        let pa: Vec<Vec2> = a.particles.iter().map(|p| p.pos).collect();
        let pb: Vec<Vec2> = b.particles.iter().map(|p| p.pos).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_shrink_respawns_inside() {
        let mut s = scene(TimeStep::PerFrame);
        s.resize(50.0, 40.0);
        s.step(FRAME_DT);
        let vp = s.viewport();
        assert!(s.particles.iter().all(|p| vp.contains(p.pos)));
        assert_eq!(s.particles.len(), 40);
    }

    #[test]
    fn test_resize_from_empty_scatters_field() {
        let mut s = CurveScene::new(7, Viewport::default(), 45, TimeStep::PerFrame);
        assert!(s.particles.iter().all(|p| p.pos == Vec2::ZERO));

        s.resize(1280.0, 720.0);
        for _ in 0..60 {
            s.step(FRAME_DT);
        }
        let near_origin = s
            .particles
            .iter()
            .filter(|p| p.pos.length() < 25.0)
            .count();
        assert!(near_origin <= 2, "{} of 45 particles still clustered", near_origin);
    }

    #[test]
    fn test_resize_keeps_field_when_not_empty() {
        let mut s = scene(TimeStep::PerFrame);
        let before: Vec<Vec2> = s.particles.iter().map(|p| p.pos).collect();
        s.resize(1024.0, 768.0);
        let after: Vec<Vec2> = s.particles.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_clock_advances_after_long_uptime() {
        let mut s = scene(TimeStep::PerFrame);
        // ~146 h of frames
        s.time = 524_288.0;
        for _ in 0..600 {
            s.step(FRAME_DT);
        }
        assert!((s.time - (524_288.0 + 10.0)).abs() < 1e-3, "clock at {}", s.time);
    }

    #[test]
    fn test_crosshair_follows_pointer() {
        let mut s = scene(TimeStep::PerFrame);
        s.set_pointer(Pointer::new(0.0, 1.0));
        assert!(s.crosshair().abs_diff_eq(Vec2::new(240.0, 420.0), 1e-3));
        s.set_pointer(Pointer::new(7.0, f32::NAN));
        assert_eq!(s.pointer(), Pointer::new(1.0, 0.5));
    }

    #[test]
    fn test_curve_points() {
        let s = scene(TimeStep::PerFrame);
        let curves = s.curve_points();
        assert_eq!(curves.len(), 4);
        assert!(curves.iter().all(|c| c.len() == 401));
    }

    proptest! {
        #[test]
        fn prop_particles_contained(
            seed in any::<u64>(),
            frames in 1usize..400,
            w in 1.0f32..1920.0,
            h in 1.0f32..1080.0,
        ) {
            let mut s = CurveScene::new(seed, Viewport::new(w, h), 30, TimeStep::PerFrame);
            for _ in 0..frames {
                s.step(FRAME_DT);
                let vp = s.viewport();
                prop_assert!(s.particles.iter().all(|p| vp.contains(p.pos)));
            }
        }

        #[test]
        fn prop_time_monotonic(dts in proptest::collection::vec(-1.0f32..1.0, 1..50)) {
            let mut s = scene(TimeStep::Elapsed);
            let mut last = s.time;
            for dt in dts {
                s.step(dt);
                prop_assert!(s.time >= last);
                last = s.time;
            }
        }
    }
}
