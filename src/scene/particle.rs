//! Ambient particles drifting across the backdrop

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Cached drawing surface size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Inclusive bounds test
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Zero width or height; nothing spawned here is meaningfully placed
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A single floating particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per nominal frame
    pub vel: Vec2,
    pub radius: f32,
    /// Peak opacity; the drawn value oscillates below it
    pub base_opacity: f32,
    /// Twinkle phase accumulator (radians)
    pub phase: f32,
}

impl Particle {
    /// Fresh particle at a random spot inside the viewport
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        // Scaling a unit sample keeps zero-sized viewports valid
        let pos = Vec2::new(
            rng.random::<f32>() * viewport.width,
            rng.random::<f32>() * viewport.height,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() * 2.0 - 1.0) * PARTICLE_MAX_SPEED,
            (rng.random::<f32>() * 2.0 - 1.0) * PARTICLE_MAX_SPEED,
        );
        Self {
            pos,
            vel,
            radius: PARTICLE_MIN_RADIUS
                + rng.random::<f32>() * (PARTICLE_MAX_RADIUS - PARTICLE_MIN_RADIUS),
            base_opacity: 0.15 + rng.random::<f32>() * 0.45,
            phase: rng.random::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Move by `steps` nominal frames
    pub fn advance(&mut self, steps: f32) {
        self.pos += self.vel * steps;
        self.phase = (self.phase + PARTICLE_TWINKLE_RATE * steps) % std::f32::consts::TAU;
    }

    /// Current drawn opacity, in `[0, base_opacity]`
    pub fn opacity(&self) -> f32 {
        self.base_opacity * (0.5 + 0.5 * self.phase.sin())
    }
}
