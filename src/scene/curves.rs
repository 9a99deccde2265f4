//! Periodic curves traced across the backdrop
//!
//! Each curve is `y = f(x, t, pointer)` around a baseline expressed as a
//! fraction of the viewport height. Sampling walks x at a fixed stride.

use glam::Vec2;
use std::f32::consts::PI;
use std::f64::consts::TAU;

use super::particle::Viewport;
use super::state::Pointer;
use crate::consts::{CURVE_STRIDE, TAN_CLAMP};

/// Shape of the periodic term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Single sine; amplitude follows pointer y
    Sine,
    /// Two sines at distinct frequencies; baseline follows pointer x
    DualSine,
    /// Tangent clamped to `±TAN_CLAMP` before scaling
    ClampedTangent,
    /// Cosine with phase shifted by pointer x
    Cosine,
}

#[derive(Debug, Clone)]
pub struct Curve {
    pub kind: CurveKind,
    /// Baseline as a fraction of viewport height
    pub baseline: f32,
    /// Amplitude in pixels
    pub amplitude: f32,
    /// Spatial frequency (radians per pixel)
    pub frequency: f32,
    /// Phase speed (radians per simulated second)
    pub speed: f32,
}

impl Curve {
    pub const fn new(kind: CurveKind, baseline: f32, amplitude: f32, frequency: f32, speed: f32) -> Self {
        Self {
            kind,
            baseline,
            amplitude,
            frequency,
            speed,
        }
    }

    /// Time-driven phase `t * speed * rate`, wrapped to one turn
    ///
    /// Wrapping in f64 keeps the f32 argument small however long the page runs.
    pub fn phase(&self, t: f64, rate: f64) -> f32 {
        (t * self.speed as f64 * rate).rem_euclid(TAU) as f32
    }

    /// Offset from the baseline at `x`
    pub fn offset_at(&self, x: f32, t: f64, pointer: Pointer) -> f32 {
        let arg = x * self.frequency + self.phase(t, 1.0);
        match self.kind {
            CurveKind::Sine => arg.sin() * self.amplitude * (0.6 + 0.8 * pointer.y),
            CurveKind::DualSine => {
                let slow = arg.sin() * self.amplitude;
                let fast = (x * self.frequency * 3.1 - self.phase(t, 1.7)).sin() * self.amplitude * 0.35;
                slow + fast + (pointer.x - 0.5) * 60.0
            }
            CurveKind::ClampedTangent => arg.tan().clamp(-TAN_CLAMP, TAN_CLAMP) * self.amplitude,
            CurveKind::Cosine => {
                (x * self.frequency - self.phase(t, 1.0) + pointer.x * PI).cos() * self.amplitude
            }
        }
    }

    /// Largest `|offset|` the curve can reach for pointer in the unit square
    pub fn max_offset(&self) -> f32 {
        match self.kind {
            CurveKind::Sine => self.amplitude * 1.4,
            CurveKind::DualSine => self.amplitude * 1.35 + 30.0,
            CurveKind::ClampedTangent => self.amplitude * TAN_CLAMP,
            CurveKind::Cosine => self.amplitude,
        }
    }

    pub fn y_at(&self, x: f32, t: f64, pointer: Pointer, viewport: Viewport) -> f32 {
        viewport.height * self.baseline + self.offset_at(x, t, pointer)
    }

    /// Points from `x = 0` to the right edge, every `CURVE_STRIDE` pixels
    pub fn sample(&self, t: f64, pointer: Pointer, viewport: Viewport) -> Vec<Vec2> {
        let count = (viewport.width / CURVE_STRIDE).floor() as usize + 1;
        (0..count)
            .map(|i| {
                let x = i as f32 * CURVE_STRIDE;
                Vec2::new(x, self.y_at(x, t, pointer, viewport))
            })
            .collect()
    }
}

/// The backdrop's curve set
pub fn default_curves() -> Vec<Curve> {
    vec![
        Curve::new(CurveKind::Sine, 0.5, 50.0, 0.008, 0.8),
        Curve::new(CurveKind::DualSine, 0.35, 45.0, 0.004, 0.5),
        Curve::new(CurveKind::ClampedTangent, 0.68, 18.0, 0.003, 0.3),
        Curve::new(CurveKind::Cosine, 0.8, 35.0, 0.006, 0.6),
    ]
}
