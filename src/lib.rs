//! Landing FX - presentational behaviour for the event landing page
//!
//! Core modules:
//! - `countdown`: Event schedule evaluation (phase, remaining time, labels)
//! - `scene`: Deterministic curve/particle backdrop simulation
//! - `render`: Draw primitives for a scene frame, Canvas2D backend on web
//! - `reveal`: Notify-once subscriptions and staggered scroll reveals
//! - `settings`: Page configuration and element selectors
//! - `platform`: Browser components with explicit start/dispose lifecycle

pub mod countdown;
pub mod error;
pub mod platform;
pub mod render;
pub mod reveal;
pub mod scene;
pub mod settings;

pub use countdown::{CountdownDisplay, CountdownFields, EventSchedule, Phase};
pub use error::{FxError, FxResult};
pub use settings::{QualityPreset, Selectors, Settings, TimeStep};

/// Backdrop and countdown constants
pub mod consts {
    /// Nominal simulation step per animation frame (seconds)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest step the elapsed-time policy will take after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Countdown polling period
    pub const COUNTDOWN_PERIOD_MS: i32 = 1000;

    /// Background grid spacing (pixels)
    pub const GRID_SPACING: f32 = 60.0;
    /// Background grid stroke opacity
    pub const GRID_ALPHA: f32 = 0.04;

    /// Curves are sampled every this many pixels along x
    pub const CURVE_STRIDE: f32 = 2.0;
    /// Symmetric bound applied to the tangent term before scaling
    pub const TAN_CLAMP: f32 = 2.0;

    /// Particle speed range (pixels per step)
    pub const PARTICLE_MAX_SPEED: f32 = 0.35;
    /// Particle radius range (pixels)
    pub const PARTICLE_MIN_RADIUS: f32 = 0.6;
    pub const PARTICLE_MAX_RADIUS: f32 = 2.2;
    /// Opacity phase advance per step (radians)
    pub const PARTICLE_TWINKLE_RATE: f32 = 0.02;

    /// Delay between consecutive sibling reveals (milliseconds)
    pub const REVEAL_STAGGER_MS: u32 = 90;
}

/// Clamp a pointer coordinate into the unit interval
#[inline]
pub fn normalize_pointer(pos: f32, extent: f32) -> f32 {
    if extent <= 0.0 || !pos.is_finite() {
        return 0.5;
    }
    (pos / extent).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pointer() {
        assert_eq!(normalize_pointer(50.0, 200.0), 0.25);
        assert_eq!(normalize_pointer(-10.0, 200.0), 0.0);
        assert_eq!(normalize_pointer(500.0, 200.0), 1.0);
        // Zero-sized viewport falls back to center
        assert_eq!(normalize_pointer(10.0, 0.0), 0.5);
    }
}
