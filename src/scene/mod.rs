//! Backdrop simulation
//!
//! Pure and deterministic for a given seed, like a game sim:
//! - Seeded RNG only (particle respawns)
//! - Clock advanced explicitly by the caller
//! - No rendering or platform dependencies

pub mod curves;
pub mod particle;
pub mod state;

pub use curves::{Curve, CurveKind, default_curves};
pub use particle::{Particle, Viewport};
pub use state::{CurveScene, Pointer};
