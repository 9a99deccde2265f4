//! Backdrop rendering
//!
//! `shapes` lays out a frame as primitives; `canvas` paints them with the
//! Canvas2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use shapes::{Primitive, css_rgba, frame};
