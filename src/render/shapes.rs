//! Draw primitives for one backdrop frame
//!
//! The scene is turned into a flat list of primitives here so the layout can
//! be checked without a browser; the canvas backend only replays them.

use glam::Vec2;

use crate::consts::{GRID_ALPHA, GRID_SPACING};
use crate::scene::{CurveScene, Viewport};

/// Colors for backdrop elements (straight alpha)
pub mod colors {
    pub const GRID: [f32; 4] = [1.0, 1.0, 1.0, super::GRID_ALPHA];
    pub const GUIDE: [f32; 4] = [0.9, 0.22, 0.27, 0.18];
    pub const PARTICLE: [f32; 3] = [1.0, 0.95, 0.9];
    /// One entry per curve, cycled if there are more curves
    pub const CURVES: [[f32; 4]; 4] = [
        [0.9, 0.22, 0.27, 0.55],
        [1.0, 0.72, 0.01, 0.45],
        [0.27, 0.48, 0.62, 0.5],
        [0.95, 0.98, 0.93, 0.3],
    ];
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
}

/// CSS `rgba()` string for a color
pub fn css_rgba(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// Vertical and horizontal reference lines at fixed spacing
pub fn grid(viewport: Viewport) -> Vec<Primitive> {
    let mut lines = Vec::new();
    let mut x = 0.0;
    while x <= viewport.width {
        lines.push(Primitive::Line {
            from: Vec2::new(x, 0.0),
            to: Vec2::new(x, viewport.height),
            width: 1.0,
            color: colors::GRID,
        });
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= viewport.height {
        lines.push(Primitive::Line {
            from: Vec2::new(0.0, y),
            to: Vec2::new(viewport.width, y),
            width: 1.0,
            color: colors::GRID,
        });
        y += GRID_SPACING;
    }
    lines
}

/// Full-width and full-height guides through the crosshair point
pub fn crosshair(center: Vec2, viewport: Viewport) -> [Primitive; 2] {
    [
        Primitive::Line {
            from: Vec2::new(center.x, 0.0),
            to: Vec2::new(center.x, viewport.height),
            width: 1.0,
            color: colors::GUIDE,
        },
        Primitive::Line {
            from: Vec2::new(0.0, center.y),
            to: Vec2::new(viewport.width, center.y),
            width: 1.0,
            color: colors::GUIDE,
        },
    ]
}

/// Everything to paint for the scene's current state, back to front
pub fn frame(scene: &CurveScene) -> Vec<Primitive> {
    let viewport = scene.viewport();
    let mut out = grid(viewport);

    for (i, points) in scene.curve_points().into_iter().enumerate() {
        out.push(Primitive::Polyline {
            points,
            width: 1.5,
            color: colors::CURVES[i % colors::CURVES.len()],
        });
    }

    out.extend(crosshair(scene.crosshair(), viewport));

    for p in &scene.particles {
        let [r, g, b] = colors::PARTICLE;
        out.push(Primitive::Circle {
            center: p.pos,
            radius: p.radius,
            color: [r, g, b, p.opacity()],
        });
    }

    out
}
