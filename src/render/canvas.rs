//! Canvas2D backend for the backdrop

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{Primitive, css_rgba};
use crate::error::{FxError, FxResult};

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// CSS pixel size of the drawing area
    size: (f32, f32),
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> FxResult<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| FxError::Js("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::Js("not a 2d context".into()))?;

        Ok(Self {
            canvas,
            ctx,
            size: (0.0, 0.0),
        })
    }

    /// Match the backing store to the viewport, in physical pixels
    pub fn resize(&mut self, width: f32, height: f32, dpr: f64) {
        self.size = (width, height);
        self.canvas.set_width((width as f64 * dpr) as u32);
        self.canvas.set_height((height as f64 * dpr) as u32);
        // Drawing stays in CSS pixels
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).ok();
    }

    pub fn paint(&self, primitives: &[Primitive]) {
        let (w, h) = self.size;
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        for prim in primitives {
            match prim {
                Primitive::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    self.ctx.set_stroke_style_str(&css_rgba(*color));
                    self.ctx.set_line_width(*width as f64);
                    self.ctx.begin_path();
                    self.ctx.move_to(from.x as f64, from.y as f64);
                    self.ctx.line_to(to.x as f64, to.y as f64);
                    self.ctx.stroke();
                }
                Primitive::Polyline {
                    points,
                    width,
                    color,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    self.ctx.set_stroke_style_str(&css_rgba(*color));
                    self.ctx.set_line_width(*width as f64);
                    self.ctx.begin_path();
                    self.ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        self.ctx.line_to(p.x as f64, p.y as f64);
                    }
                    self.ctx.stroke();
                }
                Primitive::Circle {
                    center,
                    radius,
                    color,
                } => {
                    self.ctx.set_fill_style_str(&css_rgba(*color));
                    self.ctx.begin_path();
                    self.ctx
                        .arc(
                            center.x as f64,
                            center.y as f64,
                            *radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        )
                        .ok();
                    self.ctx.fill();
                }
            }
        }
    }
}
