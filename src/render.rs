//! Canvas 2D painter. Translates the layer geometry from `viz_core::scene`
//! into drawing calls; holds no animation state of its own.

use glam::Vec2;
use std::f64::consts::TAU;
use viz_core::constants::{PARTICLE_LIGHTNESS, PARTICLE_SATURATION};
use viz_core::scene::{self, Blend, ColorStop, Dot, FlowingShape, Gradient, Ring, Wash};
use viz_core::{Hsla, Particle};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Painter {
    ctx: web::CanvasRenderingContext2d,
}

impl Painter {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { ctx })
    }

    fn set_blend(&self, blend: Blend) {
        _ = self.ctx.set_global_composite_operation(blend.composite_op());
    }

    /// Translucent black over the previous frame, which leaves the motion
    /// trails.
    pub fn fade(&self, viewport: Vec2) {
        self.ctx.save();
        self.set_blend(Blend::SourceOver);
        self.ctx.set_fill_style_str(&scene::fade_color().css());
        self.ctx
            .fill_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
        self.ctx.restore();
    }

    fn gradient(&self, gradient: &Gradient) -> Option<web::CanvasGradient> {
        let (g, stops) = match gradient {
            Gradient::Linear { from, to, stops } => (
                self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                ),
                stops,
            ),
            Gradient::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => {
                let g = self
                    .ctx
                    .create_radial_gradient(
                        inner.x as f64,
                        inner.y as f64,
                        inner_radius.max(0.0) as f64,
                        outer.x as f64,
                        outer.y as f64,
                        outer_radius.max(0.0) as f64,
                    )
                    .map_err(|e| log::warn!("[render] radial gradient error: {:?}", e))
                    .ok()?;
                (g, stops)
            }
        };
        for ColorStop { offset, color } in stops {
            _ = g.add_color_stop(offset.clamp(0.0, 1.0), &color.css());
        }
        Some(g)
    }

    pub fn fill_wash(&self, wash: &Wash, viewport: Vec2) {
        let Some(g) = self.gradient(&wash.gradient) else {
            return;
        };
        self.ctx.save();
        self.set_blend(wash.blend);
        self.ctx.set_fill_style_canvas_gradient(&g);
        self.ctx
            .fill_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
        self.ctx.restore();
    }

    pub fn fill_shape(&self, shape: &FlowingShape) {
        let Some(g) = self.gradient(&shape.fill) else {
            return;
        };
        let mut points = shape.outline.iter();
        let Some(first) = points.next() else {
            return;
        };
        self.ctx.save();
        self.set_blend(Blend::Screen);
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in points {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_canvas_gradient(&g);
        self.ctx.fill();
        self.ctx.restore();
    }

    pub fn draw_particles(&self, particles: &[Particle], volume: f32) {
        self.ctx.save();
        self.set_blend(Blend::Screen);
        for p in particles {
            let color = Hsla::new(p.hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS, p.alpha(volume));
            self.disc(Vec2::new(p.x, p.y), p.size, &color);
        }
        self.ctx.restore();
    }

    pub fn draw_dots(&self, dots: &[Dot]) {
        self.ctx.save();
        self.set_blend(Blend::Screen);
        for dot in dots {
            self.disc(dot.center, dot.radius, &dot.color);
        }
        self.ctx.restore();
    }

    pub fn stroke_ring(&self, ring: &Ring) {
        self.ctx.save();
        self.set_blend(Blend::Screen);
        self.ctx.begin_path();
        let traced = self.ctx.arc(
            ring.center.x as f64,
            ring.center.y as f64,
            ring.radius.max(0.0) as f64,
            0.0,
            TAU,
        );
        if traced.is_ok() {
            self.ctx.set_stroke_style_str(&ring.color.css());
            self.ctx.set_line_width(ring.line_width);
            self.ctx.stroke();
        }
        self.ctx.restore();
    }

    fn disc(&self, center: Vec2, radius: f32, color: &Hsla) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }
}
