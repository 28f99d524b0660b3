use crate::dom::{self, Listener};
use crate::render::Painter;
use crate::timer::RafLoop;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::scene::{self, FrameClock};
use viz_core::{AudioBands, FieldParams, Palette, ParticleField, PointerTracker};
use web_sys as web;

/// Everything one render tick reads or mutates. The bands and the tracker are
/// shared with the audio engine and the pointer wiring; the frame only reads
/// them.
pub struct FrameContext {
    canvas: web::HtmlCanvasElement,
    painter: Painter,
    clock: FrameClock,
    field: ParticleField,
    viewport: Vec2,
    bands: Rc<RefCell<AudioBands>>,
    pointer: Rc<RefCell<PointerTracker>>,
}

impl FrameContext {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        bands: Rc<RefCell<AudioBands>>,
        pointer: Rc<RefCell<PointerTracker>>,
    ) -> anyhow::Result<Self> {
        let painter = Painter::new(&canvas)?;
        let (w, h) = dom::sync_canvas_to_viewport(&canvas);
        let viewport = Vec2::new(w as f32, h as f32);
        pointer.borrow_mut().set_viewport(viewport.x, viewport.y);
        let field = ParticleField::new(
            viewport.x,
            viewport.y,
            FieldParams::default(),
            StdRng::from_entropy(),
        );
        log::info!(
            "[frame] canvas {}x{}, {} particles",
            w,
            h,
            field.len()
        );
        Ok(Self {
            canvas,
            painter,
            clock: FrameClock::default(),
            field,
            viewport,
            bands,
            pointer,
        })
    }

    /// Match the canvas to the viewport and re-seed the particles for the new
    /// bounds.
    pub fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_to_viewport(&self.canvas);
        self.viewport = Vec2::new(w as f32, h as f32);
        self.field.reinitialize(self.viewport.x, self.viewport.y);
        self.pointer
            .borrow_mut()
            .set_viewport(self.viewport.x, self.viewport.y);
        log::info!("[frame] resized to {}x{}", w, h);
    }

    pub fn frame(&mut self) {
        let time = self.clock.advance();
        let bands = self.bands.borrow();
        let pointer = self.pointer.borrow();

        self.painter.fade(self.viewport);

        let palette = Palette::compute(time, &bands, &pointer.color_influence());
        for wash in scene::gradient_washes(self.viewport, time, &bands, &palette).iter() {
            self.painter.fill_wash(wash, self.viewport);
        }
        self.painter
            .fill_shape(&scene::flowing_shape(self.viewport, time, &bands, &palette));

        self.field.update(time, &bands, &pointer);
        self.painter.draw_particles(self.field.particles(), bands.volume);

        self.painter.draw_dots(&scene::trail_dots(&pointer, &palette));
        if let Some(ring) = scene::ripple_ring(&pointer, &palette) {
            self.painter.stroke_ring(&ring);
        }
    }
}

/// The running render loop and its resize listener.
pub struct RenderLoop {
    _raf: RafLoop,
    _resize: Option<Listener>,
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> RenderLoop {
    let resize = web::window().and_then(|w| {
        let ctx = frame_ctx.clone();
        Listener::new(&w, "resize", move |_| ctx.borrow_mut().resize())
    });
    let raf = RafLoop::start(move || frame_ctx.borrow_mut().frame());
    RenderLoop {
        _raf: raf,
        _resize: resize,
    }
}
