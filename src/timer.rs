//! Browser timer handles that cancel themselves when dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Single-slot `setTimeout`: arming clears whatever was pending. The callback
/// closure is created once and reused for every arming.
pub struct TimeoutSlot {
    handle: Option<i32>,
    closure: Closure<dyn FnMut()>,
}

impl TimeoutSlot {
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            handle: None,
            closure: Closure::wrap(Box::new(callback) as Box<dyn FnMut()>),
        }
    }

    pub fn arm(&mut self, delay_ms: f64) {
        self.cancel();
        let Some(w) = web::window() else {
            return;
        };
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.closure.as_ref().unchecked_ref(),
            delay_ms.ceil().max(0.0) as i32,
        ) {
            Ok(h) => self.handle = Some(h),
            Err(e) => log::error!("setTimeout error: {:?}", e),
        }
    }

    /// Arm for an absolute deadline on the `instant::now()` clock, or cancel
    /// when there is none.
    pub fn sync_to(&mut self, deadline_ms: Option<f64>) {
        match deadline_ms {
            Some(d) => self.arm(d - instant::now()),
            None => self.cancel(),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(h) = self.handle.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(h);
            }
        }
    }
}

impl Drop for TimeoutSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Repeating `setInterval`, cleared on drop.
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(period_ms: i32, callback: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let w = web::window()?;
        let handle = w
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| log::error!("setInterval error: {:?}", e))
            .ok()?;
        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

/// Self-rescheduling `requestAnimationFrame` loop. `stop` (or drop) cancels
/// the pending frame and releases the closure.
pub struct RafLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl RafLoop {
    pub fn start(mut frame: impl FnMut() + 'static) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let tick_next = Rc::downgrade(&tick);
        let handle_next = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_next.set(None);
            frame();
            // The frame may have stopped the loop; only reschedule while the
            // closure is still installed.
            if let Some(tick) = tick_next.upgrade() {
                if let Some(cb) = tick.borrow().as_ref() {
                    handle_next.set(request_frame(cb));
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            handle.set(request_frame(cb));
        }
        Self { tick, handle }
    }

    pub fn stop(&mut self) {
        if let Some(h) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(h);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    let w = web::window()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| log::error!("requestAnimationFrame error: {:?}", e))
        .ok()
}
