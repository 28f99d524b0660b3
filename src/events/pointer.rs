use crate::dom::Listener;
use crate::timer::{Interval, TimeoutSlot};
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::constants::TRAIL_DECAY_INTERVAL_MS;
use viz_core::PointerTracker;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Browser plumbing for the pointer tracker: the move listener, the trail
/// decay interval and the "pointer stopped" timeout. Dropping it detaches all
/// three.
pub struct PointerWiring {
    _pointermove: Listener,
    _decay: Interval,
    stop_timer: Rc<RefCell<TimeoutSlot>>,
    tracker: Rc<RefCell<PointerTracker>>,
}

impl PointerWiring {
    pub fn start(tracker: Rc<RefCell<PointerTracker>>) -> Option<Self> {
        let window = web::window()?;

        let stop_tracker = tracker.clone();
        let stop_timer = Rc::new(RefCell::new(TimeoutSlot::new(move || {
            if stop_tracker.borrow_mut().poll_stop(instant::now()) {
                log::debug!("[pointer] stopped");
            }
        })));

        let move_tracker = tracker.clone();
        let move_stop = stop_timer.clone();
        let pointermove = Listener::new(&window, "pointermove", move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let deadline = {
                let mut t = move_tracker.borrow_mut();
                t.on_pointer_move(ev.client_x() as f32, ev.client_y() as f32, instant::now());
                t.stop_deadline()
            };
            move_stop.borrow_mut().sync_to(deadline);
        })?;

        let decay_tracker = tracker.clone();
        let decay = Interval::start(TRAIL_DECAY_INTERVAL_MS, move || {
            decay_tracker.borrow_mut().decay_tick(instant::now());
        })?;

        log::info!("[pointer] tracking started");
        Some(Self {
            _pointermove: pointermove,
            _decay: decay,
            stop_timer,
            tracker,
        })
    }
}

impl Drop for PointerWiring {
    fn drop(&mut self) {
        self.stop_timer.borrow_mut().cancel();
        self.tracker.borrow_mut().cancel_timers();
        log::info!("[pointer] tracking stopped");
    }
}
