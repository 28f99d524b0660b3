#![cfg(target_arch = "wasm32")]
use crate::audio::AudioHandle;
use crate::constants::{CANVAS_ID, START_BUTTON_ID};
use crate::controls::PlaybackControls;
use crate::dom::Listener;
use crate::events::PointerWiring;
use crate::frame::{FrameContext, RenderLoop};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use viz_core::{
    AnalyserParams, AudioBands, PlayerParams, PointerTracker, TrackerParams, DEFAULT_PLAYLIST,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod audio;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod timer;

static STARTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static START_LISTENER: RefCell<Option<Listener>> = const { RefCell::new(None) };
}

/// One running visualizer: render loop, pointer tracking and (when the
/// platform allows) the audio engine. Dropping it tears everything down.
struct Session {
    audio: Option<AudioHandle>,
    _controls: Option<PlaybackControls>,
    _pointer: Option<PointerWiring>,
    _render: RenderLoop,
}

impl Session {
    fn begin(document: &web::Document, canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let analyser_params = AnalyserParams::default();
        let bands = Rc::new(RefCell::new(AudioBands::silent(analyser_params.bin_count())));
        let (w, h) = dom::viewport_size();
        let pointer = Rc::new(RefCell::new(PointerTracker::new(
            w as f32,
            h as f32,
            TrackerParams::default(),
        )));

        let frame_ctx = FrameContext::new(canvas, bands.clone(), pointer.clone())?;
        let render = frame::start_loop(Rc::new(RefCell::new(frame_ctx)));
        let pointer = PointerWiring::start(pointer);

        // Visuals keep running on silent bands if audio cannot start.
        let audio = match AudioHandle::start(
            bands,
            DEFAULT_PLAYLIST,
            PlayerParams::default(),
            analyser_params,
        ) {
            Ok(a) => Some(a),
            Err(e) => {
                log::error!("[audio] {}", e);
                None
            }
        };
        let controls = audio.as_ref().map(|a| PlaybackControls::start(document, a));
        if let Some(a) = &audio {
            a.play();
        }

        log::info!("[session] started");
        Ok(Self {
            audio,
            _controls: controls,
            _pointer: pointer,
            _render: render,
        })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(a) = &self.audio {
            a.shutdown();
        }
        log::info!("[session] stopped");
    }
}

fn begin_session(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    if STARTED.swap(true, Ordering::SeqCst) {
        return;
    }
    overlay::hide(document);
    match Session::begin(document, canvas.clone()) {
        Ok(session) => SESSION.with(|s| *s.borrow_mut() = Some(session)),
        Err(e) => {
            log::error!("session error: {:?}", e);
            STARTED.store(false, Ordering::SeqCst);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viz-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Tear down the running session, if any. The start button can begin a new
/// one afterwards.
#[wasm_bindgen]
pub fn stop() {
    let session = SESSION.with(|s| s.borrow_mut().take());
    drop(session);
    STARTED.store(false, Ordering::SeqCst);
    if let Some(document) = dom::window_document() {
        overlay::show(&document);
    }
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // The click is the user gesture browsers require before audio may start.
    let doc = document.clone();
    let click_canvas = canvas.clone();
    let listener = Listener::on_id(&document, START_BUTTON_ID, "click", move |_| {
        begin_session(&doc, &click_canvas)
    });
    match listener {
        Some(l) => {
            overlay::show(&document);
            START_LISTENER.with(|s| *s.borrow_mut() = Some(l));
        }
        None => {
            log::warn!("[ui] no #{}; starting without a gesture", START_BUTTON_ID);
            begin_session(&document, &canvas);
        }
    }
    Ok(())
}
