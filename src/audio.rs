//! WebAudio side of the audio engine.
//!
//! Owns the `AudioContext`, the media element and the analyser, executes the
//! commands `viz_core::Player` emits, reports asynchronous outcomes back into
//! it, and runs the frequency-analysis tick that publishes `AudioBands`.

use crate::dom::Listener;
use crate::timer::{RafLoop, TimeoutSlot};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use viz_core::constants::{SILENT_PLACEHOLDER_RATE, SILENT_PLACEHOLDER_SECS};
use viz_core::{
    wav, AnalyserParams, AudioBands, EnginePhase, PlaybackState, Player, PlayerCommand,
    PlayerParams, SourceRef, Track, VizError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type StateObserver = Rc<dyn Fn(PlaybackState, Option<&'static Track>)>;

struct Graph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    element: web::HtmlAudioElement,
    source: web::MediaElementAudioSourceNode,
}

// element -> source -> analyser -> destination
fn build_graph(params: AnalyserParams) -> Result<Graph, VizError> {
    let init_err = |e: JsValue| VizError::Initialization(format!("{:?}", e));

    let ctx = web::AudioContext::new().map_err(init_err)?;
    let analyser = ctx.create_analyser().map_err(init_err)?;
    analyser.set_fft_size(params.fft_size);
    analyser.set_smoothing_time_constant(params.smoothing);

    let element = web::HtmlAudioElement::new().map_err(init_err)?;
    element.set_cross_origin(Some("anonymous"));
    element.set_preload("auto");

    let source = ctx.create_media_element_source(&element).map_err(init_err)?;
    source.connect_with_audio_node(&analyser).map_err(init_err)?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(init_err)?;

    Ok(Graph {
        ctx,
        analyser,
        element,
        source,
    })
}

pub struct AudioEngine {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    element: web::HtmlAudioElement,
    _source: web::MediaElementAudioSourceNode,
    player: Player,
    bands: Rc<RefCell<AudioBands>>,
    magnitudes: Vec<u8>,
    placeholder_url: Option<String>,
    auto_timer: TimeoutSlot,
    analysis: Option<RafLoop>,
    listeners: Vec<Listener>,
    observer: Option<StateObserver>,
    weak_self: Weak<RefCell<AudioEngine>>,
}

impl AudioEngine {
    fn execute(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::SetSource(SourceRef::Track(url)) => {
                self.element.set_src(url);
                self.element.load();
            }
            PlayerCommand::SetSource(SourceRef::SilentPlaceholder) => match self.placeholder_url() {
                Some(url) => {
                    log::info!("[audio] substituting silent placeholder");
                    self.element.set_src(&url);
                    self.element.load();
                }
                None => {
                    // No placeholder either; report it so the load completes.
                    let err = VizError::Load {
                        locator: "placeholder".into(),
                        reason: "could not build silent placeholder".into(),
                    };
                    self.defer(move |p, out| p.load_failed(&err, out));
                }
            },
            PlayerCommand::ResumeContext => {
                if self.ctx.state() == web::AudioContextState::Suspended {
                    if let Ok(promise) = self.ctx.resume() {
                        spawn_local(async move {
                            if let Err(e) = JsFuture::from(promise).await {
                                log::warn!("[audio] resume rejected: {:?}", e);
                            }
                        });
                    }
                }
            }
            PlayerCommand::StartPlayback => match self.element.play() {
                Ok(promise) => {
                    let weak = self.weak_self.clone();
                    spawn_local(async move {
                        let result = JsFuture::from(promise).await;
                        let Some(engine) = weak.upgrade() else {
                            return;
                        };
                        match result {
                            Ok(_) => dispatch(&engine, |p, out| {
                                p.play_started(instant::now(), out)
                            }),
                            Err(e) => {
                                let err = VizError::PlaybackBlocked(format!("{:?}", e));
                                dispatch(&engine, |p, _| p.play_blocked(&err));
                            }
                        }
                    });
                }
                Err(e) => {
                    let err = VizError::PlaybackBlocked(format!("{:?}", e));
                    self.defer(move |p, _| p.play_blocked(&err));
                }
            },
            PlayerCommand::StopPlayback => {
                _ = self.element.pause();
            }
            PlayerCommand::StartAnalysis => {
                let weak = self.weak_self.clone();
                self.analysis = Some(RafLoop::start(move || {
                    if let Some(engine) = weak.upgrade() {
                        engine.borrow_mut().analyse();
                    }
                }));
                log::info!("[audio] analysis started");
            }
            PlayerCommand::StopAnalysis => {
                self.analysis = None;
                log::info!("[audio] analysis stopped");
            }
            PlayerCommand::Release => self.release(),
        }
    }

    /// One analysis tick: read the analyser and publish fresh bands.
    fn analyse(&mut self) {
        self.analyser.get_byte_frequency_data(&mut self.magnitudes);
        self.bands.borrow_mut().update_from(&self.magnitudes);
    }

    fn placeholder_url(&mut self) -> Option<String> {
        if self.placeholder_url.is_none() {
            self.placeholder_url = make_placeholder_url()
                .map_err(|e| log::error!("[audio] placeholder error: {:?}", e))
                .ok();
        }
        self.placeholder_url.clone()
    }

    /// Run a player operation after the current borrow is released.
    fn defer(&self, op: impl FnOnce(&mut Player, &mut Vec<PlayerCommand>) + 'static) {
        let weak = self.weak_self.clone();
        spawn_local(async move {
            if let Some(engine) = weak.upgrade() {
                dispatch(&engine, op);
            }
        });
    }

    fn release(&mut self) {
        self.auto_timer.cancel();
        self.analysis = None;
        self.listeners.clear();
        _ = self.element.pause();
        _ = self.element.remove_attribute("src");
        if let Some(url) = self.placeholder_url.take() {
            _ = web::Url::revoke_object_url(&url);
        }
        if let Ok(promise) = self.ctx.close() {
            spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[audio] close rejected: {:?}", e);
                }
            });
        }
        log::info!("[audio] released");
    }
}

/// Object URL of an in-memory silent WAV. The caller revokes it.
pub fn make_placeholder_url() -> Result<String, JsValue> {
    let bytes = wav::silent_wav(SILENT_PLACEHOLDER_SECS, SILENT_PLACEHOLDER_RATE);
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
    let opts = web::BlobPropertyBag::new();
    opts.set_type("audio/wav");
    let blob = web::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    web::Url::create_object_url_with_blob(&blob)
}

/// Apply a player operation, execute the resulting commands, re-sync the
/// auto-advance timeout and notify the observer if the visible state changed.
fn dispatch(
    engine: &Rc<RefCell<AudioEngine>>,
    op: impl FnOnce(&mut Player, &mut Vec<PlayerCommand>),
) {
    let mut out = Vec::new();
    let notify = {
        let mut e = engine.borrow_mut();
        let before = e.player.state();
        op(&mut e.player, &mut out);
        for cmd in out.drain(..) {
            e.execute(cmd);
        }
        let deadline = e.player.next_deadline();
        e.auto_timer.sync_to(deadline);
        let after = e.player.state();
        match &e.observer {
            Some(obs) if after != before => Some((obs.clone(), after, e.player.current_track())),
            _ => None,
        }
    };
    if let Some((obs, state, track)) = notify {
        obs(state, track);
    }
}

/// Playback control surface handed to the UI shell.
#[derive(Clone)]
pub struct AudioHandle {
    engine: Rc<RefCell<AudioEngine>>,
}

impl AudioHandle {
    /// Build the audio graph and load the first track. Fails only when the
    /// platform audio subsystem is unavailable.
    pub fn start(
        bands: Rc<RefCell<AudioBands>>,
        playlist: &'static [Track],
        params: PlayerParams,
        analyser_params: AnalyserParams,
    ) -> Result<Self, VizError> {
        let Graph {
            ctx,
            analyser,
            element,
            source,
        } = build_graph(analyser_params)?;
        let bins = analyser.frequency_bin_count() as usize;
        log::info!(
            "[audio] context ready: {} Hz, {} bins",
            ctx.sample_rate(),
            bins
        );

        let engine = Rc::new_cyclic(|weak: &Weak<RefCell<AudioEngine>>| {
            let timer_weak = weak.clone();
            RefCell::new(AudioEngine {
                ctx,
                analyser,
                element,
                _source: source,
                player: Player::new(playlist, params),
                bands,
                magnitudes: vec![0; bins],
                placeholder_url: None,
                auto_timer: TimeoutSlot::new(move || {
                    if let Some(engine) = timer_weak.upgrade() {
                        dispatch(&engine, |p, out| {
                            p.poll_timers(instant::now(), out);
                        });
                    }
                }),
                analysis: None,
                listeners: Vec::new(),
                observer: None,
                weak_self: weak.clone(),
            })
        });

        wire_element_events(&engine);
        dispatch(&engine, |p, out| p.initialized(out));
        Ok(Self { engine })
    }

    pub fn set_observer(&self, observer: StateObserver) {
        let (state, track) = {
            let e = self.engine.borrow();
            (e.player.state(), e.player.current_track())
        };
        self.engine.borrow_mut().observer = Some(observer.clone());
        observer(state, track);
    }

    pub fn play(&self) {
        dispatch(&self.engine, |p, out| p.play(out));
    }

    pub fn pause(&self) {
        dispatch(&self.engine, |p, out| p.pause(out));
    }

    pub fn toggle(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next_track(&self) {
        dispatch(&self.engine, |p, out| p.next_track(out));
    }

    pub fn previous_track(&self) {
        dispatch(&self.engine, |p, out| p.previous_track(out));
    }

    pub fn pause_auto_advance(&self) {
        dispatch(&self.engine, |p, _| p.pause_auto_advance());
    }

    pub fn resume_auto_advance(&self) {
        dispatch(&self.engine, |p, _| p.resume_auto_advance(instant::now()));
    }

    pub fn state(&self) -> PlaybackState {
        self.engine.borrow().player.state()
    }

    pub fn current_track(&self) -> Option<&'static Track> {
        self.engine.borrow().player.current_track()
    }

    pub fn is_playing(&self) -> bool {
        self.state().is_playing
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    pub fn auto_advance(&self) -> bool {
        self.state().auto_advance
    }

    pub fn phase(&self) -> EnginePhase {
        self.engine.borrow().player.phase()
    }

    pub fn audio_data(&self) -> AudioBands {
        self.engine.borrow().bands.borrow().clone()
    }

    /// Cancel the analysis tick and timers and close the audio context.
    pub fn shutdown(&self) {
        dispatch(&self.engine, |p, out| p.teardown(out));
        self.engine.borrow_mut().observer = None;
    }
}

fn wire_element_events(engine: &Rc<RefCell<AudioEngine>>) {
    let element: web::EventTarget = engine.borrow().element.clone().into();
    let mut listeners = Vec::new();

    let weak = Rc::downgrade(engine);
    listeners.extend(Listener::new(&element, "canplaythrough", move |_| {
        if let Some(engine) = weak.upgrade() {
            dispatch(&engine, |p, out| p.load_finished(out));
        }
    }));

    let weak = Rc::downgrade(engine);
    listeners.extend(Listener::new(&element, "error", move |_| {
        let Some(engine) = weak.upgrade() else {
            return;
        };
        let err = {
            let e = engine.borrow();
            VizError::Load {
                locator: e.element.src(),
                reason: e
                    .element
                    .error()
                    .map(|m| format!("media error code {}", m.code()))
                    .unwrap_or_else(|| "unknown media error".into()),
            }
        };
        dispatch(&engine, |p, out| p.load_failed(&err, out));
    }));

    let weak = Rc::downgrade(engine);
    listeners.extend(Listener::new(&element, "ended", move |_| {
        if let Some(engine) = weak.upgrade() {
            log::info!("[audio] track ended");
            dispatch(&engine, |p, out| p.track_ended(out));
        }
    }));

    engine.borrow_mut().listeners = listeners;
}
