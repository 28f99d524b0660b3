//! Thin playback-control surface: prev/play/next buttons, track info, and the
//! controls panel that hides itself a few seconds after the pointer leaves.

use crate::audio::AudioHandle;
use crate::constants::*;
use crate::dom::{self, Listener};
use crate::timer::TimeoutSlot;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::constants::CONTROLS_HIDE_MS;
use viz_core::{PlaybackState, Track};
use web_sys as web;

pub struct PlaybackControls {
    _listeners: Vec<Listener>,
    hide_timer: Rc<RefCell<TimeoutSlot>>,
}

impl PlaybackControls {
    pub fn start(document: &web::Document, audio: &AudioHandle) -> Self {
        let hide_doc = document.clone();
        let hide_timer = Rc::new(RefCell::new(TimeoutSlot::new(move || {
            dom::set_class(&hide_doc, CONTROLS_ID, HIDDEN_CLASS, true);
        })));

        let mut listeners = Vec::new();

        let a = audio.clone();
        listeners.extend(Listener::on_id(document, PREV_BUTTON_ID, "click", move |_| {
            a.previous_track()
        }));
        let a = audio.clone();
        listeners.extend(Listener::on_id(document, PLAY_BUTTON_ID, "click", move |_| {
            a.toggle()
        }));
        let a = audio.clone();
        listeners.extend(Listener::on_id(document, NEXT_BUTTON_ID, "click", move |_| {
            a.next_track()
        }));

        // Hovering the panel keeps it visible and holds auto-advance.
        let a = audio.clone();
        let timer = hide_timer.clone();
        let doc = document.clone();
        listeners.extend(Listener::on_id(document, CONTROLS_ID, "mouseenter", move |_| {
            a.pause_auto_advance();
            timer.borrow_mut().cancel();
            dom::set_class(&doc, CONTROLS_ID, HIDDEN_CLASS, false);
        }));
        let a = audio.clone();
        let timer = hide_timer.clone();
        listeners.extend(Listener::on_id(document, CONTROLS_ID, "mouseleave", move |_| {
            a.resume_auto_advance();
            timer.borrow_mut().arm(CONTROLS_HIDE_MS as f64);
        }));

        let doc = document.clone();
        audio.set_observer(Rc::new(
            move |state: PlaybackState, track: Option<&'static Track>| {
                show_state(&doc, state, track)
            },
        ));
        log::info!("[ui] controls wired ({} listeners)", listeners.len());

        Self {
            _listeners: listeners,
            hide_timer,
        }
    }
}

impl Drop for PlaybackControls {
    fn drop(&mut self) {
        self.hide_timer.borrow_mut().cancel();
    }
}

fn show_state(document: &web::Document, state: PlaybackState, track: Option<&'static Track>) {
    if let Some(track) = track {
        dom::set_text(document, TRACK_TITLE_ID, track.title);
        dom::set_text(document, TRACK_ARTIST_ID, track.artist);
    }
    dom::set_text(
        document,
        PLAY_BUTTON_ID,
        if state.is_playing { "Pause" } else { "Play" },
    );
    dom::set_class(document, PLAY_BUTTON_ID, PLAYING_CLASS, state.is_playing);
    dom::set_class(document, CONTROLS_ID, LOADING_CLASS, state.is_loading);
    for id in [PREV_BUTTON_ID, PLAY_BUTTON_ID, NEXT_BUTTON_ID] {
        dom::set_disabled(document, id, state.is_loading);
    }
}
