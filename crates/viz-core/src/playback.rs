//! Playback state machine for the audio engine.
//!
//! `Player` never touches the platform. Each operation pushes
//! `PlayerCommand`s into an output buffer for the front end to execute, and
//! the front end reports asynchronous outcomes back (`load_finished`,
//! `play_started`, ...). Timestamps are milliseconds.

use crate::constants::AUTO_ADVANCE_MS;
use crate::error::VizError;
use crate::playlist::{next_index, previous_index, Track};
use crate::timer::DeferredSlot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    Uninitialized,
    Idle,
    Loading,
    Playing,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceRef {
    Track(&'static str),
    SilentPlaceholder,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    SetSource(SourceRef),
    ResumeContext,
    StartPlayback,
    StopPlayback,
    StartAnalysis,
    StopAnalysis,
    Release,
}

#[derive(Clone, Copy, Debug)]
pub struct PlayerParams {
    pub auto_advance_ms: f64,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self {
            auto_advance_ms: AUTO_ADVANCE_MS,
        }
    }
}

/// Snapshot handed to the playback-control collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_index: usize,
    pub is_playing: bool,
    pub is_loading: bool,
    pub auto_advance: bool,
}

pub struct Player {
    pub params: PlayerParams,
    playlist: &'static [Track],
    state: PlaybackState,
    phase: EnginePhase,
    resume_after_load: bool,
    play_requested: bool,
    on_placeholder: bool,
    analysis_running: bool,
    auto_timer: DeferredSlot,
}

impl Player {
    pub fn new(playlist: &'static [Track], params: PlayerParams) -> Self {
        Self {
            params,
            playlist,
            state: PlaybackState {
                current_index: 0,
                is_playing: false,
                is_loading: false,
                auto_advance: true,
            },
            phase: EnginePhase::Uninitialized,
            resume_after_load: false,
            play_requested: false,
            on_placeholder: false,
            analysis_running: false,
            auto_timer: DeferredSlot::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn playlist(&self) -> &'static [Track] {
        self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_track(&self) -> Option<&'static Track> {
        self.playlist.get(self.state.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn auto_advance(&self) -> bool {
        self.state.auto_advance
    }

    pub fn analysis_running(&self) -> bool {
        self.analysis_running
    }

    /// When the auto-advance slot is due, if armed.
    pub fn next_deadline(&self) -> Option<f64> {
        self.auto_timer.deadline()
    }

    /// Platform audio came up; load the current track.
    pub fn initialized(&mut self, out: &mut Vec<PlayerCommand>) {
        if self.phase != EnginePhase::Uninitialized {
            return;
        }
        self.phase = EnginePhase::Idle;
        log::info!("[audio] initialized; {} tracks", self.playlist.len());
        self.load_track(self.state.current_index, out);
    }

    pub fn load_track(&mut self, index: usize, out: &mut Vec<PlayerCommand>) {
        self.begin_load(index, false, out);
    }

    fn begin_load(&mut self, index: usize, resume: bool, out: &mut Vec<PlayerCommand>) {
        if self.phase == EnginePhase::Uninitialized || self.playlist.is_empty() {
            log::warn!("[audio] load ignored; engine not ready");
            return;
        }
        let index = index % self.playlist.len();
        let track = &self.playlist[index];
        self.state.current_index = index;
        self.state.is_loading = true;
        self.state.is_playing = false;
        self.phase = EnginePhase::Loading;
        self.resume_after_load = resume;
        self.play_requested = false;
        self.on_placeholder = false;
        self.auto_timer.cancel();
        log::info!(
            "[audio] loading #{} '{}' by {} (resume={})",
            index,
            track.title,
            track.artist,
            resume
        );
        out.push(PlayerCommand::SetSource(SourceRef::Track(track.source)));
    }

    /// Source is ready to play through. Completions arriving outside a load
    /// are stale and ignored.
    pub fn load_finished(&mut self, out: &mut Vec<PlayerCommand>) {
        if self.phase != EnginePhase::Loading {
            return;
        }
        self.phase = EnginePhase::Idle;
        self.state.is_loading = false;
        if std::mem::take(&mut self.resume_after_load) {
            self.play(out);
        }
    }

    /// The source could not be loaded. The first failure swaps in the silent
    /// placeholder; a failing placeholder just ends the load.
    pub fn load_failed(&mut self, err: &VizError, out: &mut Vec<PlayerCommand>) {
        if self.phase != EnginePhase::Loading {
            return;
        }
        log::warn!("[audio] {}", err);
        if self.on_placeholder {
            self.load_finished(out);
            return;
        }
        self.on_placeholder = true;
        out.push(PlayerCommand::SetSource(SourceRef::SilentPlaceholder));
    }

    pub fn play(&mut self, out: &mut Vec<PlayerCommand>) {
        match self.phase {
            EnginePhase::Uninitialized => {
                log::warn!("[audio] play ignored; engine not initialized");
            }
            EnginePhase::Loading => {
                self.resume_after_load = true;
            }
            _ => {
                self.play_requested = true;
                out.push(PlayerCommand::ResumeContext);
                out.push(PlayerCommand::StartPlayback);
            }
        }
    }

    /// The platform accepted the play request. Confirmations for a request
    /// that was since paused or superseded by a load are dropped.
    pub fn play_started(&mut self, now_ms: f64, out: &mut Vec<PlayerCommand>) {
        if !std::mem::take(&mut self.play_requested) {
            return;
        }
        // A load or teardown clears the request, so the phase here is
        // Idle or Paused.
        self.phase = EnginePhase::Playing;
        self.state.is_playing = true;
        if !self.analysis_running {
            self.analysis_running = true;
            out.push(PlayerCommand::StartAnalysis);
        }
        if self.state.auto_advance {
            self.auto_timer.arm(now_ms, self.params.auto_advance_ms);
        }
    }

    /// The platform refused to start playback; state stays as it was.
    pub fn play_blocked(&mut self, err: &VizError) {
        self.play_requested = false;
        log::warn!("[audio] {}; waiting for a user gesture", err);
    }

    pub fn pause(&mut self, out: &mut Vec<PlayerCommand>) {
        if self.phase == EnginePhase::Uninitialized {
            return;
        }
        out.push(PlayerCommand::StopPlayback);
        self.resume_after_load = false;
        self.play_requested = false;
        self.state.is_playing = false;
        self.auto_timer.cancel();
        if self.phase != EnginePhase::Loading {
            self.phase = EnginePhase::Paused;
        }
    }

    fn wants_playback(&self) -> bool {
        self.state.is_playing || self.resume_after_load
    }

    pub fn next_track(&mut self, out: &mut Vec<PlayerCommand>) {
        let resume = self.wants_playback();
        let index = next_index(self.state.current_index, self.playlist.len());
        self.begin_load(index, resume, out);
    }

    pub fn previous_track(&mut self, out: &mut Vec<PlayerCommand>) {
        let resume = self.wants_playback();
        let index = previous_index(self.state.current_index, self.playlist.len());
        self.begin_load(index, resume, out);
    }

    /// Natural end of the current source.
    pub fn track_ended(&mut self, out: &mut Vec<PlayerCommand>) {
        self.next_track(out);
    }

    pub fn pause_auto_advance(&mut self) {
        self.state.auto_advance = false;
        self.auto_timer.cancel();
    }

    pub fn resume_auto_advance(&mut self, now_ms: f64) {
        self.state.auto_advance = true;
        if self.state.is_playing {
            self.auto_timer.arm(now_ms, self.params.auto_advance_ms);
        }
    }

    /// Fire the auto-advance slot if due. Returns true when it advanced.
    pub fn poll_timers(&mut self, now_ms: f64, out: &mut Vec<PlayerCommand>) -> bool {
        if !self.auto_timer.fire_if_due(now_ms) {
            return false;
        }
        if self.state.auto_advance && self.state.is_playing {
            log::info!("[audio] auto-advance");
            self.next_track(out);
            return true;
        }
        false
    }

    /// Release everything. The player returns to `Uninitialized`.
    pub fn teardown(&mut self, out: &mut Vec<PlayerCommand>) {
        if self.phase == EnginePhase::Uninitialized && !self.analysis_running {
            return;
        }
        self.auto_timer.cancel();
        if self.analysis_running {
            self.analysis_running = false;
            out.push(PlayerCommand::StopAnalysis);
        }
        out.push(PlayerCommand::StopPlayback);
        out.push(PlayerCommand::Release);
        self.phase = EnginePhase::Uninitialized;
        self.state.is_playing = false;
        self.state.is_loading = false;
        self.resume_after_load = false;
        self.play_requested = false;
    }
}
