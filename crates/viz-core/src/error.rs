use thiserror::Error;

/// Failure kinds surfaced by the audio side. None of them may stop the render
/// loop; callers log and carry on with the last known bands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VizError {
    /// The platform audio/analysis subsystem is unavailable. Fatal to the
    /// audio engine, reported once.
    #[error("audio initialization failed: {0}")]
    Initialization(String),

    /// A track source could not be fetched or decoded.
    #[error("failed to load '{locator}': {reason}")]
    Load { locator: String, reason: String },

    /// Autonomous playback start was rejected by the platform.
    #[error("playback blocked: {0}")]
    PlaybackBlocked(String),
}
