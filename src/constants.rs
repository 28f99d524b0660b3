// Element ids the page is expected to provide. Only the canvas is required;
// every other element is optional and silently skipped when absent.

pub const CANVAS_ID: &str = "viz-canvas";

pub const START_OVERLAY_ID: &str = "start-overlay";
pub const START_BUTTON_ID: &str = "start-button";

pub const CONTROLS_ID: &str = "controls";
pub const PREV_BUTTON_ID: &str = "btn-prev";
pub const PLAY_BUTTON_ID: &str = "btn-play";
pub const NEXT_BUTTON_ID: &str = "btn-next";
pub const TRACK_TITLE_ID: &str = "track-title";
pub const TRACK_ARTIST_ID: &str = "track-artist";

/// Class toggled on elements that should not be visible.
pub const HIDDEN_CLASS: &str = "hidden";
pub const PLAYING_CLASS: &str = "playing";
pub const LOADING_CLASS: &str = "loading";
