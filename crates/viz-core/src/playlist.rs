/// Immutable track descriptor. `duration_secs` is advisory metadata only;
/// natural end-of-stream drives advancement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: u32,
    pub title: &'static str,
    pub artist: &'static str,
    pub source: &'static str,
    pub duration_secs: u32,
}

pub const DEFAULT_PLAYLIST: &[Track] = &[
    Track {
        id: 1,
        title: "Floating Dreams",
        artist: "Ethereal Beats",
        source: "/assets/audio/track1.mp3",
        duration_secs: 180,
    },
    Track {
        id: 2,
        title: "Midnight Glow",
        artist: "Ambient Vibes",
        source: "/assets/audio/track2.mp3",
        duration_secs: 165,
    },
    Track {
        id: 3,
        title: "Purple Haze",
        artist: "Lo-Fi Collective",
        source: "/assets/audio/track3.mp3",
        duration_secs: 195,
    },
    Track {
        id: 4,
        title: "Ocean Waves",
        artist: "Chill Producer",
        source: "/assets/audio/track4.mp3",
        duration_secs: 210,
    },
    Track {
        id: 5,
        title: "Neon Nights",
        artist: "Synth Dreams",
        source: "/assets/audio/track5.mp3",
        duration_secs: 175,
    },
    Track {
        id: 6,
        title: "Velvet Sky",
        artist: "Mellow Tones",
        source: "/assets/audio/track6.mp3",
        duration_secs: 185,
    },
    Track {
        id: 7,
        title: "Golden Hour",
        artist: "Sunset Sounds",
        source: "/assets/audio/track7.mp3",
        duration_secs: 200,
    },
    Track {
        id: 8,
        title: "Space Drift",
        artist: "Cosmic Chill",
        source: "/assets/audio/track8.mp3",
        duration_secs: 190,
    },
];

#[inline]
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + 1) % len
}

#[inline]
pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current % len + len - 1) % len
}
