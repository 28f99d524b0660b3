// Host-side integration tests for playlist index wrapping.

use viz_core::{next_index, previous_index, DEFAULT_PLAYLIST};

#[test]
fn next_wraps_back_to_start_after_len_steps() {
    for len in 1..=12usize {
        for start in 0..len {
            let mut i = start;
            for _ in 0..len {
                i = next_index(i, len);
            }
            assert_eq!(i, start, "len {len} start {start}");
        }
    }
}

#[test]
fn previous_undoes_next() {
    for len in 1..=12usize {
        for i in 0..len {
            assert_eq!(previous_index(next_index(i, len), len), i);
            assert_eq!(next_index(previous_index(i, len), len), i);
        }
    }
}

#[test]
fn three_track_cycle() {
    let seq: Vec<usize> = std::iter::successors(Some(0usize), |&i| Some(next_index(i, 3)))
        .take(4)
        .collect();
    assert_eq!(seq, vec![0, 1, 2, 0]);
    assert_eq!(previous_index(0, 3), 2);
}

#[test]
fn empty_playlist_indices_stay_at_zero() {
    assert_eq!(next_index(0, 0), 0);
    assert_eq!(previous_index(0, 0), 0);
}

#[test]
fn default_playlist_is_well_formed() {
    assert_eq!(DEFAULT_PLAYLIST.len(), 8);
    for (i, t) in DEFAULT_PLAYLIST.iter().enumerate() {
        assert_eq!(t.id as usize, i + 1);
        assert!(!t.title.is_empty() && !t.artist.is_empty());
        assert!(t.source.ends_with(".mp3"));
        assert!(t.duration_secs > 0);
    }
}
