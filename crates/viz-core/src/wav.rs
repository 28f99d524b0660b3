//! In-memory silent WAV used as the fallback source when a track fails to load.

/// 8-bit unsigned PCM is centred on 128.
const SILENCE_U8: u8 = 0x80;
const HEADER_LEN: usize = 44;

/// Build a mono 8-bit PCM RIFF/WAVE file containing `seconds` of silence.
pub fn silent_wav(seconds: f32, sample_rate: u32) -> Vec<u8> {
    let samples = (seconds.max(0.0) * sample_rate as f32).round() as u32;
    let mut out = Vec::with_capacity(HEADER_LEN + samples as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + samples).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // format: PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // channels
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes()); // byte rate
    out.extend_from_slice(&1u16.to_le_bytes()); // block align
    out.extend_from_slice(&8u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&samples.to_le_bytes());
    out.resize(HEADER_LEN + samples as usize, SILENCE_U8);
    out
}
