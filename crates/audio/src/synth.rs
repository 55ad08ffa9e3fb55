//! Procedural sources: the background loop and short effect tones.
//!
//! Everything here is plain sample generation, so it runs without an output device.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const SAMPLE_RATE: u32 = 44_100;

/// Background loop, one pitch per note.
pub const MUSIC_NOTES_HZ: [f32; 8] = [
    261.63, 329.63, 392.00, 523.25, 392.00, 329.63, 293.66, 349.23,
];
pub const MUSIC_NOTE_MS: u32 = 220;
pub const MUSIC_GAP_MS: u32 = 20;
pub const MUSIC_VOLUME: f32 = 0.25;

pub const LOCK_TONE: Tone = Tone::new(196.0, 80, 0.6);

pub const CLEAR_BASE_HZ: f32 = 329.63;
pub const TETRIS_BASE_HZ: f32 = 523.25;
pub const CLEAR_TONE_MS: u32 = 180;
pub const CLEAR_VOLUME: f32 = 0.5;

/// Fade in and out over this many samples to avoid clicks.
const RAMP_SAMPLES: u32 = SAMPLE_RATE / 200;

const fn ms_to_samples(ms: u32) -> u32 {
    SAMPLE_RATE / 1000 * ms
}

/// A fixed-pitch sine burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_hz: f32,
    pub duration_ms: u32,
    pub volume: f32,
}

impl Tone {
    pub const fn new(freq_hz: f32, duration_ms: u32, volume: f32) -> Self {
        Self {
            freq_hz,
            duration_ms,
            volume,
        }
    }

    pub fn source(self) -> ToneSource {
        ToneSource {
            tone: self,
            len: ms_to_samples(self.duration_ms),
            pos: 0,
        }
    }
}

/// Tones played in sequence for a clear of `count` rows. Four rows get a higher
/// three-step arpeggio; fewer get two steps.
pub fn line_clear_tones(count: u32) -> Vec<Tone> {
    let ratios: &[f32] = if count >= 4 {
        &[1.0, 1.25, 1.5]
    } else {
        &[1.0, 1.5]
    };
    let base = if count >= 4 {
        TETRIS_BASE_HZ
    } else {
        CLEAR_BASE_HZ
    };
    ratios
        .iter()
        .map(|r| Tone::new(base * r, CLEAR_TONE_MS, CLEAR_VOLUME))
        .collect()
}

fn envelope(pos: u32, len: u32) -> f32 {
    let ramp = RAMP_SAMPLES.min(len / 2).max(1);
    if pos < ramp {
        pos as f32 / ramp as f32
    } else if pos + ramp > len {
        len.saturating_sub(pos) as f32 / ramp as f32
    } else {
        1.0
    }
}

/// Finite mono source for one [`Tone`].
#[derive(Debug, Clone)]
pub struct ToneSource {
    tone: Tone,
    len: u32,
    pos: u32,
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.len {
            return None;
        }
        let t = self.pos as f32 / SAMPLE_RATE as f32;
        let sample = (TAU * self.tone.freq_hz * t).sin() * self.tone.volume * envelope(self.pos, self.len);
        self.pos += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.len - self.pos) as usize;
        (left, Some(left))
    }
}

impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.len - self.pos) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.tone.duration_ms as u64))
    }
}

/// Flags shared between the game thread and the mixer.
#[derive(Debug, Default)]
pub struct MusicControl {
    running: AtomicBool,
    paused: AtomicBool,
}

impl MusicControl {
    pub fn new_running() -> Arc<Self> {
        Arc::new(Self {
            running: AtomicBool::new(true),
            paused: AtomicBool::new(false),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Ends the loop; the source finishes on its next sample.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// Endless background loop. Emits silence while paused and ends once stopped.
#[derive(Debug, Clone)]
pub struct MusicLoop {
    control: Arc<MusicControl>,
    note: usize,
    pos: u32,
}

impl MusicLoop {
    pub fn new(control: Arc<MusicControl>) -> Self {
        Self {
            control,
            note: 0,
            pos: 0,
        }
    }

    pub fn current_note(&self) -> usize {
        self.note
    }
}

impl Iterator for MusicLoop {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if !self.control.is_running() {
            return None;
        }
        if self.control.is_paused() {
            return Some(0.0);
        }

        let tone_len = ms_to_samples(MUSIC_NOTE_MS);
        let note_len = tone_len + ms_to_samples(MUSIC_GAP_MS);

        let sample = if self.pos < tone_len {
            let t = self.pos as f32 / SAMPLE_RATE as f32;
            (TAU * MUSIC_NOTES_HZ[self.note] * t).sin() * MUSIC_VOLUME * envelope(self.pos, tone_len)
        } else {
            0.0
        };

        self.pos += 1;
        if self.pos >= note_len {
            self.pos = 0;
            self.note = (self.note + 1) % MUSIC_NOTES_HZ.len();
        }
        Some(sample)
    }
}

impl rodio::Source for MusicLoop {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_tone_has_expected_length_and_peak() {
        let samples: Vec<f32> = LOCK_TONE.source().collect();
        assert_eq!(samples.len(), ms_to_samples(80) as usize);
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= 0.6 + f32::EPSILON);
        assert!(peak > 0.5);
    }

    #[test]
    fn clear_tones_for_small_and_four_row_clears() {
        let two = line_clear_tones(2);
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].freq_hz, CLEAR_BASE_HZ);
        assert!((two[1].freq_hz - CLEAR_BASE_HZ * 1.5).abs() < 1e-3);

        let four = line_clear_tones(4);
        assert_eq!(four.len(), 3);
        assert_eq!(four[0].freq_hz, TETRIS_BASE_HZ);
        assert!((four[1].freq_hz - TETRIS_BASE_HZ * 1.25).abs() < 1e-3);
        assert!(four.iter().all(|t| t.duration_ms == 180 && t.volume == 0.5));
    }

    #[test]
    fn music_advances_after_note_and_gap() {
        let control = MusicControl::new_running();
        let mut music = MusicLoop::new(control);
        let note_len = ms_to_samples(MUSIC_NOTE_MS + MUSIC_GAP_MS) as usize;

        let first: Vec<f32> = music.by_ref().take(note_len).collect();
        assert_eq!(first.len(), note_len);
        assert_eq!(music.current_note(), 1);

        // Gap samples are silent.
        let gap = ms_to_samples(MUSIC_GAP_MS) as usize;
        assert!(first[note_len - gap..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn music_is_silent_while_paused_and_ends_when_stopped() {
        let control = MusicControl::new_running();
        let mut music = MusicLoop::new(Arc::clone(&control));
        music.by_ref().take(500).for_each(drop);

        control.set_paused(true);
        assert!(music.by_ref().take(1000).all(|s| s == 0.0));

        control.set_paused(false);
        assert!(music.next().is_some());

        control.stop();
        assert_eq!(music.next(), None);
    }
}
