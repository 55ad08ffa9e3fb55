//! Procedural sound for the game, played through `rodio`.
//!
//! [`ProceduralAudio`] reacts to [`GameEvent`]s: it runs the background loop while a
//! game is in progress and fires short tones on locks and line clears. When no
//! output device can be opened the handle is disabled and every call is a no-op.
//!
//! The rodio output stream is not `Send`, so the handle lives on the thread that
//! created it.

pub mod synth;

use std::sync::Arc;

use anyhow::Result;
use rodio::{OutputStream, OutputStreamHandle, Sink};

pub use classic_tetris_types as types;
use crate::types::GameEvent;

pub use synth::{line_clear_tones, MusicControl, MusicLoop, Tone, ToneSource, LOCK_TONE};

/// What [`ProceduralAudio::handle_event`] should do for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    StartMusic,
    PauseMusic,
    ResumeMusic,
    StopMusic,
    Lock,
    LineClear(u32),
}

/// Sound reaction for `event`, if any.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match *event {
        GameEvent::Started => Some(Cue::StartMusic),
        GameEvent::Paused => Some(Cue::PauseMusic),
        GameEvent::Resumed => Some(Cue::ResumeMusic),
        GameEvent::GameOver { .. } => Some(Cue::StopMusic),
        GameEvent::Locked => Some(Cue::Lock),
        GameEvent::LinesCleared { count, .. } => Some(Cue::LineClear(count)),
        GameEvent::NextPiece(_) => None,
    }
}

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<(Sink, Arc<MusicControl>)>,
}

impl Output {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }

    /// Queue `tones` back to back on a fresh detached sink.
    fn play(&self, tones: &[Tone]) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        for tone in tones {
            sink.append(tone.source());
        }
        sink.detach();
    }
}

/// Game audio. Cheap to construct disabled; see [`ProceduralAudio::disabled`].
pub struct ProceduralAudio {
    output: Option<Output>,
}

impl ProceduralAudio {
    /// Open the default output device, or fall back to a silent handle.
    pub fn new() -> Self {
        Self {
            output: Output::open().ok(),
        }
    }

    pub fn disabled() -> Self {
        Self { output: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn is_music_playing(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.music.as_ref())
            .is_some_and(|(_, control)| control.is_running() && !control.is_paused())
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        match cue_for(event) {
            Some(Cue::StartMusic) => self.start_music(),
            Some(Cue::PauseMusic) => self.pause_music(),
            Some(Cue::ResumeMusic) => self.resume_music(),
            Some(Cue::StopMusic) => self.stop_music(),
            Some(Cue::Lock) => self.play_lock(),
            Some(Cue::LineClear(count)) => self.play_line_clear(count),
            None => {}
        }
    }

    /// Start the loop, or resume it if it already exists.
    pub fn start_music(&mut self) {
        let Some(output) = self.output.as_mut() else {
            return;
        };
        if let Some((_, control)) = output.music.as_ref() {
            if control.is_running() {
                control.set_paused(false);
                return;
            }
        }

        let Ok(sink) = Sink::try_new(&output.handle) else {
            return;
        };
        let control = MusicControl::new_running();
        sink.append(MusicLoop::new(Arc::clone(&control)));
        output.music = Some((sink, control));
    }

    pub fn pause_music(&mut self) {
        if let Some((_, control)) = self.music() {
            control.set_paused(true);
        }
    }

    pub fn resume_music(&mut self) {
        if let Some((_, control)) = self.music() {
            control.set_paused(false);
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(output) = self.output.as_mut() {
            if let Some((sink, control)) = output.music.take() {
                control.stop();
                sink.stop();
            }
        }
    }

    pub fn play_lock(&self) {
        if let Some(output) = self.output.as_ref() {
            output.play(&[LOCK_TONE]);
        }
    }

    pub fn play_line_clear(&self, count: u32) {
        if let Some(output) = self.output.as_ref() {
            output.play(&line_clear_tones(count));
        }
    }

    fn music(&self) -> Option<&(Sink, Arc<MusicControl>)> {
        self.output.as_ref().and_then(|o| o.music.as_ref())
    }
}

impl Default for ProceduralAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProceduralAudio {
    fn drop(&mut self) {
        self.stop_music();
    }
}
