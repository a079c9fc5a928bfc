// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback facade: the one entry point callers use.
//!
//! A `Player` owns the voice pool, the mixer, and the song sequencer
//! for one playback timeline. Construct exactly one per output device
//! and hand it (or a reference) to whichever part of the application
//! drives playback; one player means one timeline, so independent call
//! sites can never create competing schedules.
//!
//! `play` and `stop` never return errors: song definitions are trusted
//! static data, and the failures playback can hit are absorbed and
//! logged (a structure entry naming a missing section is skipped with a
//! warning).

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::mixer::Mixer;
use crate::sequencer::SongSequencer;
use crate::song::SongDefinition;
use crate::transport::Transport;
use crate::voice::VoicePool;

/// Long-lived playback session: voice pool, mixer, and loop driver.
///
/// The pool is created once and kept warm; `stop` halts scheduling but
/// never tears voices down, so a following `play` restarts fast.
pub struct Player {
    voices: Arc<Mutex<VoicePool>>,
    mixer: Arc<Mutex<Mixer>>,
    sequencer: SongSequencer,
}

impl Player {
    /// Create a player over a voice pool and transport.
    ///
    /// Must be called within a tokio runtime; playback is driven by
    /// spawned timer continuations.
    pub fn new(pool: VoicePool, transport: Arc<dyn Transport>) -> Self {
        let voices = Arc::new(Mutex::new(pool));
        let mixer = Arc::new(Mutex::new(Mixer::new()));

        // Push initial levels so voices start at the mix balance.
        // Lock order is voices then mixer everywhere the two are held
        // together; the scheduling task acquires them the same way.
        if let (Ok(mut pool), Ok(mixer)) = (voices.lock(), mixer.lock()) {
            mixer.apply_all(&mut pool);
        }

        let sequencer =
            SongSequencer::new(Arc::clone(&voices), Arc::clone(&mixer), transport);

        Self {
            voices,
            mixer,
            sequencer,
        }
    }

    /// Start looping playback of a song, resetting any current timeline
    pub fn play(&mut self, song: &SongDefinition) {
        self.sequencer.play(song);
    }

    /// Stop playback; already-dispatched sounds finish naturally
    pub fn stop(&mut self) {
        self.sequencer.stop();
    }

    /// Whether a timeline is active
    pub fn is_playing(&self) -> bool {
        self.sequencer.is_playing()
    }

    /// Completed scheduling cycles on this player's timeline
    pub fn cycles(&self) -> u64 {
        self.sequencer.cycles()
    }

    /// Push a new volume (0.0 - 1.0) into the mix
    pub fn set_volume(&mut self, volume: f64) {
        // voices before mixer, matching the scheduling task
        let (Ok(mut voices), Ok(mut mixer)) = (self.voices.lock(), self.mixer.lock()) else {
            warn!("mix state poisoned, ignoring volume change");
            return;
        };
        mixer.set_volume(volume, &mut voices);
    }

    /// Push a new mute state into the mix
    pub fn set_mute(&mut self, muted: bool) {
        // voices before mixer, matching the scheduling task
        let (Ok(mut voices), Ok(mut mixer)) = (self.voices.lock(), self.mixer.lock()) else {
            warn!("mix state poisoned, ignoring mute change");
            return;
        };
        mixer.set_mute(muted, &mut voices);
    }
}
