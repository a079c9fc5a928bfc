// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song sequencer: the looping playback driver.
//!
//! Walks the song structure once per cycle, scheduling every section
//! back-to-back against future timestamps, then arms a one-shot timer
//! for the delay until the cycle's actual end. Deriving the restart
//! delay from the computed end time (rather than an assumed cycle
//! length) keeps scheduling latency from compounding across loop
//! iterations.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::section::schedule_section;
use super::{LEAD_IN_SECS, SAFETY_MARGIN_SECS};
use crate::mixer::Mixer;
use crate::song::SongDefinition;
use crate::transport::Transport;
use crate::voice::VoicePool;

/// State shared between the driver handle and its continuation task
struct Shared {
    /// Whether playback is active; continuations check this before
    /// doing any further scheduling work
    playing: AtomicBool,
    /// Number of completed scheduling passes through the structure
    cycles: AtomicU64,
}

/// The looping playback driver.
///
/// One sequencer owns one timeline: calling `play` while already
/// playing resets the chain instead of starting a competing one.
/// `play` must be called from within a tokio runtime.
pub struct SongSequencer {
    transport: Arc<dyn Transport>,
    voices: Arc<Mutex<VoicePool>>,
    mixer: Arc<Mutex<Mixer>>,
    shared: Arc<Shared>,
    /// Pending continuation chain, if playing
    task: Option<JoinHandle<()>>,
}

impl SongSequencer {
    /// Create an idle sequencer over a voice pool and transport
    pub fn new(
        voices: Arc<Mutex<VoicePool>>,
        mixer: Arc<Mutex<Mixer>>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            voices,
            mixer,
            shared: Arc::new(Shared {
                playing: AtomicBool::new(false),
                cycles: AtomicU64::new(0),
            }),
            task: None,
        }
    }

    /// Start looping playback of a song.
    ///
    /// If already playing, the pending continuation is cancelled first;
    /// repeated calls are idempotent resets, never overlapping
    /// timelines. Sounds already dispatched are not retracted.
    pub fn play(&mut self, song: &SongDefinition) {
        self.stop();

        self.transport.set_tempo(song.tempo_or_default());
        self.transport.start();
        self.shared.playing.store(true, Ordering::SeqCst);

        debug!(song = %song.name, tempo = song.tempo_or_default(), "starting playback");

        let song = song.clone();
        let transport = Arc::clone(&self.transport);
        let voices = Arc::clone(&self.voices);
        let mixer = Arc::clone(&self.mixer);
        let shared = Arc::clone(&self.shared);
        self.task = Some(tokio::spawn(run_loop(
            song, transport, voices, mixer, shared,
        )));
    }

    /// Stop playback: cancel the pending continuation and halt the
    /// transport. Already-dispatched sounds finish naturally.
    pub fn stop(&mut self) {
        self.shared.playing.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.transport.stop();
    }

    /// Whether a continuation chain is active
    pub fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::SeqCst)
    }

    /// Completed scheduling cycles since this sequencer was created
    pub fn cycles(&self) -> u64 {
        self.shared.cycles.load(Ordering::SeqCst)
    }
}

impl Drop for SongSequencer {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// One playback chain: schedule a full cycle, sleep until its end, repeat
async fn run_loop(
    song: SongDefinition,
    transport: Arc<dyn Transport>,
    voices: Arc<Mutex<VoicePool>>,
    mixer: Arc<Mutex<Mixer>>,
    shared: Arc<Shared>,
) {
    // The first cycle gets a small lead-in so the synthesis backend has
    // time to come up; continuations schedule from the current clock,
    // which the restart delay has already placed just past the previous
    // cycle's end.
    let mut lead_in = LEAD_IN_SECS;

    loop {
        if !shared.playing.load(Ordering::SeqCst) {
            return;
        }

        let cycle_start = transport.now() + lead_in;
        lead_in = 0.0;

        let cycle_end = {
            // voices before mixer, the one lock order used crate-wide
            let (Ok(mut voices), Ok(mut mixer)) = (voices.lock(), mixer.lock()) else {
                warn!("voice pool state poisoned, halting playback");
                shared.playing.store(false, Ordering::SeqCst);
                transport.stop();
                return;
            };

            let mut cursor = cycle_start;
            for name in &song.structure {
                match song.sections.get(name) {
                    Some(section) => {
                        cursor = schedule_section(
                            section,
                            cursor,
                            transport.as_ref(),
                            &mut voices,
                            &mut mixer,
                        );
                    }
                    None => {
                        warn!(
                            song = %song.name,
                            section = %name,
                            "structure references unknown section, skipping"
                        );
                    }
                }
            }
            cursor
        };

        let cycle = shared.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = cycle_end - transport.now() + SAFETY_MARGIN_SECS;
        debug!(cycle, end = cycle_end, delay, "cycle scheduled");

        // A cycle that scheduled nothing still waits the safety margin,
        // otherwise an all-empty song would respin without yielding
        tokio::time::sleep(Duration::from_secs_f64(delay.max(SAFETY_MARGIN_SECS))).await;
    }
}
