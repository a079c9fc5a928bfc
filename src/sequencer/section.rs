// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Section scheduler.
//!
//! Turns one section's per-instrument event lists into absolute-time
//! trigger instructions against the voice pool, and reports where the
//! section ends so the next one can start there.

use std::slice;

use tracing::trace;

use super::drums::{generate_pattern, pattern_span};
use crate::mixer::Mixer;
use crate::song::{DrumIntensity, Event, InstrumentOverride, Section, TrackId};
use crate::transport::Transport;
use crate::voice::{Envelope, VoicePool};

/// Schedule every event in a section starting at `start_secs`.
///
/// Overrides are applied before any event dispatch so they take effect
/// atomically at the section boundary. A section tempo override is
/// pushed to the transport and stays in effect for later sections until
/// one of them sets its own tempo.
///
/// Returns the section end time: `start_secs` plus the longest track
/// duration (including the derived drum track). The drum pattern is
/// sized from the longest melodic/harmonic track; unpitched tracks
/// count toward the section end but not the drum grid. A section with
/// no tracks and no drum pattern returns `start_secs` unchanged.
pub fn schedule_section(
    section: &Section,
    start_secs: f64,
    transport: &dyn Transport,
    voices: &mut VoicePool,
    mixer: &mut Mixer,
) -> f64 {
    if let Some(bpm) = section.tempo {
        transport.set_tempo(bpm);
    }
    let bpm = transport.tempo();

    apply_overrides(section, voices, mixer);

    let mut end = start_secs;
    let mut melodic_end = start_secs;
    for id in TrackId::ALL {
        let events = section.track(id);
        if events.is_empty() {
            continue;
        }
        let cursor = dispatch_track(id, events, start_secs, bpm, voices);
        end = end.max(cursor);
        if id.is_pitched() {
            melodic_end = melodic_end.max(cursor);
        }
    }

    if section.drums != DrumIntensity::None {
        // The drum grid is sized from the melodic/harmonic tracks only;
        // unpitched texture tracks do not widen the pattern
        let melodic_span = melodic_end - start_secs;
        for hit in generate_pattern(melodic_span, section.drums, bpm) {
            let voice = voices.voice_mut(hit.role);
            voice.trigger(
                hit.pitch.as_ref().map(slice::from_ref),
                hit.duration_secs,
                start_secs + hit.offset_secs,
            );
        }
        end = end.max(start_secs + pattern_span(melodic_span, bpm));
    }

    trace!(start = start_secs, end, "section scheduled");
    end
}

/// Apply per-instrument configuration overrides to the voices
fn apply_overrides(section: &Section, voices: &mut VoicePool, mixer: &mut Mixer) {
    for id in TrackId::ALL {
        let Some(ov) = section.overrides.get(&id) else {
            continue;
        };
        let role = id.voice_role();
        if let Some(kind) = ov.oscillator {
            voices.voice_mut(role).set_oscillator(kind);
        }
        if ov.has_envelope() {
            let env = override_envelope(ov);
            voices.voice_mut(role).set_envelope(&env);
        }
        if let Some(db) = ov.volume_db {
            mixer.apply_instrument_override(role, db, voices);
        }
    }
}

/// Build the envelope an override describes, defaulting unset fields
fn override_envelope(ov: &InstrumentOverride) -> Envelope {
    let mut env = Envelope::default();
    if let Some(attack) = ov.attack {
        env.attack = attack;
    }
    if let Some(decay) = ov.decay {
        env.decay = decay;
    }
    if let Some(sustain) = ov.sustain {
        env.sustain = sustain;
    }
    if let Some(release) = ov.release {
        env.release = release;
    }
    env
}

/// Walk one track's events, dispatching sounds and advancing the local
/// cursor. Returns the cursor's final position.
fn dispatch_track(
    id: TrackId,
    events: &[Event],
    start_secs: f64,
    bpm: f64,
    voices: &mut VoicePool,
) -> f64 {
    let voice = voices.voice_mut(id.voice_role());
    let mut cursor = start_secs;

    for event in events {
        let duration = event.length().seconds(bpm);
        match event {
            Event::Note { note, .. } => {
                if id.is_pitched() {
                    voice.trigger(Some(slice::from_ref(note)), duration, cursor);
                } else {
                    voice.trigger(None, duration, cursor);
                }
            }
            Event::Chord { chord, .. } => {
                if id.is_pitched() {
                    voice.trigger(Some(chord.as_slice()), duration, cursor);
                } else {
                    voice.trigger(None, duration, cursor);
                }
            }
            Event::Rest { .. } => {}
        }
        cursor += duration;
    }

    cursor
}
