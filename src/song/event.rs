// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Track events: notes, chords, and rests.
//!
//! Events within one track are strictly sequential and non-overlapping;
//! a track's total duration is the sum of its events' resolved durations.

use serde::{Deserialize, Serialize};

use super::pitch::{NoteLength, Pitch};

/// One entry in an instrument track's event list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Event {
    /// A single pitch held for a duration
    Note {
        /// Pitch to play
        note: Pitch,
        /// How long to hold it
        length: NoteLength,
    },
    /// Several pitches triggered simultaneously (polyphonic tracks only)
    Chord {
        /// Pitches to play together
        chord: Vec<Pitch>,
        /// How long to hold them
        length: NoteLength,
    },
    /// Silence that still consumes its duration on the track timeline
    Rest {
        /// How long to stay silent
        rest: NoteLength,
    },
}

impl Event {
    /// Create a note event
    pub fn note(note: Pitch, length: NoteLength) -> Self {
        Event::Note { note, length }
    }

    /// Create a chord event
    pub fn chord(pitches: impl Into<Vec<Pitch>>, length: NoteLength) -> Self {
        Event::Chord {
            chord: pitches.into(),
            length,
        }
    }

    /// Create a rest event
    pub fn rest(length: NoteLength) -> Self {
        Event::Rest { rest: length }
    }

    /// The event's musical length
    pub fn length(&self) -> NoteLength {
        match self {
            Event::Note { length, .. } => *length,
            Event::Chord { length, .. } => *length,
            Event::Rest { rest } => *rest,
        }
    }

    /// Whether this event produces sound
    pub fn is_sounding(&self) -> bool {
        !matches!(self, Event::Rest { .. })
    }
}
