// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch and musical note length types.
//!
//! Pitches are stored as MIDI note numbers and written in song files
//! as scientific pitch names ("C4", "F#2", "Bb3"). Note lengths are
//! musical durations resolved to seconds against a tempo.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Note names for display, sharps preferred
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Error parsing a pitch name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// Not a recognizable note name
    #[error("invalid pitch name: {0:?}")]
    InvalidName(String),
    /// Parsed fine but lands outside the MIDI range
    #[error("pitch out of range: {0:?}")]
    OutOfRange(String),
}

/// A pitch, stored as a MIDI note number (0-127)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pitch(u8);

impl Pitch {
    /// Create a pitch from a raw MIDI note number
    pub const fn from_midi(note: u8) -> Self {
        Self(note)
    }

    /// Get the MIDI note number
    pub fn midi(self) -> u8 {
        self.0
    }

    /// Get the note name in scientific pitch notation
    pub fn name(self) -> String {
        let octave = self.0 as i32 / 12 - 1;
        let semitone = self.0 as usize % 12;
        format!("{}{}", NOTE_NAMES[semitone], octave)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .ok_or_else(|| PitchError::InvalidName(s.to_string()))?;

        let base: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(PitchError::InvalidName(s.to_string())),
        };

        let rest: String = chars.collect();
        let (accidental, octave_str) = match rest.chars().next() {
            Some('#') => (1, &rest[1..]),
            Some('b') => (-1, &rest[1..]),
            _ => (0, rest.as_str()),
        };

        let octave: i32 = octave_str
            .parse()
            .map_err(|_| PitchError::InvalidName(s.to_string()))?;

        let midi = (octave + 1) * 12 + base + accidental;
        if !(0..=127).contains(&midi) {
            return Err(PitchError::OutOfRange(s.to_string()));
        }

        Ok(Self(midi as u8))
    }
}

impl TryFrom<String> for Pitch {
    type Error = PitchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.name()
    }
}

/// A musical note length, resolved to seconds via the current tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteLength {
    /// Four beats
    Whole,
    /// Two beats
    Half,
    /// One beat
    Quarter,
    /// Half a beat
    Eighth,
    /// Quarter of a beat
    Sixteenth,
    /// Eighth of a beat
    ThirtySecond,
}

impl NoteLength {
    /// Length in quarter-note beats
    pub fn beats(self) -> f64 {
        match self {
            NoteLength::Whole => 4.0,
            NoteLength::Half => 2.0,
            NoteLength::Quarter => 1.0,
            NoteLength::Eighth => 0.5,
            NoteLength::Sixteenth => 0.25,
            NoteLength::ThirtySecond => 0.125,
        }
    }

    /// Resolve to seconds at the given tempo
    pub fn seconds(self, bpm: f64) -> f64 {
        self.beats() * 60.0 / bpm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_parse_natural() {
        let p: Pitch = "C4".parse().unwrap();
        assert_eq!(p.midi(), 60);

        let p: Pitch = "A4".parse().unwrap();
        assert_eq!(p.midi(), 69);
    }

    #[test]
    fn test_pitch_parse_accidentals() {
        let sharp: Pitch = "F#2".parse().unwrap();
        assert_eq!(sharp.midi(), 42);

        let flat: Pitch = "Bb3".parse().unwrap();
        assert_eq!(flat.midi(), 58);

        // Enharmonic pair
        let gb: Pitch = "Gb2".parse().unwrap();
        assert_eq!(gb.midi(), sharp.midi());
    }

    #[test]
    fn test_pitch_parse_low_octave() {
        let p: Pitch = "C-1".parse().unwrap();
        assert_eq!(p.midi(), 0);

        let p: Pitch = "C1".parse().unwrap();
        assert_eq!(p.midi(), 24);
    }

    #[test]
    fn test_pitch_parse_invalid() {
        assert!("".parse::<Pitch>().is_err());
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C".parse::<Pitch>().is_err());
        assert!("C99".parse::<Pitch>().is_err());
    }

    #[test]
    fn test_pitch_display_round_trip() {
        for name in ["C4", "F#2", "A0", "G9"] {
            let p: Pitch = name.parse().unwrap();
            assert_eq!(p.name(), name.to_string());
        }
    }

    #[test]
    fn test_note_length_seconds() {
        // At 120 BPM a quarter note is 0.5s
        assert_eq!(NoteLength::Quarter.seconds(120.0), 0.5);
        assert_eq!(NoteLength::Whole.seconds(120.0), 2.0);
        assert_eq!(NoteLength::Eighth.seconds(120.0), 0.25);

        // At 60 BPM a quarter note is a full second
        assert_eq!(NoteLength::Quarter.seconds(60.0), 1.0);
    }

    #[test]
    fn test_note_length_serde_names() {
        let l: NoteLength = serde_yaml::from_str("quarter").unwrap();
        assert_eq!(l, NoteLength::Quarter);
        let l: NoteLength = serde_yaml::from_str("thirtysecond").unwrap();
        assert_eq!(l, NoteLength::ThirtySecond);
    }
}
