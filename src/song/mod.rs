// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song definitions: the declarative description of a piece of music.
//!
//! This module provides:
//! - Pitch and note length types
//! - Track events (notes, chords, rests)
//! - Sections: named, reusable blocks of per-instrument material
//! - Song definitions: a section map plus an ordered structure, loopable
//!
//! Song definitions are static data loaded from YAML files; they are
//! never mutated during playback.

pub mod event;
pub mod pitch;

pub use event::Event;
pub use pitch::{NoteLength, Pitch, PitchError};

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::voice::{OscillatorKind, VoiceRole};

/// Default song tempo in beats per minute
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Identifier for one instrument track within a section.
///
/// The variant order here is the fixed dispatch order used by the
/// section scheduler, so simultaneous-timestamp dispatch is
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackId {
    /// Lead melody line
    Melody,
    /// Bass line
    Bass,
    /// Sustained harmony (polyphonic)
    Chords,
    /// Arpeggiated figures
    Arpeggio,
    /// Effects/texture line
    Fx,
    /// Unpitched noise hits
    Noise,
    /// Metallic percussion hits
    Metal,
    /// Amplitude-modulated voice
    Am,
    /// Dual-oscillator voice
    Duo,
}

impl TrackId {
    /// All track identifiers in dispatch order
    pub const ALL: [TrackId; 9] = [
        TrackId::Melody,
        TrackId::Bass,
        TrackId::Chords,
        TrackId::Arpeggio,
        TrackId::Fx,
        TrackId::Noise,
        TrackId::Metal,
        TrackId::Am,
        TrackId::Duo,
    ];

    /// The synthesis voice this track dispatches to
    pub fn voice_role(self) -> VoiceRole {
        match self {
            TrackId::Melody => VoiceRole::Lead,
            TrackId::Bass => VoiceRole::Bass,
            TrackId::Chords => VoiceRole::Pad,
            TrackId::Arpeggio => VoiceRole::Pluck,
            TrackId::Fx => VoiceRole::Fm,
            TrackId::Noise => VoiceRole::Noise,
            TrackId::Metal => VoiceRole::Metal,
            TrackId::Am => VoiceRole::Am,
            TrackId::Duo => VoiceRole::Duo,
        }
    }

    /// Whether events on this track carry pitches.
    ///
    /// Unpitched tracks dispatch duration-only instructions.
    pub fn is_pitched(self) -> bool {
        !matches!(self, TrackId::Noise | TrackId::Metal)
    }

    /// Track name as it appears in song files
    pub fn name(self) -> &'static str {
        match self {
            TrackId::Melody => "melody",
            TrackId::Bass => "bass",
            TrackId::Chords => "chords",
            TrackId::Arpeggio => "arpeggio",
            TrackId::Fx => "fx",
            TrackId::Noise => "noise",
            TrackId::Metal => "metal",
            TrackId::Am => "am",
            TrackId::Duo => "duo",
        }
    }
}

/// Drum pattern intensity for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrumIntensity {
    /// No percussion
    #[default]
    None,
    /// Kick and snare backbeat
    Simple,
    /// Backbeat plus off-beat hats
    Complex,
    /// Double kick, eighth-note hats, extra snare
    Heavy,
}

/// Per-instrument configuration override, applied at a section boundary.
///
/// All fields are optional; unset fields leave the voice as it was.
/// Overrides are volatile: they persist past the section that set them
/// until some later section overwrites them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstrumentOverride {
    /// Oscillator shape for the voice
    #[serde(default)]
    pub oscillator: Option<OscillatorKind>,
    /// Output level offset in dB, layered onto the mix level
    #[serde(default)]
    pub volume_db: Option<f64>,
    /// Envelope attack in seconds
    #[serde(default)]
    pub attack: Option<f64>,
    /// Envelope decay in seconds
    #[serde(default)]
    pub decay: Option<f64>,
    /// Envelope sustain level (0.0 - 1.0)
    #[serde(default)]
    pub sustain: Option<f64>,
    /// Envelope release in seconds
    #[serde(default)]
    pub release: Option<f64>,
}

impl InstrumentOverride {
    /// Whether any envelope field is set
    pub fn has_envelope(&self) -> bool {
        self.attack.is_some()
            || self.decay.is_some()
            || self.sustain.is_some()
            || self.release.is_some()
    }
}

/// A named, reusable block of per-instrument musical material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Lead melody events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub melody: Vec<Event>,
    /// Bass events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bass: Vec<Event>,
    /// Chord events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chords: Vec<Event>,
    /// Arpeggio events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arpeggio: Vec<Event>,
    /// Effects events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fx: Vec<Event>,
    /// Noise hits (unpitched; note values are ignored)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub noise: Vec<Event>,
    /// Metallic hits (unpitched)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metal: Vec<Event>,
    /// AM voice events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub am: Vec<Event>,
    /// Duo voice events
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duo: Vec<Event>,
    /// Drum pattern intensity for the derived drum track
    #[serde(default)]
    pub drums: DrumIntensity,
    /// Tempo override in BPM, in effect from this section onward
    #[serde(default)]
    pub tempo: Option<f64>,
    /// Per-instrument configuration overrides
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overrides: HashMap<TrackId, InstrumentOverride>,
}

impl Section {
    /// Get the event list for a track
    pub fn track(&self, id: TrackId) -> &[Event] {
        match id {
            TrackId::Melody => &self.melody,
            TrackId::Bass => &self.bass,
            TrackId::Chords => &self.chords,
            TrackId::Arpeggio => &self.arpeggio,
            TrackId::Fx => &self.fx,
            TrackId::Noise => &self.noise,
            TrackId::Metal => &self.metal,
            TrackId::Am => &self.am,
            TrackId::Duo => &self.duo,
        }
    }

    /// Whether the section has no events on any track
    pub fn is_empty(&self) -> bool {
        TrackId::ALL.iter().all(|id| self.track(*id).is_empty())
    }
}

/// A complete declarative song: sections plus the order to play them in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDefinition {
    /// Song name, used in logs
    #[serde(default)]
    pub name: String,
    /// Named sections
    pub sections: HashMap<String, Section>,
    /// Ordered section names; names may repeat, the whole list loops
    pub structure: Vec<String>,
    /// Song-level tempo in BPM (120 if absent)
    #[serde(default)]
    pub tempo: Option<f64>,
}

impl SongDefinition {
    /// Load a song definition from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read song file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a song definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML song definition")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize song definition to YAML")
    }

    /// Save to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write song file: {:?}", path.as_ref()))
    }

    /// Effective song tempo
    pub fn tempo_or_default(&self) -> f64 {
        self.tempo.unwrap_or(DEFAULT_TEMPO)
    }

    /// Check the definition for problems that playback would work around.
    ///
    /// Returns human-readable warnings; an unresolved structure name is a
    /// warning rather than an error because playback skips it.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.structure.is_empty() {
            warnings.push("structure is empty; playback will produce no sound".to_string());
        }

        for name in &self.structure {
            if !self.sections.contains_key(name) {
                warnings.push(format!(
                    "structure references unknown section {:?}; it will be skipped",
                    name
                ));
            }
        }

        for (name, section) in &self.sections {
            if section.is_empty() && section.drums == DrumIntensity::None {
                warnings.push(format!("section {:?} is empty", name));
            }
        }

        warnings
    }

    /// Built-in demo song, used by the CLI and as a format example.
    /// Parses embedded YAML, so callers propagate like any other load.
    pub fn demo() -> Result<Self> {
        Self::from_yaml(DEMO_SONG_YAML).context("parsing built-in demo song")
    }
}

/// YAML source for the built-in demo song
const DEMO_SONG_YAML: &str = r#"
name: demo
tempo: 120
structure: [intro, groove, groove, bridge, groove]
sections:
  intro:
    melody:
      - { note: C4, length: quarter }
      - { note: E4, length: quarter }
      - { note: G4, length: quarter }
      - { rest: quarter }
    chords:
      - { chord: [C3, E3, G3], length: whole }
  groove:
    melody:
      - { note: C4, length: eighth }
      - { note: D4, length: eighth }
      - { note: E4, length: quarter }
      - { rest: eighth }
      - { note: G4, length: eighth }
      - { note: E4, length: quarter }
    bass:
      - { note: C2, length: half }
      - { note: G2, length: half }
    drums: simple
  bridge:
    tempo: 100
    chords:
      - { chord: [A2, C3, E3], length: half }
      - { chord: [F2, A2, C3], length: half }
    arpeggio:
      - { note: A4, length: sixteenth }
      - { note: C5, length: sixteenth }
      - { note: E5, length: sixteenth }
      - { note: A5, length: sixteenth }
      - { rest: quarter }
      - { rest: half }
    drums: complex
    overrides:
      chords: { oscillator: triangle, volume_db: -2.0 }
"#;
