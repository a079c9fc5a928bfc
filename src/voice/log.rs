// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Logging voice backend.
//!
//! Emits every instruction as a tracing event instead of producing
//! sound. Used by the CLI demo and by callers that want to inspect a
//! schedule without a synthesis stack.

use tracing::debug;

use super::{Envelope, OscillatorKind, Voice, VoiceRole};
use crate::song::Pitch;

/// A voice that logs instructions instead of synthesizing
pub struct LogVoice {
    role: VoiceRole,
    level_db: f64,
}

impl LogVoice {
    /// Create a logging voice for a role
    pub fn new(role: VoiceRole) -> Self {
        Self {
            role,
            level_db: 0.0,
        }
    }

    /// Current output level in dB
    pub fn level_db(&self) -> f64 {
        self.level_db
    }
}

impl Voice for LogVoice {
    fn trigger(&mut self, pitches: Option<&[Pitch]>, duration_secs: f64, at_secs: f64) {
        match pitches {
            Some(pitches) => {
                let names: Vec<String> = pitches.iter().map(|p| p.name()).collect();
                debug!(
                    voice = self.role.name(),
                    pitches = %names.join("+"),
                    duration = duration_secs,
                    at = at_secs,
                    "trigger"
                );
            }
            None => {
                debug!(
                    voice = self.role.name(),
                    duration = duration_secs,
                    at = at_secs,
                    "trigger (unpitched)"
                );
            }
        }
    }

    fn set_level_db(&mut self, db: f64) {
        self.level_db = db;
        debug!(voice = self.role.name(), level_db = db, "set level");
    }

    fn set_oscillator(&mut self, kind: OscillatorKind) {
        debug!(voice = self.role.name(), oscillator = ?kind, "set oscillator");
    }

    fn set_envelope(&mut self, envelope: &Envelope) {
        debug!(
            voice = self.role.name(),
            attack = envelope.attack,
            decay = envelope.decay,
            sustain = envelope.sustain,
            release = envelope.release,
            "set envelope"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_voice_tracks_level() {
        let mut voice = LogVoice::new(VoiceRole::Lead);
        voice.set_level_db(-6.0);
        assert_eq!(voice.level_db(), -6.0);

        voice.set_level_db(f64::NEG_INFINITY);
        assert!(voice.level_db().is_infinite());
    }
}
