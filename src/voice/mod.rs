// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Voice capability interface and the process-wide voice pool.
//!
//! A voice is one independently triggerable synthesis channel. The engine
//! makes no assumption about how a voice produces sound, only that
//! absolute trigger times are honored against a shared clock and that a
//! level of negative infinity dB means silence.

pub mod log;

pub use log::LogVoice;

use serde::{Deserialize, Serialize};

use crate::song::Pitch;

/// The ten named voice roles in the pool, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceRole {
    /// Lead melodic voice
    Lead,
    /// Bass voice
    Bass,
    /// Sustained polyphonic pad
    Pad,
    /// Short plucked voice
    Pluck,
    /// FM synthesis voice
    Fm,
    /// Unpitched noise voice
    Noise,
    /// Membrane percussion (kick/snare proxies)
    Membrane,
    /// Metallic percussion (hats)
    Metal,
    /// Amplitude-modulated voice
    Am,
    /// Dual-oscillator voice
    Duo,
}

impl VoiceRole {
    /// Every role, in pool order
    pub const ALL: [VoiceRole; 10] = [
        VoiceRole::Lead,
        VoiceRole::Bass,
        VoiceRole::Pad,
        VoiceRole::Pluck,
        VoiceRole::Fm,
        VoiceRole::Noise,
        VoiceRole::Membrane,
        VoiceRole::Metal,
        VoiceRole::Am,
        VoiceRole::Duo,
    ];

    /// Role name for logs and the CLI
    pub fn name(self) -> &'static str {
        match self {
            VoiceRole::Lead => "lead",
            VoiceRole::Bass => "bass",
            VoiceRole::Pad => "pad",
            VoiceRole::Pluck => "pluck",
            VoiceRole::Fm => "fm",
            VoiceRole::Noise => "noise",
            VoiceRole::Membrane => "membrane",
            VoiceRole::Metal => "metal",
            VoiceRole::Am => "am",
            VoiceRole::Duo => "duo",
        }
    }
}

/// Oscillator shape for a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorKind {
    /// Sine wave
    Sine,
    /// Square wave
    Square,
    /// Sawtooth wave
    Sawtooth,
    /// Triangle wave
    Triangle,
}

/// ADSR envelope settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Attack time in seconds
    pub attack: f64,
    /// Decay time in seconds
    pub decay: f64,
    /// Sustain level (0.0 - 1.0)
    pub sustain: f64,
    /// Release time in seconds
    pub release: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.3,
        }
    }
}

/// One independently triggerable synthesis channel.
///
/// Implementations back this with whatever synthesis technology they
/// like; the scheduler only speaks this interface.
pub trait Voice: Send {
    /// Start a sound at an absolute time on the shared clock.
    ///
    /// `pitches` is `None` for unpitched hits. The sound holds for
    /// `duration_secs` before its envelope release begins.
    fn trigger(&mut self, pitches: Option<&[Pitch]>, duration_secs: f64, at_secs: f64);

    /// Set the output level in dB; negative infinity silences the voice
    fn set_level_db(&mut self, db: f64);

    /// Set the oscillator shape
    fn set_oscillator(&mut self, kind: OscillatorKind);

    /// Set the ADSR envelope
    fn set_envelope(&mut self, envelope: &Envelope);
}

/// The fixed set of named voices, instantiated once and kept warm.
///
/// The pool is never torn down by `stop()`; voices persist across
/// play/stop cycles so restart is fast.
pub struct VoicePool {
    voices: Vec<Box<dyn Voice>>,
}

impl VoicePool {
    /// Build a pool by asking the factory for one voice per role
    pub fn build<F>(mut factory: F) -> Self
    where
        F: FnMut(VoiceRole) -> Box<dyn Voice>,
    {
        Self {
            voices: VoiceRole::ALL.iter().map(|role| factory(*role)).collect(),
        }
    }

    /// Build a pool of logging voices (no synthesis backend required)
    pub fn logging() -> Self {
        Self::build(|role| Box::new(LogVoice::new(role)))
    }

    /// Get a voice by role
    pub fn voice_mut(&mut self, role: VoiceRole) -> &mut dyn Voice {
        self.voices[role as usize].as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingVoice {
        triggers: usize,
    }

    impl Voice for CountingVoice {
        fn trigger(&mut self, _pitches: Option<&[Pitch]>, _duration_secs: f64, _at_secs: f64) {
            self.triggers += 1;
        }
        fn set_level_db(&mut self, _db: f64) {}
        fn set_oscillator(&mut self, _kind: OscillatorKind) {}
        fn set_envelope(&mut self, _envelope: &Envelope) {}
    }

    #[test]
    fn test_pool_has_all_roles() {
        let mut built = Vec::new();
        let _pool = VoicePool::build(|role| {
            built.push(role);
            Box::new(CountingVoice { triggers: 0 }) as Box<dyn Voice>
        });
        assert_eq!(built.len(), 10);
        assert_eq!(built[0], VoiceRole::Lead);
        assert_eq!(built[9], VoiceRole::Duo);
    }

    #[test]
    fn test_pool_routes_by_role() {
        let mut pool = VoicePool::build(|_| Box::new(CountingVoice { triggers: 0 }));
        pool.voice_mut(VoiceRole::Bass).trigger(None, 0.5, 0.0);
        pool.voice_mut(VoiceRole::Bass).trigger(None, 0.5, 0.5);
        // Only checks that indexing is stable; the counting voice itself
        // is exercised through the trait object.
        pool.voice_mut(VoiceRole::Metal).trigger(None, 0.1, 0.0);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(VoiceRole::Lead.name(), "lead");
        assert_eq!(VoiceRole::Membrane.name(), "membrane");
    }

    #[test]
    fn test_envelope_default() {
        let env = Envelope::default();
        assert!(env.attack > 0.0);
        assert!(env.sustain <= 1.0);
    }
}
