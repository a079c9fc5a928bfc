// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mix controller.
//!
//! Applies one global volume/mute setting to every voice's output level,
//! layered with fixed per-role offsets and any section-supplied
//! instrument override. The mix controller has no memory of why a value
//! changed, only the latest values.

use std::collections::HashMap;

use crate::voice::{VoicePool, VoiceRole};

/// Base level at volume 0 (exclusive; volume 0 itself is silence)
const MIN_DB: f64 = -32.0;
/// dB span covered by the volume control, so volume 1.0 sits at -6 dB
const DB_RANGE: f64 = 26.0;

/// Fixed per-role offset keeping percussion and atmosphere under the lead
fn role_offset(role: VoiceRole) -> f64 {
    match role {
        VoiceRole::Lead => 0.0,
        VoiceRole::Bass => -2.0,
        VoiceRole::Pad => -5.0,
        VoiceRole::Pluck => -3.0,
        VoiceRole::Fm => -7.0,
        VoiceRole::Noise => -9.0,
        VoiceRole::Membrane => -3.0,
        VoiceRole::Metal => -12.0,
        VoiceRole::Am => -6.0,
        VoiceRole::Duo => -4.0,
    }
}

/// Global volume/mute state pushed onto the voice pool
pub struct Mixer {
    /// Volume control, 0.0 - 1.0
    volume: f64,
    /// Mute switch
    muted: bool,
    /// Section-supplied per-voice dB offsets; persist until overwritten
    overrides: HashMap<VoiceRole, f64>,
}

impl Mixer {
    /// Create a mixer at full volume, unmuted
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            overrides: HashMap::new(),
        }
    }

    /// Current volume (0.0 - 1.0)
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether output is muted
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Effective output level for a role in dB
    pub fn level_db(&self, role: VoiceRole) -> f64 {
        if self.muted || self.volume <= 0.0 {
            return f64::NEG_INFINITY;
        }
        MIN_DB
            + self.volume * DB_RANGE
            + role_offset(role)
            + self.overrides.get(&role).copied().unwrap_or(0.0)
    }

    /// Set the volume and push new levels to every voice
    pub fn set_volume(&mut self, volume: f64, voices: &mut VoicePool) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_all(voices);
    }

    /// Set mute and push new levels to every voice
    pub fn set_mute(&mut self, muted: bool, voices: &mut VoicePool) {
        self.muted = muted;
        self.apply_all(voices);
    }

    /// Layer a section-supplied dB offset onto one voice.
    ///
    /// Called by the section scheduler at section boundaries. The offset
    /// stays in place until a later section overwrites it.
    pub fn apply_instrument_override(&mut self, role: VoiceRole, db: f64, voices: &mut VoicePool) {
        self.overrides.insert(role, db);
        voices.voice_mut(role).set_level_db(self.level_db(role));
    }

    /// Push the current levels to every voice in the pool
    pub fn apply_all(&self, voices: &mut VoicePool) {
        for role in VoiceRole::ALL {
            voices.voice_mut(role).set_level_db(self.level_db(role));
        }
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::Pitch;
    use crate::voice::{Envelope, OscillatorKind, Voice};
    use std::sync::{Arc, Mutex};

    struct LevelVoice {
        levels: Arc<Mutex<Vec<f64>>>,
    }

    impl Voice for LevelVoice {
        fn trigger(&mut self, _pitches: Option<&[Pitch]>, _duration_secs: f64, _at_secs: f64) {}
        fn set_level_db(&mut self, db: f64) {
            self.levels.lock().unwrap().push(db);
        }
        fn set_oscillator(&mut self, _kind: OscillatorKind) {}
        fn set_envelope(&mut self, _envelope: &Envelope) {}
    }

    #[test]
    fn test_volume_mapping_monotonic() {
        let mixer = Mixer::new();
        assert_eq!(mixer.level_db(VoiceRole::Lead), -6.0);

        let mut quiet = Mixer::new();
        quiet.volume = 0.5;
        let mut loud = Mixer::new();
        loud.volume = 0.9;
        assert!(quiet.level_db(VoiceRole::Lead) < loud.level_db(VoiceRole::Lead));
    }

    #[test]
    fn test_zero_volume_is_silence() {
        let mut mixer = Mixer::new();
        mixer.volume = 0.0;
        assert_eq!(mixer.level_db(VoiceRole::Lead), f64::NEG_INFINITY);
    }

    #[test]
    fn test_mute_is_silence() {
        let mut mixer = Mixer::new();
        mixer.muted = true;
        for role in VoiceRole::ALL {
            assert_eq!(mixer.level_db(role), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn test_relative_balance_preserved() {
        let mixer = Mixer::new();
        let lead = mixer.level_db(VoiceRole::Lead);
        let metal = mixer.level_db(VoiceRole::Metal);
        assert_eq!(lead - metal, 12.0);

        let mut half = Mixer::new();
        half.volume = 0.5;
        let lead_half = half.level_db(VoiceRole::Lead);
        let metal_half = half.level_db(VoiceRole::Metal);
        // Offsets are additive, so the gap is volume-independent
        assert_eq!(lead_half - metal_half, 12.0);
    }

    #[test]
    fn test_override_layering() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let mut pool = VoicePool::build(|_| {
            Box::new(LevelVoice {
                levels: Arc::clone(&levels),
            })
        });

        let mut mixer = Mixer::new();
        let base = mixer.level_db(VoiceRole::Pad);
        mixer.apply_instrument_override(VoiceRole::Pad, -2.0, &mut pool);
        assert_eq!(mixer.level_db(VoiceRole::Pad), base - 2.0);

        // Overwriting replaces, not stacks
        mixer.apply_instrument_override(VoiceRole::Pad, 3.0, &mut pool);
        assert_eq!(mixer.level_db(VoiceRole::Pad), base + 3.0);
    }

    #[test]
    fn test_set_volume_pushes_to_all_voices() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let mut pool = VoicePool::build(|_| {
            Box::new(LevelVoice {
                levels: Arc::clone(&levels),
            })
        });

        let mut mixer = Mixer::new();
        mixer.set_volume(0.5, &mut pool);
        assert_eq!(levels.lock().unwrap().len(), 10);

        levels.lock().unwrap().clear();
        mixer.set_mute(true, &mut pool);
        let pushed = levels.lock().unwrap();
        assert_eq!(pushed.len(), 10);
        assert!(pushed.iter().all(|db| *db == f64::NEG_INFINITY));
    }

    #[test]
    fn test_volume_clamped() {
        let levels = Arc::new(Mutex::new(Vec::new()));
        let mut pool = VoicePool::build(|_| {
            Box::new(LevelVoice {
                levels: Arc::clone(&levels),
            })
        });

        let mut mixer = Mixer::new();
        mixer.set_volume(2.0, &mut pool);
        assert_eq!(mixer.volume(), 1.0);
        mixer.set_volume(-1.0, &mut pool);
        assert_eq!(mixer.volume(), 0.0);
    }
}
