// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Drum pattern generator.
//!
//! A pure function from a section duration and an intensity tier to the
//! percussion hits for that section. No shared state; the section
//! scheduler dispatches the hits it returns.

use crate::song::{DrumIntensity, NoteLength, Pitch};
use crate::voice::VoiceRole;

/// Pitch proxies for the membrane voice
pub mod drum_pitch {
    use crate::song::Pitch;

    /// Kick proxy (C1)
    pub const KICK: Pitch = Pitch::from_midi(24);
    /// Snare proxy (G2)
    pub const SNARE: Pitch = Pitch::from_midi(43);
}

/// Offset of the heavy tier's second kick, as a fraction of a beat
const DOUBLE_KICK_FRACTION: f64 = 0.5;

/// One percussion hit, positioned relative to the section start
#[derive(Debug, Clone, PartialEq)]
pub struct DrumHit {
    /// Voice to dispatch to
    pub role: VoiceRole,
    /// Pitch proxy; `None` for unpitched hits
    pub pitch: Option<Pitch>,
    /// Hit duration in seconds
    pub duration_secs: f64,
    /// Offset from section start in seconds
    pub offset_secs: f64,
}

impl DrumHit {
    fn kick(offset_secs: f64, bpm: f64) -> Self {
        Self {
            role: VoiceRole::Membrane,
            pitch: Some(drum_pitch::KICK),
            duration_secs: NoteLength::Eighth.seconds(bpm),
            offset_secs,
        }
    }

    fn snare(offset_secs: f64, bpm: f64) -> Self {
        Self {
            role: VoiceRole::Membrane,
            pitch: Some(drum_pitch::SNARE),
            duration_secs: NoteLength::Sixteenth.seconds(bpm),
            offset_secs,
        }
    }

    fn hat(offset_secs: f64, bpm: f64) -> Self {
        Self {
            role: VoiceRole::Metal,
            pitch: None,
            duration_secs: NoteLength::ThirtySecond.seconds(bpm),
            offset_secs,
        }
    }
}

/// Quantize a duration up to whole quarter-note beats
pub fn pattern_span(duration_secs: f64, bpm: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    let beat = 60.0 / bpm;
    (duration_secs / beat).ceil() * beat
}

/// Generate the percussion hits for one section.
///
/// The section duration is quantized up to quarter-note beats. A hit in
/// the final partial beat is kept if it starts before the section end;
/// its tail may run past the nominal end, which the voice's envelope
/// release absorbs.
pub fn generate_pattern(duration_secs: f64, intensity: DrumIntensity, bpm: f64) -> Vec<DrumHit> {
    if intensity == DrumIntensity::None || duration_secs <= 0.0 {
        return Vec::new();
    }

    let beat = 60.0 / bpm;
    let beats = (duration_secs / beat).ceil() as u64;
    let mut hits = Vec::new();

    for b in 0..beats {
        let t = b as f64 * beat;

        // Backbeat shared by every tier
        if b % 4 == 0 {
            hits.push(DrumHit::kick(t, bpm));
        }
        if b % 4 == 2 {
            hits.push(DrumHit::snare(t, bpm));
        }

        match intensity {
            DrumIntensity::None | DrumIntensity::Simple => {}
            DrumIntensity::Complex => {
                if b % 2 == 1 {
                    hits.push(DrumHit::hat(t, bpm));
                }
            }
            DrumIntensity::Heavy => {
                if b % 2 == 0 {
                    hits.push(DrumHit::kick(t + DOUBLE_KICK_FRACTION * beat, bpm));
                }
                if b % 4 == 3 {
                    hits.push(DrumHit::snare(t, bpm));
                }
                hits.push(DrumHit::hat(t, bpm));
                hits.push(DrumHit::hat(t + beat / 2.0, bpm));
            }
        }
    }

    // Subdivision hits in a partial final beat can land past the end
    hits.retain(|hit| hit.offset_secs < duration_secs);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    const BPM: f64 = 120.0; // one beat = 0.5s

    fn offsets(hits: &[DrumHit], role: VoiceRole, pitch: Option<Pitch>) -> Vec<f64> {
        hits.iter()
            .filter(|h| h.role == role && h.pitch == pitch)
            .map(|h| h.offset_secs)
            .collect()
    }

    #[test]
    fn test_none_is_empty() {
        assert!(generate_pattern(4.0, DrumIntensity::None, BPM).is_empty());
    }

    #[test]
    fn test_zero_duration_is_empty() {
        assert!(generate_pattern(0.0, DrumIntensity::Heavy, BPM).is_empty());
    }

    #[test]
    fn test_simple_backbeat() {
        // 4 beats at 120 BPM = 2.0s
        let hits = generate_pattern(2.0, DrumIntensity::Simple, BPM);

        let kicks = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::KICK));
        assert_eq!(kicks, vec![0.0]);

        let snares = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::SNARE));
        assert_eq!(snares, vec![1.0]); // beat 2

        assert!(offsets(&hits, VoiceRole::Metal, None).is_empty());
    }

    #[test]
    fn test_simple_two_groups() {
        // 8 beats: kick on 0 and 4, snare on 2 and 6
        let hits = generate_pattern(4.0, DrumIntensity::Simple, BPM);
        let kicks = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::KICK));
        assert_eq!(kicks, vec![0.0, 2.0]);
        let snares = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::SNARE));
        assert_eq!(snares, vec![1.0, 3.0]);
    }

    #[test]
    fn test_complex_adds_offbeat_hats() {
        let hits = generate_pattern(2.0, DrumIntensity::Complex, BPM);
        let hats = offsets(&hits, VoiceRole::Metal, None);
        assert_eq!(hats, vec![0.5, 1.5]); // beats 1 and 3

        // Backbeat unchanged
        let kicks = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::KICK));
        assert_eq!(kicks, vec![0.0]);
    }

    #[test]
    fn test_heavy_tier() {
        let hits = generate_pattern(2.0, DrumIntensity::Heavy, BPM);

        // Main kick on beat 0 plus offset double kicks on even beats
        let kicks = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::KICK));
        assert_eq!(kicks, vec![0.0, 0.25, 1.25]);

        // Snare on beats 2 and 3
        let snares = offsets(&hits, VoiceRole::Membrane, Some(drum_pitch::SNARE));
        assert_eq!(snares, vec![1.0, 1.5]);

        // Hats on every eighth subdivision
        let hats = offsets(&hits, VoiceRole::Metal, None);
        assert_eq!(hats, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
    }

    #[test]
    fn test_partial_beat_quantized_up() {
        // 1.9s = 3.8 beats, quantized to 4; beat 3 starts at 1.5 < 1.9
        let hits = generate_pattern(1.9, DrumIntensity::Complex, BPM);
        let hats = offsets(&hits, VoiceRole::Metal, None);
        assert_eq!(hats, vec![0.5, 1.5]);
        assert_eq!(pattern_span(1.9, BPM), 2.0);
    }

    #[test]
    fn test_partial_beat_drops_late_subdivisions() {
        // 1.6s = 3.2 beats -> 4 beats; the heavy hat at 1.75 starts past
        // the section end and is dropped, the one at 1.5 is kept
        let hits = generate_pattern(1.6, DrumIntensity::Heavy, BPM);
        let hats = offsets(&hits, VoiceRole::Metal, None);
        assert_eq!(*hats.last().unwrap(), 1.5);
        assert!(hats.iter().all(|t| *t < 1.6));
    }

    #[test]
    fn test_pattern_span() {
        assert_eq!(pattern_span(0.0, BPM), 0.0);
        assert_eq!(pattern_span(2.0, BPM), 2.0);
        assert_eq!(pattern_span(2.1, BPM), 2.5);
    }
}
