// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! SONGLOOP - Declarative multi-track song playback engine.
//!
//! Translates a static description of a piece of music (instrument
//! tracks of notes, chords, and rests, organized into named sections
//! played in a specified order, looping indefinitely) into precisely
//! timed trigger instructions dispatched to independent synthesis
//! voices.
//!
//! The engine does no audio synthesis itself: callers supply a
//! [`voice::Voice`] implementation per role and a [`transport::Transport`]
//! clock, and the engine speaks only those interfaces. Timing is
//! scheduler-accurate, bounded by the host timer resolution, with drift
//! across loop iterations corrected by re-deriving each cycle's restart
//! delay from its actual scheduled end time.

pub mod mixer;
pub mod playback;
pub mod sequencer;
pub mod song;
pub mod transport;
pub mod voice;

pub use playback::Player;
pub use song::SongDefinition;
pub use transport::{Transport, WallClockTransport};
pub use voice::{Voice, VoicePool};
