// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequencing core: section scheduling and the looping driver.
//!
//! This module provides:
//! - Section scheduler: event lists to absolute-time voice triggers
//! - Drum pattern generator: intensity tiers to percussion hits
//! - Song sequencer: the drift-corrected timer-chain loop driver

pub mod driver;
pub mod drums;
pub mod section;

pub use driver::SongSequencer;
pub use drums::{generate_pattern, pattern_span, DrumHit};
pub use section::schedule_section;

/// Lead-in before the first section of a fresh `play`, giving the
/// synthesis backend time to initialize
pub const LEAD_IN_SECS: f64 = 0.1;

/// Margin added to every cycle's restart delay so the continuation
/// never fires before its cycle has finished sounding
pub const SAFETY_MARGIN_SECS: f64 = 0.05;
