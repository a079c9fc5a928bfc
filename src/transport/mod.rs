// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Transport: the shared playback clock.
//!
//! The transport owns the global start/stop state, the current tempo,
//! and the wall clock that all absolute trigger times refer to.
//! Stopping the transport also cancels anything scheduled downstream of
//! it; sounds already dispatched are allowed to finish naturally.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Tempo limits in BPM
pub const MIN_TEMPO: f64 = 20.0;
pub const MAX_TEMPO: f64 = 300.0;

/// Global clock and tempo capability consumed by the sequencer
pub trait Transport: Send + Sync {
    /// Start the clock
    fn start(&self);

    /// Stop the clock and cancel all scheduled downstream events
    fn stop(&self);

    /// Set the current tempo in BPM
    fn set_tempo(&self, bpm: f64);

    /// Current tempo in BPM
    fn tempo(&self) -> f64;

    /// Current time in seconds on the shared clock
    fn now(&self) -> f64;

    /// Whether the clock is running
    fn is_running(&self) -> bool;
}

/// Transport backed by the runtime's monotonic clock.
///
/// Time starts at zero when the transport is created. Tempo is stored
/// as f64 bits in an atomic so readers never block the scheduling path.
pub struct WallClockTransport {
    epoch: tokio::time::Instant,
    tempo_bits: AtomicU64,
    running: AtomicBool,
}

impl WallClockTransport {
    /// Create a transport at the default tempo
    pub fn new() -> Self {
        Self {
            epoch: tokio::time::Instant::now(),
            tempo_bits: AtomicU64::new(120.0f64.to_bits()),
            running: AtomicBool::new(false),
        }
    }
}

impl Default for WallClockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for WallClockTransport {
    fn start(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    fn stop(&self) {
        // Nothing is buffered here; backends that queue events hook
        // their cancel-all into their own Transport implementation.
        self.running.store(false, Ordering::SeqCst);
    }

    fn set_tempo(&self, bpm: f64) {
        let clamped = bpm.clamp(MIN_TEMPO, MAX_TEMPO);
        self.tempo_bits.store(clamped.to_bits(), Ordering::SeqCst);
    }

    fn tempo(&self) -> f64 {
        f64::from_bits(self.tempo_bits.load(Ordering::SeqCst))
    }

    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_clamping() {
        let transport = WallClockTransport::new();
        assert_eq!(transport.tempo(), 120.0);

        transport.set_tempo(140.0);
        assert_eq!(transport.tempo(), 140.0);

        transport.set_tempo(1000.0);
        assert_eq!(transport.tempo(), MAX_TEMPO);

        transport.set_tempo(1.0);
        assert_eq!(transport.tempo(), MIN_TEMPO);
    }

    #[test]
    fn test_start_stop() {
        let transport = WallClockTransport::new();
        assert!(!transport.is_running());
        transport.start();
        assert!(transport.is_running());
        transport.stop();
        assert!(!transport.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_now_follows_clock() {
        let transport = WallClockTransport::new();
        let before = transport.now();
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
        let after = transport.now();
        assert!((after - before - 0.25).abs() < 0.01);
    }
}
