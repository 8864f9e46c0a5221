use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// One-second sampling window for ticks-per-second and frames-per-second.
///
/// Counters accumulate between samples; once a full second has elapsed the
/// snapshot values are latched, the counters reset, and the checkpoint
/// advances by exactly one window (matching the loop's fixed checkpoint
/// cadence rather than re-anchoring on the sample timestamp).
#[derive(Debug, Clone)]
pub struct RateCounter {
    checkpoint: Instant,
    ticks: u32,
    frames: u32,
    tps: u32,
    fps: u32,
}

impl RateCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            checkpoint: now,
            ticks: 0,
            frames: 0,
            tps: 0,
            fps: 0,
        }
    }

    /// Restarts the window, clearing counters and latched snapshots.
    pub fn reset(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    /// Re-anchors the window after a pause.
    ///
    /// Counters are kept (nothing ran while paused) but the paused span must
    /// not count toward the sampling window.
    pub fn absorb(&mut self, now: Instant) {
        self.checkpoint = now;
    }

    /// Records work done by one callback.
    pub fn record(&mut self, ticks: u32, frames: u32) {
        self.ticks += ticks;
        self.frames += frames;
    }

    /// Latches a new snapshot if the window has elapsed.
    ///
    /// Returns `true` when a sample was taken.
    pub fn sample(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.checkpoint) < WINDOW {
            return false;
        }

        self.tps = self.ticks;
        self.fps = self.frames;
        self.ticks = 0;
        self.frames = 0;
        self.checkpoint += WINDOW;
        true
    }

    /// Ticks executed during the last full window.
    pub fn tps(&self) -> u32 {
        self.tps
    }

    /// Frames rendered during the last full window.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
