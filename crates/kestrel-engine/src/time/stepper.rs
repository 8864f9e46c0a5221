use std::time::{Duration, Instant};

/// Work owed by one scheduler callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepPlan {
    /// Whole update ticks to execute this callback.
    pub updates: u32,

    /// Whole ticks dropped from logical time because the catch-up cap was
    /// hit (long stall, e.g. a debugger pause while focused).
    pub dropped_ticks: u32,

    /// Whether a render is due this callback.
    pub render: bool,

    /// Fractional tick remaining in the accumulator after the drain.
    ///
    /// The accumulator value observed by the i-th update of this plan is
    /// `remainder + (updates - i)`.
    pub remainder: f64,
}

impl StepPlan {
    /// A plan that does nothing (paused or stopped loop).
    pub fn idle() -> Self {
        Self {
            updates: 0,
            dropped_ticks: 0,
            render: false,
            remainder: 0.0,
        }
    }
}

/// Fixed-timestep accumulator.
///
/// Tracks time owed to updates and renders. Updates drain at a fixed logical
/// rate regardless of the actual callback cadence (catch-up), bounded by
/// `max_catch_up` so a long stall cannot burst an unbounded number of
/// updates on resume.
///
/// Accumulators are integer `Duration`s, so whole-interval boundaries drain
/// exactly. The stepper never reads the clock; callers pass timestamps in,
/// which is what keeps this testable.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    tick_interval: Duration,
    frame_interval: Option<Duration>,
    max_catch_up: u32,

    last: Instant,
    owed_update: Duration,
    owed_render: Duration,
}

impl FixedStepper {
    /// Creates a stepper.
    ///
    /// `tick_rate` is the fixed update rate in Hz (zero is treated as 1).
    /// A `frame_rate` of `None` disables render rate-limiting: every
    /// callback renders.
    pub fn new(tick_rate: u32, frame_rate: Option<u32>, max_catch_up: u32, now: Instant) -> Self {
        Self {
            tick_interval: rate_interval(tick_rate),
            frame_interval: frame_rate.map(rate_interval),
            max_catch_up: max_catch_up.max(1),
            last: now,
            owed_update: Duration::ZERO,
            owed_render: Duration::ZERO,
        }
    }

    /// Resets the baseline and clears both accumulators.
    ///
    /// Called on loop start so the first callback does not see the span
    /// since construction.
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
        self.owed_update = Duration::ZERO;
        self.owed_render = Duration::ZERO;
    }

    /// Advances the baseline without accumulating.
    ///
    /// This is the pause path: wall time elapsed while unfocused is absorbed
    /// and never counts toward ticks or frames.
    pub fn absorb(&mut self, now: Instant) {
        self.last = now;
    }

    /// Accumulates the elapsed span and returns the work owed.
    pub fn advance(&mut self, now: Instant) -> StepPlan {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;

        self.owed_update += elapsed;
        if self.frame_interval.is_some() {
            self.owed_render += elapsed;
        }

        let owed = (self.owed_update.as_nanos() / self.tick_interval.as_nanos())
            .min(u128::from(u32::MAX)) as u32;
        let updates = owed.min(self.max_catch_up);
        let dropped_ticks = owed - updates;
        // Executed and dropped whole ticks both leave the accumulator; only
        // the fractional tick carries over (logical-time clamping).
        self.owed_update = self
            .owed_update
            .saturating_sub(self.tick_interval.saturating_mul(owed));

        let render = match self.frame_interval {
            Some(frame_interval) => {
                if self.owed_render >= frame_interval {
                    let rem = self.owed_render.as_nanos() % frame_interval.as_nanos();
                    self.owed_render = Duration::from_nanos(rem as u64);
                    true
                } else {
                    false
                }
            }
            None => true,
        };

        StepPlan {
            updates,
            dropped_ticks,
            render,
            remainder: self.owed_update.as_secs_f64() / self.tick_interval.as_secs_f64(),
        }
    }

    /// The fixed duration of one tick.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

fn rate_interval(rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate.max(1)))
}
