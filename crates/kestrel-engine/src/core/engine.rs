use std::time::{Duration, Instant};

use crate::time::{FixedStepper, RateCounter, StepPlan};

/// Loop configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Fixed update rate in Hz.
    pub tick_rate: u32,

    /// Render rate limit in Hz; `None` renders on every callback.
    pub frame_rate: Option<u32>,

    /// Maximum updates executed per callback. Whole ticks beyond the cap
    /// are dropped from logical time instead of bursting on resume.
    pub max_catch_up_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            frame_rate: Some(60),
            max_catch_up_ticks: 5,
        }
    }
}

/// Fixed-timestep loop state.
///
/// The engine never schedules itself: the window runtime calls
/// [`step`](Self::step) once per callback and executes the returned plan.
/// `start`/`stop` toggle the `running` flag the runtime polls; stopping
/// simply lets scheduling lapse, which is the loop's only termination path.
///
/// Panics inside host update/render callbacks are not caught here; they
/// propagate to the runtime.
pub struct Engine {
    running: bool,
    focused: bool,
    // An unfocused span was observed since the last callback; the next
    // callback absorbs it instead of accumulating.
    blur_pending: bool,
    stepper: FixedStepper,
    rates: RateCounter,
    ticks: u64,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let now = Instant::now();
        Self {
            running: false,
            focused: true,
            blur_pending: false,
            stepper: FixedStepper::new(
                config.tick_rate,
                config.frame_rate,
                config.max_catch_up_ticks,
                now,
            ),
            rates: RateCounter::new(now),
            ticks: 0,
        }
    }

    /// Transitions to running and resets the timing baseline, so the first
    /// callback does not see the span since construction.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// [`start`](Self::start) with an explicit baseline, for hosts (and
    /// tests) driving their own clock.
    pub fn start_at(&mut self, now: Instant) {
        self.running = true;
        self.stepper.reset(now);
        self.rates.reset(now);
    }

    /// Clears the running flag; the next scheduled callback is the last.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feeds the host's focus/visibility state into the loop.
    ///
    /// A flip mid-frame has no effect until the next callback reads it.
    pub fn set_focused(&mut self, focused: bool) {
        if !focused {
            self.blur_pending = true;
        }
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Computes the work owed by one scheduler callback.
    ///
    /// Wall time elapsed while unfocused is absorbed without counting
    /// toward ticks or frames (pause-on-blur); the callback that first
    /// observes the blur — even one that has already refocused — only
    /// absorbs.
    pub fn step(&mut self, now: Instant) -> StepPlan {
        if !self.running {
            return StepPlan::idle();
        }

        if !self.focused || self.blur_pending {
            self.stepper.absorb(now);
            self.rates.absorb(now);
            self.blur_pending = !self.focused;
            return StepPlan::idle();
        }

        let plan = self.stepper.advance(now);

        if plan.dropped_ticks > 0 {
            log::warn!(
                "dropped {} update ticks after a stall of {:.2}s",
                plan.dropped_ticks,
                (plan.dropped_ticks + plan.updates) as f64 * self.stepper.tick_interval().as_secs_f64(),
            );
        }

        self.ticks += u64::from(plan.updates);
        self.rates.record(plan.updates, u32::from(plan.render));
        self.rates.sample(now);

        plan
    }

    /// Frames per second over the last sampled window.
    pub fn fps(&self) -> u32 {
        self.rates.fps()
    }

    /// Ticks per second over the last sampled window.
    pub fn tps(&self) -> u32 {
        self.rates.tps()
    }

    /// Total update ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Fixed duration of one tick.
    pub fn tick_interval(&self) -> Duration {
        self.stepper.tick_interval()
    }
}
