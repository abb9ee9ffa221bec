use instant::Duration;
use log::{debug, error, trace};
use std::{cell::RefCell, rc::Rc};

use crate::{interval_from_ms, Clock, FrameHandle, FrameScheduler, TimerConfig, TimerError};

/// How many times a started timer fires before stopping by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Iterations {
    #[default]
    Unbounded,
    Remaining(u32),
}

impl Iterations {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Iterations::Remaining(0))
    }

    fn consume(self) -> Self {
        match self {
            Iterations::Remaining(count) => Iterations::Remaining(count.saturating_sub(1)),
            Iterations::Unbounded => Iterations::Unbounded,
        }
    }
}

impl From<Option<u32>> for Iterations {
    fn from(count: Option<u32>) -> Self {
        count.map_or(Iterations::Unbounded, Iterations::Remaining)
    }
}

struct TimerState {
    running: bool,
    scheduled: Option<FrameHandle>,
    // `None` means the next tick fires regardless of elapsed time.
    last_fire_ms: Option<f64>,
    callback: Option<Box<dyn FnMut()>>,
    interval_ms: f64,
    drift_ms: f64,
    generation: u64,
}

impl TimerState {
    /// Decides whether a tick at `now_ms` fires and, if so, records it.
    fn try_fire(&mut self, now_ms: f64) -> bool {
        let fire = match self.last_fire_ms {
            None => {
                self.drift_ms = 0.0;
                true
            }
            Some(last_fire_ms) => {
                let elapsed = now_ms - last_fire_ms;
                let deadline = self.interval_ms - self.drift_ms;
                if elapsed >= deadline {
                    // Capped at one interval so a long stall costs a single catch-up firing.
                    self.drift_ms = (elapsed - deadline).min(self.interval_ms);
                    true
                } else {
                    false
                }
            }
        };

        if fire {
            self.last_fire_ms = Some(now_ms);
        }

        fire
    }
}

enum Step {
    Stale,
    Exhausted,
    Wait,
    Fire(Option<Box<dyn FnMut()>>),
}

struct TimerCore {
    scheduler: Box<dyn FrameScheduler>,
    clock: Box<dyn Clock>,
    config: TimerConfig,
    state: RefCell<TimerState>,
}

impl TimerCore {
    fn halt(&self) {
        let scheduled = {
            let mut state = self.state.borrow_mut();
            if !state.running && state.scheduled.is_none() {
                return;
            }
            state.running = false;
            state.drift_ms = 0.0;
            state.generation += 1;
            state.scheduled.take()
        };

        if let Some(handle) = scheduled {
            self.scheduler.cancel_frame(handle);
        }

        debug!("timer stopped");
    }

    fn tick(self: &Rc<Self>, generation: u64, remaining: Iterations) -> Result<(), TimerError> {
        let step = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                Step::Stale
            } else {
                state.scheduled = None;
                if remaining.is_exhausted() {
                    Step::Exhausted
                } else if state.try_fire(self.clock.now_ms()) {
                    Step::Fire(state.callback.take())
                } else {
                    Step::Wait
                }
            }
        };

        let remaining = match step {
            Step::Stale => return Ok(()),
            Step::Exhausted => {
                self.halt();
                return Ok(());
            }
            Step::Wait => remaining,
            Step::Fire(callback) => {
                trace!("timer fired, remaining: {:?}", remaining);
                if let Some(mut callback) = callback {
                    callback();

                    // A callback that restarted the timer has already installed a new one.
                    let restore = {
                        let state = self.state.borrow();
                        state.generation == generation && state.callback.is_none()
                    };
                    if restore {
                        self.state.borrow_mut().callback = Some(callback);
                    }
                }

                let remaining = remaining.consume();
                if remaining.is_exhausted() {
                    if self.state.borrow().generation == generation {
                        self.halt();
                    }
                    return Ok(());
                }

                remaining
            }
        };

        let keep_going = {
            let state = self.state.borrow();
            state.running && state.generation == generation
        };
        if !keep_going {
            return Ok(());
        }

        self.schedule(generation, remaining)
    }

    fn schedule(self: &Rc<Self>, generation: u64, remaining: Iterations) -> Result<(), TimerError> {
        let core = Rc::downgrade(self);
        let request = self.scheduler.request_frame(Box::new(move || {
            if let Some(core) = core.upgrade() {
                if let Err(e) = core.tick(generation, remaining) {
                    error!("timer tick failed: {}", e);
                }
            }
        }));

        match request {
            Ok(handle) => {
                self.state.borrow_mut().scheduled = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.halt();
                Err(e)
            }
        }
    }
}

/// A repeating interval driven by animation frames instead of a native timer.
///
/// Each tick checks the elapsed time and fires the callback once the interval
/// has passed, then asks the host for the next frame. The callback therefore
/// fires at most once per frame and never while the host doesn't render.
/// Scheduling error is carried from one firing to the next so the average
/// cadence converges on the requested interval.
///
/// ```
/// use frame_interval_core::{FramePump, Iterations, ManualClock, RepeatingFrameTimer};
/// use std::{cell::Cell, rc::Rc, time::Duration};
///
/// let pump = FramePump::default();
/// let clock = ManualClock::default();
/// let timer = RepeatingFrameTimer::new(pump.clone(), clock.clone());
///
/// let fired = Rc::new(Cell::new(0));
/// let counter = fired.clone();
/// timer
///     .start(
///         move || counter.set(counter.get() + 1),
///         Duration::from_millis(100),
///         true,
///         Iterations::Remaining(2),
///     )
///     .unwrap();
///
/// while pump.pending() > 0 {
///     clock.advance_ms(20.0);
///     pump.run_frame();
/// }
///
/// assert_eq!(fired.get(), 2);
/// assert!(!timer.is_running());
/// ```
pub struct RepeatingFrameTimer {
    core: Rc<TimerCore>,
}

impl RepeatingFrameTimer {
    /// Creates a timer with the default [TimerConfig].
    pub fn new(scheduler: impl FrameScheduler + 'static, clock: impl Clock + 'static) -> Self {
        Self::with_config(scheduler, clock, TimerConfig::default())
    }

    pub fn with_config(
        scheduler: impl FrameScheduler + 'static,
        clock: impl Clock + 'static,
        config: TimerConfig,
    ) -> Self {
        let interval_ms = config.clamp_interval_ms(config.default_interval_ms);

        RepeatingFrameTimer {
            core: Rc::new(TimerCore {
                scheduler: Box::new(scheduler),
                clock: Box::new(clock),
                config,
                state: RefCell::new(TimerState {
                    running: false,
                    scheduled: None,
                    last_fire_ms: None,
                    callback: None,
                    interval_ms,
                    drift_ms: 0.0,
                    generation: 0,
                }),
            }),
        }
    }

    /// Starts firing `callback` every `interval`.
    ///
    /// `interval` is raised to the configured minimum. With `run_immediate`
    /// the first firing happens on the first tick, which runs before this
    /// returns; otherwise it waits a full interval. The first frame request
    /// is issued before returning.
    ///
    /// Fails with [TimerError::AlreadyRunning] if the timer is running, leaving
    /// the current run untouched.
    ///
    /// A callback that panics (or throws, through the JavaScript binding)
    /// leaves the timer running with nothing scheduled; call [Self::stop]
    /// before starting it again.
    pub fn start<F: FnMut() + 'static>(
        &self,
        callback: F,
        interval: Duration,
        run_immediate: bool,
        iterations: Iterations,
    ) -> Result<(), TimerError> {
        let (generation, _previous) = {
            let mut state = self.core.state.borrow_mut();
            if state.running {
                return Err(TimerError::AlreadyRunning);
            }

            let previous = state.callback.replace(Box::new(callback));
            state.interval_ms = self
                .core
                .config
                .clamp_interval_ms(interval.as_micros() as f64 / 1000.0);
            state.last_fire_ms = if run_immediate {
                None
            } else {
                Some(self.core.clock.now_ms())
            };
            state.running = true;
            state.drift_ms = 0.0;
            state.generation += 1;

            debug!(
                "timer started: interval {}ms, immediate {}, iterations {:?}",
                state.interval_ms, run_immediate, iterations
            );

            (state.generation, previous)
        };

        self.core.tick(generation, iterations)
    }

    /// Starts with the configured default interval and immediacy, without a bound.
    pub fn start_with_defaults<F: FnMut() + 'static>(&self, callback: F) -> Result<(), TimerError> {
        let config = &self.core.config;
        let interval = interval_from_ms(config.default_interval_ms)?;

        self.start(callback, interval, config.run_immediate, Iterations::Unbounded)
    }

    /// Stops the timer and cancels the pending frame request.
    ///
    /// Safe to call at any time, including from inside the callback. A tick
    /// already dispatched by the host still runs but no longer fires.
    pub fn stop(&self) {
        self.core.halt();
    }

    /// The effective interval of the current or last run.
    pub fn interval(&self) -> Duration {
        Duration::from_micros((self.interval_ms() * 1000.0).round() as u64)
    }

    pub fn interval_ms(&self) -> f64 {
        self.core.state.borrow().interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.core.state.borrow().running
    }

    /// Whether a frame request is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.core.state.borrow().scheduled.is_some()
    }

    /// Scheduling error carried into the next firing, in milliseconds.
    pub fn drift_ms(&self) -> f64 {
        self.core.state.borrow().drift_ms
    }

    pub fn config(&self) -> &TimerConfig {
        &self.core.config
    }
}

impl Drop for RepeatingFrameTimer {
    fn drop(&mut self) {
        self.core.halt();
    }
}

impl std::fmt::Debug for RepeatingFrameTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.core.state.borrow();
        f.debug_struct("RepeatingFrameTimer")
            .field("running", &state.running)
            .field("scheduled", &state.scheduled)
            .field("interval_ms", &state.interval_ms)
            .field("drift_ms", &state.drift_ms)
            .field("config", &self.core.config)
            .finish()
    }
}
