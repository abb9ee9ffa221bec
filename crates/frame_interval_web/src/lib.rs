//! Browser host for frame_interval.
//!
//! Everything here is only compiled for `wasm32`: the frame functions and the
//! clock are resolved from `window`, and [FrameInterval] exposes the timer to
//! JavaScript.

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod clock;
#[cfg(target_arch = "wasm32")]
mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use binding::FrameInterval;
#[cfg(target_arch = "wasm32")]
pub use clock::WebClock;
#[cfg(target_arch = "wasm32")]
pub use scheduler::WebFrameScheduler;

#[cfg(target_arch = "wasm32")]
use frame_interval_core::{RepeatingFrameTimer, TimerConfig, TimerError};

/// Creates a timer driven by the page's animation frames.
///
/// Fails with [TimerError::UnsupportedEnvironment] when there is no `window`
/// or it lacks a request/cancel animation frame pair.
#[cfg(target_arch = "wasm32")]
pub fn browser_timer() -> Result<RepeatingFrameTimer, TimerError> {
    browser_timer_with_config(TimerConfig::default())
}

#[cfg(target_arch = "wasm32")]
pub fn browser_timer_with_config(config: TimerConfig) -> Result<RepeatingFrameTimer, TimerError> {
    let scheduler = WebFrameScheduler::resolve()?;
    let clock = WebClock::resolve();
    log::debug!("browser frame host resolved, clock: {:?}", clock);

    Ok(RepeatingFrameTimer::with_config(scheduler, clock, config))
}
