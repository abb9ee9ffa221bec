//! A repeating interval timer driven by animation frames.
//!
//! [RepeatingFrameTimer] emulates `setInterval` on top of a host's "request
//! next frame" / "cancel frame" pair, injected through [FrameScheduler],
//! together with a [Clock]. [FramePump] is a native host for programs and
//! tests that don't run inside a browser.

mod capability;
mod clock;
mod config;
mod error;
mod limiter;
mod logger;
mod pump;
mod timer;

pub use capability::*;
pub use clock::*;
pub use config::*;
pub use error::*;
pub use limiter::*;
pub use logger::*;
pub use pump::*;
pub use timer::*;

pub use log;
