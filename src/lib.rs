//! A repeating interval driven by animation frames.
//!
//! `setInterval` keeps firing in background tabs and drifts away from the
//! rendering cadence. [RepeatingFrameTimer] runs the same kind of repeating
//! callback on top of `requestAnimationFrame`: it only fires on rendered
//! frames, pauses with the page, and carries scheduling error forward so the
//! average cadence stays on the requested interval.
//!
//! ## Example
//! ```
//! use frame_interval::{FramePump, InstantClock, Iterations, RepeatingFrameTimer};
//! use std::time::Duration;
//!
//! let pump = FramePump::default();
//! let timer = RepeatingFrameTimer::new(pump.clone(), InstantClock::default());
//!
//! timer
//!     .start(|| println!("tick"), Duration::from_millis(100), true, Iterations::Remaining(1))
//!     .unwrap();
//!
//! assert!(!timer.is_running());
//! ```
//!
//! ### This Crate
//! The `frame_interval` crate is a container crate that re-exports the timer
//! from `frame_interval_core` and, on `wasm32`, the browser host from
//! `frame_interval_web`.

pub use frame_interval_core::*;

pub mod web {
    //! Browser frame host and the JavaScript `FrameInterval` class.
    pub use frame_interval_web::*;
}
