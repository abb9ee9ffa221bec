use frame_interval_core::Clock;

/// Browser clock: `performance.now()` when the page has it, `Date.now()` otherwise.
#[derive(Debug, Clone)]
pub enum WebClock {
    Performance(web_sys::Performance),
    Date,
}

impl WebClock {
    pub fn resolve() -> Self {
        match web_sys::window().and_then(|window| window.performance()) {
            Some(performance) => WebClock::Performance(performance),
            None => WebClock::Date,
        }
    }
}

impl Clock for WebClock {
    fn now_ms(&self) -> f64 {
        match self {
            WebClock::Performance(performance) => performance.now(),
            WebClock::Date => js_sys::Date::now(),
        }
    }
}
