use frame_interval_core::{interval_from_ms, Iterations, RepeatingFrameTimer, TimerError};
use js_sys::Function;
use wasm_bindgen::{prelude::*, JsCast};

use crate::browser_timer;

/// JavaScript facing wrapper of [RepeatingFrameTimer].
///
/// ```js
/// const interval = new FrameInterval();
/// interval.start(() => console.log("tick"), 250, false, 10);
/// ```
#[wasm_bindgen]
pub struct FrameInterval {
    timer: RepeatingFrameTimer,
}

#[wasm_bindgen]
impl FrameInterval {
    /// Throws when the page can't schedule animation frames.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FrameInterval, JsError> {
        Ok(FrameInterval {
            timer: browser_timer()?,
        })
    }

    /// Starts calling `runnable` every `interval_ms`.
    ///
    /// A missing or negative `iteration_count` repeats until `stop` is called.
    /// Exceptions thrown by `runnable` are rethrown to the frame callback.
    pub fn start(
        &self,
        runnable: JsValue,
        interval_ms: Option<f64>,
        run_immediate: Option<bool>,
        iteration_count: Option<i32>,
    ) -> Result<(), JsError> {
        let runnable: Function = runnable.dyn_into().map_err(|_| {
            TimerError::InvalidArgument("expecting a function as runnable".to_string())
        })?;

        let config = self.timer.config();
        let interval = interval_from_ms(interval_ms.unwrap_or(config.default_interval_ms))?;
        let run_immediate = run_immediate.unwrap_or(config.run_immediate);
        let iterations = match iteration_count {
            Some(count) if count >= 0 => Iterations::Remaining(count as u32),
            _ => Iterations::Unbounded,
        };

        self.timer.start(
            move || {
                if let Err(e) = runnable.call0(&JsValue::NULL) {
                    wasm_bindgen::throw_val(e);
                }
            },
            interval,
            run_immediate,
            iterations,
        )?;

        Ok(())
    }

    pub fn stop(&self) {
        self.timer.stop();
    }

    /// Effective interval in milliseconds.
    #[wasm_bindgen(getter)]
    pub fn interval(&self) -> f64 {
        self.timer.interval_ms()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.timer.is_running()
    }
}
