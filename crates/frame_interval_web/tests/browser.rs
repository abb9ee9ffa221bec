#![cfg(target_arch = "wasm32")]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use frame_interval_core::{Iterations, RepeatingFrameTimer, TimerError};
use frame_interval_web::{browser_timer, FrameInterval, WebClock, WebFrameScheduler};
use js_sys::{Date, Object, Promise};
use wasm_bindgen::{closure::Closure, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl FnMut() + 'static) {
    let fired_at = Rc::new(RefCell::new(Vec::new()));
    let inner = fired_at.clone();

    (fired_at, move || inner.borrow_mut().push(Date::now()))
}

fn js_counter() -> (Rc<Cell<u32>>, JsValue) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let runnable = Closure::wrap(Box::new(move || inner.set(inner.get() + 1)) as Box<dyn FnMut()>);

    (count, runnable.into_js_value())
}

fn frame_interval() -> FrameInterval {
    FrameInterval::new().map_err(JsValue::from).unwrap()
}

#[wasm_bindgen_test]
fn resolve_on_window() {
    assert!(WebFrameScheduler::resolve().is_ok());
}

#[wasm_bindgen_test]
fn object_without_frame_functions_is_unsupported() {
    let result = WebFrameScheduler::resolve_on(JsValue::from(Object::new()));

    assert_eq!(result.err(), Some(TimerError::UnsupportedEnvironment));
}

#[wasm_bindgen_test]
fn default_interval() {
    let timer = browser_timer().unwrap();

    assert_eq!(timer.interval(), Duration::from_millis(100));
}

#[wasm_bindgen_test]
async fn run_every_100_milliseconds() {
    let timer = browser_timer().unwrap();
    let (fired_at, callback) = recorder();
    let started_at = Date::now();

    timer
        .start(callback, Duration::from_millis(100), false, Iterations::Unbounded)
        .unwrap();
    sleep(15 * 100).await;
    timer.stop();

    let fired_at = fired_at.borrow();
    assert!(fired_at.len() >= 14);
    let total = fired_at[fired_at.len() - 1] - started_at;
    let expected = fired_at.len() as f64 * 100.0;
    assert!((total - expected).abs() <= 100.0, "total: {}", total);
}

#[wasm_bindgen_test]
async fn run_every_100_milliseconds_for_5_times() {
    let timer = browser_timer().unwrap();
    let (fired_at, callback) = recorder();

    timer
        .start(callback, Duration::from_millis(100), false, Iterations::Remaining(5))
        .unwrap();
    sleep(5 * 100 + 100).await;

    assert_eq!(fired_at.borrow().len(), 5);
    assert!(!timer.is_running());
    assert!(!timer.is_scheduled());

    sleep(500).await;
    assert_eq!(fired_at.borrow().len(), 5);
}

#[wasm_bindgen_test]
async fn start_while_running_fails() {
    let timer = browser_timer().unwrap();
    let (_, first) = recorder();
    let (second_fired_at, second) = recorder();

    timer
        .start(first, Duration::from_millis(100), false, Iterations::Unbounded)
        .unwrap();

    assert_eq!(
        timer.start(second, Duration::from_millis(100), true, Iterations::Unbounded),
        Err(TimerError::AlreadyRunning)
    );
    sleep(200).await;
    timer.stop();

    assert!(second_fired_at.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn finished_and_cancelled_requests_release_their_closures() {
    let scheduler = WebFrameScheduler::resolve().unwrap();
    let timer = RepeatingFrameTimer::new(scheduler.clone(), WebClock::resolve());

    for _ in 0..3 {
        let (_, callback) = recorder();
        timer
            .start(callback, Duration::from_millis(100), true, Iterations::Unbounded)
            .unwrap();
        assert_eq!(scheduler.pending(), 1);
        timer.stop();
        assert_eq!(scheduler.pending(), 0);
    }

    let (fired_at, callback) = recorder();
    timer
        .start(callback, Duration::from_millis(100), false, Iterations::Remaining(2))
        .unwrap();
    sleep(400).await;

    assert_eq!(fired_at.borrow().len(), 2);
    assert_eq!(scheduler.pending(), 0);
}

#[wasm_bindgen_test]
fn binding_rejects_non_function_runnable() {
    let interval = frame_interval();

    assert!(interval.start(JsValue::from(5), None, None, None).is_err());
    assert!(!interval.running());
}

#[wasm_bindgen_test]
fn binding_clamps_short_interval() {
    let interval = frame_interval();
    let (_, runnable) = js_counter();

    interval.start(runnable, Some(10.0), None, None).map_err(JsValue::from).unwrap();

    assert_eq!(interval.interval(), 100.0);
    assert!(interval.running());
    interval.stop();
    assert!(!interval.running());
}

#[wasm_bindgen_test]
async fn binding_negative_iteration_count_repeats() {
    let interval = frame_interval();
    let (count, runnable) = js_counter();

    interval
        .start(runnable, Some(100.0), Some(false), Some(-1))
        .map_err(JsValue::from)
        .unwrap();
    sleep(650).await;

    assert!(count.get() >= 4, "count: {}", count.get());
    assert!(interval.running());
    interval.stop();
}

#[wasm_bindgen_test]
async fn binding_iteration_count_bounds_firings() {
    let interval = frame_interval();
    let (count, runnable) = js_counter();

    interval
        .start(runnable, Some(100.0), Some(true), Some(3))
        .map_err(JsValue::from)
        .unwrap();
    sleep(500).await;

    assert_eq!(count.get(), 3);
    assert!(!interval.running());
}
