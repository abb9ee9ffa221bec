use frame_interval_core::{
    resolve_frame_capabilities, FrameCallback, FrameHandle, FrameScheduler, TimerError,
};
use js_sys::{Function, Reflect};
use log::warn;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

type FrameClosure = Closure<dyn FnMut(f64)>;

#[derive(Default)]
struct FrameClosures {
    live: HashMap<FrameHandle, FrameClosure>,
    // Dispatched closures can't be dropped while they are still on the stack,
    // they are released on the next request or cancel.
    spent: Vec<FrameHandle>,
}

impl FrameClosures {
    fn release_spent(&mut self) {
        for handle in self.spent.drain(..) {
            self.live.remove(&handle);
        }
    }
}

/// [FrameScheduler] backed by the browser's `requestAnimationFrame`.
///
/// The request/cancel functions are looked up once, vendor prefixed names
/// included, and kept for the lifetime of the scheduler. The scheduler owns
/// the closures handed to the browser: a closure is released after it ran or
/// when its request is cancelled. Clones share them.
#[derive(Clone)]
pub struct WebFrameScheduler {
    global: JsValue,
    request: Function,
    cancel: Function,
    closures: Rc<RefCell<FrameClosures>>,
}

impl WebFrameScheduler {
    /// Resolves the frame functions on `window`.
    pub fn resolve() -> Result<Self, TimerError> {
        let window = web_sys::window().ok_or(TimerError::UnsupportedEnvironment)?;
        Self::resolve_on(window.into())
    }

    /// Resolves the frame functions on an arbitrary global object.
    pub fn resolve_on(global: JsValue) -> Result<Self, TimerError> {
        let (request, cancel) = resolve_frame_capabilities(|name| {
            Reflect::get(&global, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.dyn_into::<Function>().ok())
        })?;

        Ok(WebFrameScheduler {
            global,
            request,
            cancel,
            closures: Rc::default(),
        })
    }

    /// Number of requests that were neither dispatched nor cancelled.
    pub fn pending(&self) -> usize {
        let closures = self.closures.borrow();
        closures.live.len() - closures.spent.len()
    }
}

impl FrameScheduler for WebFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, TimerError> {
        self.closures.borrow_mut().release_spent();

        let assigned = Rc::new(Cell::new(None));
        let closures = Rc::downgrade(&self.closures);
        let mut callback = Some(callback);
        let closure = {
            let assigned = assigned.clone();
            Closure::wrap(Box::new(move |_timestamp: f64| {
                if let Some(callback) = callback.take() {
                    callback();
                }
                if let (Some(handle), Some(closures)) = (assigned.get(), closures.upgrade()) {
                    closures.borrow_mut().spent.push(handle);
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let handle = self
            .request
            .call1(&self.global, closure.as_ref().unchecked_ref())
            .map_err(|e| TimerError::FrameRequest(format!("{:?}", e)))?;
        let handle = handle
            .as_f64()
            .map(|handle| FrameHandle(handle as u32))
            .ok_or_else(|| TimerError::FrameRequest(format!("unexpected frame handle {:?}", handle)))?;

        assigned.set(Some(handle));
        self.closures.borrow_mut().live.insert(handle, closure);

        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(e) = self.cancel.call1(&self.global, &JsValue::from(handle.0)) {
            warn!("cancel of frame {:?} failed: {:?}", handle, e);
        }

        // Dropped outside the borrow, the pending callback owns arbitrary state.
        let closure = {
            let mut closures = self.closures.borrow_mut();
            closures.release_spent();
            closures.live.remove(&handle)
        };
        drop(closure);
    }
}

impl std::fmt::Debug for WebFrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebFrameScheduler")
            .field("global", &self.global)
            .field("request", &self.request)
            .field("cancel", &self.cancel)
            .field("pending", &self.pending())
            .finish()
    }
}
