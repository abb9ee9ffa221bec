use crate::TimerError;

/// Names under which a host may expose its "request next frame" function, in lookup order.
pub const REQUEST_FRAME_NAMES: [&str; 4] = [
    "requestAnimationFrame",
    "mozRequestAnimationFrame",
    "webkitRequestAnimationFrame",
    "msRequestAnimationFrame",
];

/// Names under which a host may expose its "cancel frame" function, in lookup order.
pub const CANCEL_FRAME_NAMES: [&str; 4] = [
    "cancelAnimationFrame",
    "mozCancelAnimationFrame",
    "webkitCancelAnimationFrame",
    "msCancelAnimationFrame",
];

/// One-shot callback handed to the host, invoked before the next paint.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Identifier of an outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u32);

/// The frame scheduling capability of a host.
///
/// Requests are one shot: a callback runs at most once, on the next frame the
/// host renders, unless it is cancelled first.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, TimerError>;

    /// Cancels a pending request. Unknown or already dispatched handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// A millisecond clock. Only differences between readings are meaningful.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Resolves a request/cancel pair through `lookup`, accepting vendor prefixed
/// names as fallbacks.
///
/// `lookup` must return `Some` only for names bound to something callable.
/// Both halves are required: a host exposing only one of them is unsupported.
pub fn resolve_frame_capabilities<T>(
    lookup: impl Fn(&str) -> Option<T>,
) -> Result<(T, T), TimerError> {
    let request = REQUEST_FRAME_NAMES.iter().find_map(|name| lookup(name));
    let cancel = CANCEL_FRAME_NAMES.iter().find_map(|name| lookup(name));

    match (request, cancel) {
        (Some(request), Some(cancel)) => Ok((request, cancel)),
        _ => Err(TimerError::UnsupportedEnvironment),
    }
}
