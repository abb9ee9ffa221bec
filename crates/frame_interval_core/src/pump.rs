use instant::{Duration, Instant};
use log::trace;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{FrameCallback, FrameHandle, FrameLimiter, FrameScheduler, TimerError};

struct PendingFrame {
    handle: FrameHandle,
    requested_in: u64,
    callback: FrameCallback,
}

#[derive(Default)]
struct PumpQueue {
    last_handle: u32,
    frame_index: u64,
    pending: VecDeque<PendingFrame>,
}

/// Single threaded frame loop for hosts without a native one.
///
/// Behaves like a browser's animation frame queue: a callback requested while a
/// frame is being dispatched runs on the following frame. Clones share the
/// same queue, so one copy can be given to a timer as its [FrameScheduler]
/// while the owner keeps another to drive frames.
#[derive(Clone, Default)]
pub struct FramePump {
    queue: Rc<RefCell<PumpQueue>>,
    limiter: Option<FrameLimiter>,
}

impl FramePump {
    /// Creates a pump. With a [FrameLimiter] every driven frame lasts at least
    /// one frame duration, without it frames run back to back.
    pub fn new(limiter: Option<FrameLimiter>) -> Self {
        FramePump {
            queue: Rc::default(),
            limiter,
        }
    }

    /// Number of requests waiting for a frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Number of frames dispatched so far.
    pub fn frame_index(&self) -> u64 {
        self.queue.borrow().frame_index
    }

    /// Dispatches the callbacks that were pending when the frame began.
    ///
    /// Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let frame_index = {
            let mut queue = self.queue.borrow_mut();
            queue.frame_index += 1;
            queue.frame_index
        };

        let mut dispatched = 0;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = matches!(
                    queue.pending.front(),
                    Some(frame) if frame.requested_in < frame_index
                );
                if due {
                    queue.pending.pop_front()
                } else {
                    None
                }
            };

            match next {
                Some(frame) => {
                    (frame.callback)();
                    dispatched += 1;
                }
                None => break,
            }
        }

        trace!("frame {}: dispatched {} callbacks", frame_index, dispatched);

        dispatched
    }

    /// Runs `frames` frames, paced by the limiter if there is one.
    pub fn run_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.paced_frame();
        }
    }

    /// Runs frames until `duration` has passed.
    pub fn run_for(&self, duration: Duration) {
        let start = Instant::now();
        while start.elapsed() < duration {
            self.paced_frame();
        }
    }

    /// Runs frames until no request is pending or `max_frames` were run.
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending() > 0 {
            self.paced_frame();
            frames += 1;
        }

        frames
    }

    fn paced_frame(&self) {
        let frame_start = Instant::now();
        self.run_frame();
        if let Some(limiter) = &self.limiter {
            limiter.wait(frame_start);
        }
    }
}

impl FrameScheduler for FramePump {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, TimerError> {
        let mut queue = self.queue.borrow_mut();
        queue.last_handle = queue.last_handle.wrapping_add(1).max(1);
        let handle = FrameHandle(queue.last_handle);
        let requested_in = queue.frame_index;
        queue.pending.push_back(PendingFrame {
            handle,
            requested_in,
            callback,
        });

        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue
            .borrow_mut()
            .pending
            .retain(|frame| frame.handle != handle);
    }
}

impl std::fmt::Debug for FramePump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("FramePump")
            .field("frame_index", &queue.frame_index)
            .field("pending", &queue.pending.len())
            .field("limiter", &self.limiter)
            .finish()
    }
}
