use instant::{Duration, Instant};
use std::thread::sleep;

/// A struct that rappresent a frame limiter
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame_duration: Duration,
}

impl FrameLimiter {
    /// Create a framelimiter from a target frame per second
    pub fn new(fps: u32) -> Self {
        FrameLimiter {
            frame_duration: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Sleeps out what is left of a frame that began at `frame_start`.
    ///
    /// Returns the time actually spent in the frame.
    pub fn wait(&self, frame_start: Instant) -> Duration {
        let elapsed = frame_start.elapsed();
        if elapsed < self.frame_duration {
            sleep(self.frame_duration - elapsed);
        }

        frame_start.elapsed()
    }
}

impl Default for FrameLimiter {
    /// Returns a default frame limiter of 60 frames per second
    fn default() -> Self {
        FrameLimiter::new(60)
    }
}
