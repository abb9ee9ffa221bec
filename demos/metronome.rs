use frame_interval::{
    init_logger, log::info, Clock, FrameLimiter, FramePump, InstantClock, Iterations,
    RepeatingFrameTimer,
};
use std::{cell::Cell, rc::Rc, time::Duration};

fn main() {
    init_logger(log::Level::Debug);

    let pump = FramePump::new(Some(FrameLimiter::default()));
    let clock = InstantClock::default();
    let timer = RepeatingFrameTimer::new(pump.clone(), clock);

    let beats = Rc::new(Cell::new(0));
    let counter = beats.clone();
    if let Err(e) = timer.start(
        move || {
            counter.set(counter.get() + 1);
            info!("beat {} at {:.1}ms", counter.get(), clock.now_ms());
        },
        Duration::from_millis(250),
        true,
        Iterations::Remaining(8),
    ) {
        log::error!("could not start the metronome: {}", e);
        return;
    }

    let frames = pump.run_until_idle(10 * 60);
    info!("{} beats in {} frames", beats.get(), frames);
}
