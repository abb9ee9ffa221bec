use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the platform logger at `level`.
///
/// On wasm32 log records go to the browser console and panics are reported
/// there too. Elsewhere a terminal logger is used, falling back to plain
/// stderr when no terminal is attached. Only the first call has an effect.
pub fn init_logger(level: log::Level) {
    INIT.call_once(|| {
        cfg_if::cfg_if! {
            if #[cfg(target_arch = "wasm32")] {
                std::panic::set_hook(Box::new(console_error_panic_hook::hook));
                if console_log::init_with_level(level).is_err() {
                    log::warn!("a logger was already installed");
                }
            } else {
                use simplelog::{Config, SimpleLogger, TermLogger, TerminalMode};
                let level_filter = level.to_level_filter();
                if TermLogger::init(level_filter, Config::default(), TerminalMode::Mixed).is_err()
                    && SimpleLogger::init(level_filter, Config::default()).is_err()
                {
                    log::warn!("a logger was already installed");
                }

                log_panics::init();
            }
        }

        log::debug!("logger initialized");
    });
}
