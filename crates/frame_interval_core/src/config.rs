use instant::Duration;
use serde::Deserialize;

use crate::TimerError;

/// Floor applied to every interval, in milliseconds.
pub const DEFAULT_MIN_INTERVAL_MS: f64 = 100.0;

/// Interval used by [start_with_defaults](crate::RepeatingFrameTimer::start_with_defaults).
pub const DEFAULT_INTERVAL_MS: f64 = 100.0;

pub const DEFAULT_RUN_IMMEDIATE: bool = false;

/// Timer configuration.
///
/// Can be deserialized from any serde format; missing fields take their default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimerConfig {
    /// Minimum elapsed time between two firings. Shorter intervals are raised to this.
    pub min_interval_ms: f64,
    pub default_interval_ms: f64,
    pub run_immediate: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            default_interval_ms: DEFAULT_INTERVAL_MS,
            run_immediate: DEFAULT_RUN_IMMEDIATE,
        }
    }
}

impl TimerConfig {
    /// Returns `interval_ms` raised to the configured floor.
    pub fn clamp_interval_ms(&self, interval_ms: f64) -> f64 {
        interval_ms.max(self.min_interval_ms)
    }
}

/// Converts a millisecond count coming from an untyped caller into a [Duration].
///
/// Negative values become zero and are later raised by the clamp. NaN and
/// infinities are rejected.
pub fn interval_from_ms(interval_ms: f64) -> Result<Duration, TimerError> {
    if !interval_ms.is_finite() {
        return Err(TimerError::InvalidArgument(format!(
            "interval must be a finite number of milliseconds, got {}",
            interval_ms
        )));
    }

    Ok(Duration::from_micros((interval_ms.max(0.0) * 1000.0).round() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_config_from_yaml() {
        let content = "
            min_interval_ms: 16.0
            default_interval_ms: 250.0
            run_immediate: true
        ";

        let config: TimerConfig = serde_yaml::from_str(content).unwrap();

        assert_eq!(
            config,
            TimerConfig {
                min_interval_ms: 16.0,
                default_interval_ms: 250.0,
                run_immediate: true,
            }
        );
    }

    #[test]
    fn decode_partial_config_from_yaml() {
        let content = "
            run_immediate: true
        ";

        let config: TimerConfig = serde_yaml::from_str(content).unwrap();

        assert_eq!(config.min_interval_ms, DEFAULT_MIN_INTERVAL_MS);
        assert_eq!(config.default_interval_ms, DEFAULT_INTERVAL_MS);
        assert!(config.run_immediate);
    }

    #[test]
    fn clamp_raises_short_intervals() {
        let config = TimerConfig::default();

        for requested in [0.0, 1.0, 16.7, 50.0, 99.9] {
            assert_eq!(config.clamp_interval_ms(requested), DEFAULT_MIN_INTERVAL_MS);
        }
        assert_eq!(config.clamp_interval_ms(250.0), 250.0);
    }

    #[test]
    fn interval_from_ms_rejects_non_finite() {
        assert!(matches!(
            interval_from_ms(f64::NAN),
            Err(TimerError::InvalidArgument(_))
        ));
        assert!(matches!(
            interval_from_ms(f64::INFINITY),
            Err(TimerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn interval_from_ms_floors_negative_to_zero() {
        assert_eq!(interval_from_ms(-20.0), Ok(Duration::ZERO));
        assert_eq!(interval_from_ms(150.0), Ok(Duration::from_millis(150)));
    }
}
