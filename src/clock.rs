//! Wall-clock time helpers
//!
//! Deadlines are absolute unix milliseconds so they survive a restart
//! through the snapshot file.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Absolute deadline `seconds` from now. Non-positive values yield a
/// deadline that has already passed.
pub fn deadline_after(seconds: i64) -> u64 {
    let now = now_ms();
    if seconds <= 0 {
        return now;
    }
    now.saturating_add((seconds as u64).saturating_mul(1000))
}

/// Convert a millisecond deadline to fractional unix seconds
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

/// Convert fractional unix seconds to a millisecond deadline
pub fn secs_to_ms(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_after() {
        let before = now_ms();
        let deadline = deadline_after(10);
        assert!(deadline >= before + 10_000);
        assert!(deadline_after(0) <= now_ms());
        assert!(deadline_after(-5) <= now_ms());
    }

    #[test]
    fn test_secs_conversion() {
        assert_eq!(secs_to_ms(ms_to_secs(1_700_000_000_250)), 1_700_000_000_250);
        assert_eq!(secs_to_ms(f64::NAN), 0);
        assert_eq!(secs_to_ms(-3.0), 0);
    }
}
