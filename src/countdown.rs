//! Date-diff readout for the landing page
//!
//! The page shows how long it has been since a fixed start date. The
//! arithmetic is plain millisecond bookkeeping; the DOM update lives in
//! the web entry point.

/// Days/hours/minutes/seconds of a millisecond interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// Break a millisecond difference into display units. Negative input
/// (a start date still in the future) counts the same interval.
pub fn breakdown(diff_ms: f64) -> Breakdown {
    let total_seconds = (diff_ms.abs() / 1000.0) as u64;
    Breakdown {
        days: total_seconds / 86_400,
        hours: total_seconds % 86_400 / 3_600,
        minutes: total_seconds % 3_600 / 60,
        seconds: total_seconds % 60,
    }
}

/// Two-digit zero-padded field, the way the counter displays them
pub fn pad(value: u64) -> String {
    format!("{value:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval() {
        let b = breakdown(0.0);
        assert_eq!(b, Breakdown { days: 0, hours: 0, minutes: 0, seconds: 0 });
    }

    #[test]
    fn test_mixed_interval() {
        // 3 days, 4 hours, 5 minutes, 6 seconds
        let ms = ((3 * 86_400 + 4 * 3_600 + 5 * 60 + 6) * 1000) as f64;
        let b = breakdown(ms);
        assert_eq!(b, Breakdown { days: 3, hours: 4, minutes: 5, seconds: 6 });
    }

    #[test]
    fn test_sub_second_remainder_floors() {
        let b = breakdown(61_999.0);
        assert_eq!(b.minutes, 1);
        assert_eq!(b.seconds, 1);
    }

    #[test]
    fn test_future_start_counts_the_same() {
        assert_eq!(breakdown(-90_000.0), breakdown(90_000.0));
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad(0), "00");
        assert_eq!(pad(7), "07");
        assert_eq!(pad(42), "42");
        assert_eq!(pad(365), "365");
    }
}
