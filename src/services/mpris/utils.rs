use std::time::Duration;

/// Convert Duration to MPRIS position in microseconds
pub fn to_mpris_micros(duration: Duration) -> i64 {
    i64::try_from(duration.as_micros()).unwrap_or(i64::MAX)
}

/// Convert MPRIS microseconds to a Duration, clamping negatives to zero
pub fn from_mpris_micros(micros: i64) -> Duration {
    Duration::from_micros(u64::try_from(micros).unwrap_or(0))
}
