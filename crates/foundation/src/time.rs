use std::time::Duration;

/// Editor clock reading in seconds since the session started.
///
/// Millisecond resolution: values built through [`Time::from_millis`] and
/// [`Time::after`] land on whole milliseconds, so a deadline computed from
/// `show_ms + ttl_ms` compares equal to `Time::from_millis(show_ms + ttl_ms)`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_millis(ms: u64) -> Self {
        Time(ms as f64 / 1000.0)
    }

    pub fn after(self, delay: Duration) -> Self {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        Time::from_millis(self.as_millis().saturating_add(delay_ms))
    }

    pub fn as_millis(self) -> u64 {
        (self.0 * 1000.0).round().max(0.0) as u64
    }
}
