//! Injected time source.
//!
//! The upload pipeline advances on fixed-duration ticks. Routing every
//! time read and delay through `Clock` lets tests drive the full stage
//! sequence without real wall-clock waits.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock: sleeps return immediately and advance the
/// reported time by the requested duration.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    slept: Mutex<Duration>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            slept: Mutex::new(Duration::ZERO),
        }
    }

    /// Total time requested via `sleep` so far.
    pub fn total_slept(&self) -> Duration {
        self.slept.lock().map(|d| *d).unwrap_or(Duration::ZERO)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        // Arbitrary fixed origin keeps test output stable.
        Self::at(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap())
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|_| Utc::now())
    }

    async fn sleep(&self, duration: Duration) {
        if let Ok(mut now) = self.now.lock() {
            if let Ok(advanced) = chrono::Duration::from_std(duration) {
                *now = *now + advanced;
            }
        }
        if let Ok(mut slept) = self.slept.lock() {
            *slept += duration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn manual_clock_advances_on_sleep() {
        let clock = ManualClock::default();
        let before = clock.now();
        clock.sleep(Duration::from_secs(5)).await;
        assert_eq!(clock.now() - before, chrono::Duration::seconds(5));
        assert_eq!(clock.total_slept(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn manual_clock_accumulates_sleeps() {
        let clock = ManualClock::default();
        for _ in 0..6 {
            clock.sleep(Duration::from_secs(1)).await;
        }
        assert_eq!(clock.total_slept(), Duration::from_secs(6));
    }

    #[test]
    fn system_clock_tracks_wall_time() {
        let clock = SystemClock;
        let a = clock.now();
        let b = Utc::now();
        assert!((b - a).num_seconds().abs() < 5);
    }
}
