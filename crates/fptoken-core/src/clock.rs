//! Fuente de tiempo inyectable.
//!
//! El issuer y el validator leen la hora a través de `Clock`, de modo que los
//! tests y la demo pueden fijar el instante sin tocar el reloj del sistema.
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    /// Milisegundos desde epoch.
    fn now_millis(&self) -> i64;
}

/// Reloj de pared (`chrono::Utc::now`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 { Utc::now().timestamp_millis() }
}

/// Reloj controlado manualmente.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self { millis: AtomicI64::new(millis) }
    }

    pub fn at(instant: DateTime<Utc>) -> Self { Self::new(instant.timestamp_millis()) }

    pub fn set(&self, millis: i64) { self.millis.store(millis, Ordering::SeqCst); }

    pub fn advance(&self, millis: i64) { self.millis.fetch_add(millis, Ordering::SeqCst); }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 { self.millis.load(Ordering::SeqCst) }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> i64 { (**self).now_millis() }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> i64 { (**self).now_millis() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_millis(), 10);
        clock.advance(5);
        assert_eq!(clock.now_millis(), 15);
        clock.set(0);
        assert_eq!(clock.now_millis(), 0);
    }

    #[test]
    fn manual_clock_from_datetime() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ManualClock::at(instant).now_millis(), 1_704_067_200_000);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
