// --- File: crates/playon_availability/src/clock.rs ---
use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use playon_config::ScheduleConfig;

/// Source of the facility's wall-clock time. "Today" and "the current hour"
/// are always read through this so the day view can be tested at any instant.
pub trait Clock: Send + Sync {
    /// Local date and time in the facility time zone.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        SystemClock { tz }
    }

    pub fn from_config(schedule: &ScheduleConfig) -> Self {
        Self::new(schedule.tz())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        FixedClock { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
