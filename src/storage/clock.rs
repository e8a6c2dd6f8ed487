//! Clock collaborator
//!
//! Services never call `Utc::now()` directly so tests can pin time.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar day, used as the default transaction date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
