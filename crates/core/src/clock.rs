//! Clock abstraction: "today" is injected so shipping dates are testable.

use chrono::{NaiveDate, Utc};

/// Source of the current business date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Uses the system clock (UTC calendar date).
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always returns the same date. For tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

impl<C> Clock for std::sync::Arc<C>
where
    C: Clock + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
