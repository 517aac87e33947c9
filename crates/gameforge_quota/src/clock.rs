//! Sources of the current calendar date.

use chrono::{NaiveDate, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// Supplies "today" to the quota governor.
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock whose date is set by hand. Clones share the same date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gameforge_quota::{Clock, ManualClock};
///
/// let clock = ManualClock::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
/// clock.advance_days(1);
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    date: Arc<RwLock<NaiveDate>>,
}

impl ManualClock {
    /// Clock frozen at `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(RwLock::new(date)),
        }
    }

    /// Jump to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.date.write().unwrap_or_else(PoisonError::into_inner) = date;
    }

    /// Move forward by whole days. Saturates at the last representable date.
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = date.checked_add_days(chrono::Days::new(days)) {
            *date = next;
        }
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.date.read().unwrap_or_else(PoisonError::into_inner)
    }
}
