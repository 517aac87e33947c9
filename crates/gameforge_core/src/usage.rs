//! Per-principal daily usage counters.

use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Daily generation counter of one principal.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gameforge_core::UsageState;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let tuesday = monday.succ_opt().unwrap();
///
/// let mut state = UsageState::new(2, monday);
/// state.record_use();
/// state.record_use();
/// assert!(!state.has_capacity());
///
/// assert!(state.rollover(tuesday));
/// assert!(state.has_capacity());
/// assert_eq!(*state.usage_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct UsageState {
    usage_count: u32,
    daily_limit: u32,
    last_reset_date: NaiveDate,
}

impl UsageState {
    /// Fresh state with no usage recorded on `today`.
    ///
    /// A zero limit is raised to one: the allowance is always positive.
    pub fn new(daily_limit: u32, today: NaiveDate) -> Self {
        Self {
            usage_count: 0,
            daily_limit: daily_limit.max(1),
            last_reset_date: today,
        }
    }

    /// Rebuild a state from stored values.
    pub fn from_parts(usage_count: u32, daily_limit: u32, last_reset_date: NaiveDate) -> Self {
        Self {
            usage_count,
            daily_limit: daily_limit.max(1),
            last_reset_date,
        }
    }

    /// Reset the counter if `today` is later than the last reset.
    ///
    /// Returns true when a reset happened.
    pub fn rollover(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date < today {
            self.usage_count = 0;
            self.last_reset_date = today;
            true
        } else {
            false
        }
    }

    /// Whether another generation fits in today's allowance.
    pub fn has_capacity(&self) -> bool {
        self.usage_count < self.daily_limit
    }

    /// Count one generation.
    pub fn record_use(&mut self) {
        self.usage_count = self.usage_count.saturating_add(1);
    }

    /// Generations left today.
    pub fn remaining(&self) -> u32 {
        self.daily_limit.saturating_sub(self.usage_count)
    }
}
