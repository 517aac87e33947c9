//! Quota governor.

use crate::{Clock, GameforgeConfig, SystemClock};
use gameforge_core::{Principal, UsageState};
use gameforge_error::{GameforgeResult, QuotaError, QuotaErrorKind};
use gameforge_interface::QuotaStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument};

/// Gates generation on a per-principal daily allowance.
///
/// Every operation loads the principal's state, applies the day rollover,
/// and writes back under a lock held per principal, so concurrent calls for
/// the same principal never interleave inside one operation. Different
/// principals proceed independently.
///
/// `can_use` followed by `increment` is two operations: two concurrent
/// callers can both pass the check before either increments. Use
/// [`QuotaGovernor::try_acquire`] when the check and the increment must be
/// one step.
pub struct QuotaGovernor {
    store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    default_daily_limit: u32,
    locks: Mutex<HashMap<Principal, Arc<tokio::sync::Mutex<()>>>>,
}

impl QuotaGovernor {
    /// Governor on the system clock.
    ///
    /// `default_daily_limit` is given to principals seen for the first time.
    pub fn new(store: Arc<dyn QuotaStore>, default_daily_limit: u32) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), default_daily_limit)
    }

    /// Governor with an explicit clock.
    pub fn with_clock(
        store: Arc<dyn QuotaStore>,
        clock: Arc<dyn Clock>,
        default_daily_limit: u32,
    ) -> Self {
        Self {
            store,
            clock,
            default_daily_limit: default_daily_limit.max(1),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Governor using the configured default limit.
    pub fn from_config(store: Arc<dyn QuotaStore>, config: &GameforgeConfig) -> Self {
        Self::new(store, *config.quota().default_daily_limit())
    }

    /// Lock serialising operations on one principal.
    ///
    /// Entries nobody holds are dropped first, so the map only tracks
    /// principals with an operation in flight.
    fn lock_for(&self, principal: &Principal) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(principal.clone()).or_default().clone()
    }

    /// Load state, creating it on first touch, and apply the day rollover.
    ///
    /// Returns the state and whether it differs from what is stored.
    async fn current(&self, principal: &Principal) -> GameforgeResult<(UsageState, bool)> {
        let today = self.clock.today();
        match self.store.load(principal).await? {
            Some(mut state) => {
                let reset = state.rollover(today);
                if reset {
                    debug!(%principal, %today, "Daily usage reset");
                }
                Ok((state, reset))
            }
            None => {
                debug!(%principal, limit = self.default_daily_limit, "New principal");
                Ok((UsageState::new(self.default_daily_limit, today), true))
            }
        }
    }

    /// Whether the principal may run another generation today.
    ///
    /// A stale date resets the counter and is persisted even when nothing is
    /// incremented afterwards.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn can_use(&self, principal: &Principal) -> GameforgeResult<bool> {
        let lock = self.lock_for(principal);
        let _guard = lock.lock().await;

        let (state, dirty) = self.current(principal).await?;
        if dirty {
            self.store.save(principal, &state).await?;
        }

        let allowed = state.has_capacity();
        debug!(
            usage = state.usage_count(),
            limit = state.daily_limit(),
            allowed,
            "Quota checked"
        );
        Ok(allowed)
    }

    /// Fail with `QuotaErrorKind::Exceeded` when the allowance is used up.
    ///
    /// Same semantics as [`QuotaGovernor::can_use`], with the usage figures in
    /// the error.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn ensure_available(&self, principal: &Principal) -> GameforgeResult<UsageState> {
        let lock = self.lock_for(principal);
        let _guard = lock.lock().await;

        let (state, dirty) = self.current(principal).await?;
        if dirty {
            self.store.save(principal, &state).await?;
        }

        if state.has_capacity() {
            Ok(state)
        } else {
            info!(
                usage = state.usage_count(),
                limit = state.daily_limit(),
                "Daily quota exhausted"
            );
            Err(QuotaError::new(QuotaErrorKind::Exceeded {
                principal: principal.to_string(),
                usage: *state.usage_count(),
                limit: *state.daily_limit(),
            })
            .into())
        }
    }

    /// Record one generation, whatever the current count.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn increment(&self, principal: &Principal) -> GameforgeResult<UsageState> {
        let lock = self.lock_for(principal);
        let _guard = lock.lock().await;

        let (mut state, _) = self.current(principal).await?;
        state.record_use();
        self.store.save(principal, &state).await?;

        debug!(
            usage = state.usage_count(),
            limit = state.daily_limit(),
            "Usage incremented"
        );
        Ok(state)
    }

    /// Check and increment in one step.
    ///
    /// Returns true and records a use when the allowance permits, false
    /// otherwise.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn try_acquire(&self, principal: &Principal) -> GameforgeResult<bool> {
        let lock = self.lock_for(principal);
        let _guard = lock.lock().await;

        let (mut state, dirty) = self.current(principal).await?;
        let acquired = state.has_capacity();
        if acquired {
            state.record_use();
        }
        if acquired || dirty {
            self.store.save(principal, &state).await?;
        }

        debug!(usage = state.usage_count(), acquired, "Quota acquisition");
        Ok(acquired)
    }

    /// Current usage after rollover, for reporting.
    #[instrument(skip(self), fields(principal = %principal))]
    pub async fn status(&self, principal: &Principal) -> GameforgeResult<UsageState> {
        let lock = self.lock_for(principal);
        let _guard = lock.lock().await;

        let (state, dirty) = self.current(principal).await?;
        if dirty {
            self.store.save(principal, &state).await?;
        }
        Ok(state)
    }
}

impl std::fmt::Debug for QuotaGovernor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaGovernor")
            .field("default_daily_limit", &self.default_daily_limit)
            .finish_non_exhaustive()
    }
}
