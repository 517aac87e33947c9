//! Tests for the quota governor.

use async_trait::async_trait;
use chrono::NaiveDate;
use gameforge_core::{Principal, UsageState};
use gameforge_error::{GameforgeErrorKind, GameforgeResult, QuotaError, QuotaErrorKind};
use gameforge_interface::QuotaStore;
use gameforge_quota::{Clock, InMemoryQuotaStore, ManualClock, QuotaGovernor};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup(limit: u32) -> (QuotaGovernor, InMemoryQuotaStore, ManualClock) {
    let store = InMemoryQuotaStore::new();
    let clock = ManualClock::new(date(2024, 6, 10));
    let governor = QuotaGovernor::with_clock(Arc::new(store.clone()), Arc::new(clock.clone()), limit);
    (governor, store, clock)
}

#[tokio::test]
async fn test_new_principal_starts_empty() {
    let (governor, store, clock) = setup(10);
    let alice = Principal::new("alice");

    assert!(governor.can_use(&alice).await.unwrap());

    let stored = store.get(&alice).await.unwrap();
    assert_eq!(*stored.usage_count(), 0);
    assert_eq!(*stored.daily_limit(), 10);
    assert_eq!(*stored.last_reset_date(), clock.today());
}

#[tokio::test]
async fn test_limit_reached_blocks() {
    let (governor, _store, _clock) = setup(3);
    let bob = Principal::new("bob");

    for _ in 0..3 {
        assert!(governor.can_use(&bob).await.unwrap());
        governor.increment(&bob).await.unwrap();
    }
    assert!(!governor.can_use(&bob).await.unwrap());
}

#[tokio::test]
async fn test_can_use_is_idempotent_within_a_day() {
    let (governor, store, clock) = setup(10);
    let carol = Principal::new("carol");
    store
        .insert(carol.clone(), UsageState::from_parts(10, 10, clock.today()))
        .await;

    let first = governor.can_use(&carol).await.unwrap();
    let second = governor.can_use(&carol).await.unwrap();
    assert_eq!(first, second);
    assert!(!first);

    store
        .insert(carol.clone(), UsageState::from_parts(4, 10, clock.today()))
        .await;
    let first = governor.can_use(&carol).await.unwrap();
    let second = governor.can_use(&carol).await.unwrap();
    assert_eq!(first, second);
    assert!(first);
}

#[tokio::test]
async fn test_rollover_on_read_resets_and_persists() {
    let (governor, store, clock) = setup(10);
    let dave = Principal::new("dave");
    let yesterday = date(2024, 6, 9);
    store
        .insert(dave.clone(), UsageState::from_parts(10, 10, yesterday))
        .await;

    assert!(governor.can_use(&dave).await.unwrap());

    let stored = store.get(&dave).await.unwrap();
    assert_eq!(*stored.usage_count(), 0);
    assert_eq!(*stored.last_reset_date(), clock.today());
}

#[tokio::test]
async fn test_increment_applies_rollover_first() {
    let (governor, store, _clock) = setup(5);
    let erin = Principal::new("erin");
    store
        .insert(erin.clone(), UsageState::from_parts(5, 5, date(2024, 6, 1)))
        .await;

    let state = governor.increment(&erin).await.unwrap();
    assert_eq!(*state.usage_count(), 1);
}

#[tokio::test]
async fn test_increment_is_unconditional() {
    let (governor, _store, _clock) = setup(1);
    let frank = Principal::new("frank");

    governor.increment(&frank).await.unwrap();
    let state = governor.increment(&frank).await.unwrap();
    assert_eq!(*state.usage_count(), 2);
    assert!(!governor.can_use(&frank).await.unwrap());
}

#[tokio::test]
async fn test_clock_advance_restores_allowance() {
    let (governor, _store, clock) = setup(1);
    let gina = Principal::new("gina");

    governor.increment(&gina).await.unwrap();
    assert!(!governor.can_use(&gina).await.unwrap());

    clock.advance_days(1);
    assert!(governor.can_use(&gina).await.unwrap());
}

#[tokio::test]
async fn test_ensure_available_reports_usage() {
    let (governor, store, clock) = setup(10);
    let hank = Principal::new("hank");
    store
        .insert(hank.clone(), UsageState::from_parts(10, 10, clock.today()))
        .await;

    let err = governor.ensure_available(&hank).await.unwrap_err();
    assert!(err.is_quota_exceeded());
    assert!(err.to_string().contains("10 of 10"));
}

#[tokio::test]
async fn test_try_acquire_never_overshoots() {
    let (governor, store, _clock) = setup(5);
    let governor = Arc::new(governor);
    let ivy = Principal::new("ivy");

    let mut handles = Vec::new();
    for _ in 0..20 {
        let governor = Arc::clone(&governor);
        let ivy = ivy.clone();
        handles.push(tokio::spawn(async move {
            governor.try_acquire(&ivy).await.unwrap()
        }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            granted += 1;
        }
    }

    assert_eq!(granted, 5);
    assert_eq!(*store.get(&ivy).await.unwrap().usage_count(), 5);
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let (governor, store, _clock) = setup(100);
    let governor = Arc::new(governor);
    let jay = Principal::new("jay");

    let mut handles = Vec::new();
    for _ in 0..25 {
        let governor = Arc::clone(&governor);
        let jay = jay.clone();
        handles.push(tokio::spawn(async move {
            governor.increment(&jay).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(*store.get(&jay).await.unwrap().usage_count(), 25);
}

#[tokio::test]
async fn test_principals_are_independent() {
    let (governor, _store, _clock) = setup(1);
    let kim = Principal::new("kim");
    let lee = Principal::new("lee");

    governor.increment(&kim).await.unwrap();
    assert!(!governor.can_use(&kim).await.unwrap());
    assert!(governor.can_use(&lee).await.unwrap());
}

struct BrokenStore;

#[async_trait]
impl QuotaStore for BrokenStore {
    async fn load(&self, _principal: &Principal) -> GameforgeResult<Option<UsageState>> {
        Err(QuotaError::new(QuotaErrorKind::Store("connection reset".into())).into())
    }

    async fn save(&self, _principal: &Principal, _state: &UsageState) -> GameforgeResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_store_failure_surfaces() {
    let governor = QuotaGovernor::new(Arc::new(BrokenStore), 10);
    let err = governor.can_use(&Principal::new("nia")).await.unwrap_err();

    assert!(matches!(err.kind(), GameforgeErrorKind::Quota(_)));
    assert!(!err.is_quota_exceeded());
}
