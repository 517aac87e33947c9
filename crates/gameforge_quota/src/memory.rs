//! In-memory quota store.

use async_trait::async_trait;
use gameforge_core::{Principal, UsageState};
use gameforge_error::GameforgeResult;
use gameforge_interface::QuotaStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Quota store backed by a map. Clones share state.
///
/// Suitable for tests and single-process deployments; counters are lost on
/// restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuotaStore {
    states: Arc<RwLock<HashMap<Principal, UsageState>>>,
}

impl InMemoryQuotaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a principal's state.
    pub async fn insert(&self, principal: Principal, state: UsageState) {
        self.states.write().await.insert(principal, state);
    }

    /// Stored state without rollover.
    pub async fn get(&self, principal: &Principal) -> Option<UsageState> {
        self.states.read().await.get(principal).copied()
    }

    /// Number of principals tracked.
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    /// Whether no principal is tracked.
    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }

    /// Forget every principal.
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn load(&self, principal: &Principal) -> GameforgeResult<Option<UsageState>> {
        Ok(self.get(principal).await)
    }

    async fn save(&self, principal: &Principal, state: &UsageState) -> GameforgeResult<()> {
        self.states.write().await.insert(principal.clone(), *state);
        Ok(())
    }
}
