//! In-memory game repository.

use async_trait::async_trait;
use gameforge_core::{GameConcept, GameId, Principal};
use gameforge_error::GameforgeResult;
use gameforge_interface::GameRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Game repository backed by a map. Contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameRepository {
    games: Arc<RwLock<HashMap<GameId, (Principal, GameConcept)>>>,
}

impl InMemoryGameRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored concept and its owner.
    pub async fn get(&self, id: &GameId) -> Option<(Principal, GameConcept)> {
        self.games.read().await.get(id).cloned()
    }

    /// Ids of every game owned by `owner`.
    pub async fn owned_by(&self, owner: &Principal) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .games
            .read()
            .await
            .iter()
            .filter(|(_, (stored_owner, _))| stored_owner == owner)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Number of stored games.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    /// Check if no game is stored.
    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }

    /// Remove every game.
    pub async fn clear(&self) {
        self.games.write().await.clear();
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[tracing::instrument(skip(self, concept), fields(owner = %owner))]
    async fn save_game(&self, owner: &Principal, concept: &GameConcept) -> GameforgeResult<GameId> {
        let id = GameId::new();
        self.games
            .write()
            .await
            .insert(id, (owner.clone(), concept.clone()));
        tracing::debug!(game_id = %id, "Stored game in memory");
        Ok(id)
    }
}
