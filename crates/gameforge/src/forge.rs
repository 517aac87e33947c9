//! Quota-gated generation entry point.

use gameforge_core::{GeneratedGame, GenerationRequest, Principal, UsageState};
use gameforge_error::GameforgeResult;
use gameforge_interface::{GameRepository, QuotaStore};
use gameforge_narrative::GenerationOrchestrator;
use gameforge_quota::{GameforgeConfig, InMemoryQuotaStore, QuotaGovernor};
use gameforge_storage::InMemoryGameRepository;
use std::sync::Arc;
use tracing::{info, instrument};

/// Generates, persists and accounts for game concepts on behalf of
/// principals.
///
/// A run goes through four steps: the quota check, concept generation, the
/// repository save and the usage increment. A principal over quota is
/// rejected before any generation service is called, and usage is only
/// recorded once the game is stored.
#[derive(Clone)]
pub struct GameForge {
    governor: Arc<QuotaGovernor>,
    orchestrator: Arc<GenerationOrchestrator>,
    repository: Arc<dyn GameRepository>,
}

impl std::fmt::Debug for GameForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameForge")
            .field("governor", &self.governor)
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl GameForge {
    /// Start building a forge.
    pub fn builder() -> GameForgeBuilder {
        GameForgeBuilder::default()
    }

    /// Quota governor in use.
    pub fn governor(&self) -> &QuotaGovernor {
        &self.governor
    }

    /// Generation orchestrator in use.
    pub fn orchestrator(&self) -> &GenerationOrchestrator {
        &self.orchestrator
    }

    /// Generate and store a game concept for `principal`.
    ///
    /// # Errors
    ///
    /// - `QuotaErrorKind::Exceeded` when the daily allowance is used up
    /// - quota store and repository failures, unchanged
    #[instrument(
        skip(self, request),
        fields(principal = %principal, genre = %request.genre(), ambiance = %request.ambiance())
    )]
    pub async fn generate(
        &self,
        principal: &Principal,
        request: &GenerationRequest,
    ) -> GameforgeResult<GeneratedGame> {
        self.governor.ensure_available(principal).await?;

        let concept = self.orchestrator.generate_concept(request).await;
        let id = self.repository.save_game(principal, &concept).await?;
        let usage = self.governor.increment(principal).await?;

        info!(
            game_id = %id,
            title = %concept.narrative.title,
            usage = usage.usage_count(),
            limit = usage.daily_limit(),
            "Game generated"
        );
        Ok(GeneratedGame { id, concept })
    }

    /// Generate and store a game from a random request.
    pub async fn generate_random(&self, principal: &Principal) -> GameforgeResult<GeneratedGame> {
        let request = self.orchestrator.random_request();
        self.generate(principal, &request).await
    }

    /// Current usage of `principal`, after any daily rollover.
    pub async fn usage(&self, principal: &Principal) -> GameforgeResult<UsageState> {
        self.governor.status(principal).await
    }
}

/// Builder for [`GameForge`].
///
/// Unset parts default to an in-memory quota store with the configured
/// daily limit, a template-only orchestrator and an in-memory repository.
#[derive(Default)]
pub struct GameForgeBuilder {
    governor: Option<QuotaGovernor>,
    quota_store: Option<Arc<dyn QuotaStore>>,
    config: Option<GameforgeConfig>,
    orchestrator: Option<GenerationOrchestrator>,
    repository: Option<Arc<dyn GameRepository>>,
}

impl GameForgeBuilder {
    /// Use a fully configured governor.
    pub fn governor(mut self, governor: QuotaGovernor) -> Self {
        self.governor = Some(governor);
        self
    }

    /// Quota store for the default governor.
    pub fn quota_store(mut self, store: Arc<dyn QuotaStore>) -> Self {
        self.quota_store = Some(store);
        self
    }

    /// Configuration for the default governor. Defaults to
    /// [`GameforgeConfig::load`].
    pub fn config(mut self, config: GameforgeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Generation orchestrator.
    pub fn orchestrator(mut self, orchestrator: GenerationOrchestrator) -> Self {
        self.orchestrator = Some(orchestrator);
        self
    }

    /// Game repository.
    pub fn repository(mut self, repository: Arc<dyn GameRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the forge, loading configuration and template tables as needed.
    pub fn build(self) -> GameforgeResult<GameForge> {
        let governor = match self.governor {
            Some(governor) => governor,
            None => {
                let config = match self.config {
                    Some(config) => config,
                    None => GameforgeConfig::load()?,
                };
                let store = self
                    .quota_store
                    .unwrap_or_else(|| Arc::new(InMemoryQuotaStore::new()));
                QuotaGovernor::from_config(store, &config)
            }
        };

        let orchestrator = match self.orchestrator {
            Some(orchestrator) => orchestrator,
            None => GenerationOrchestrator::builder().build()?,
        };

        Ok(GameForge {
            governor: Arc::new(governor),
            orchestrator: Arc::new(orchestrator),
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(InMemoryGameRepository::new())),
        })
    }
}
