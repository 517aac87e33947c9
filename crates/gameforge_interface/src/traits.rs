//! Collaborator traits.

use crate::PromptVariables;
use async_trait::async_trait;
use gameforge_core::{GameConcept, GameId, Principal, UsageState};
use gameforge_error::GameforgeResult;

/// External text generation service.
///
/// Transport, model choice and sampling parameters are the implementer's
/// concern. Any error is treated as a failed AI tier and answered with
/// template synthesis.
#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Complete a prompt.
    ///
    /// `prompt_template` uses `{name}` placeholders filled from `variables`;
    /// [`render_prompt`](crate::render_prompt) does the substitution.
    async fn complete(
        &self,
        prompt_template: &str,
        variables: &PromptVariables,
    ) -> GameforgeResult<String>;
}

/// External image generation service.
#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Produce image bytes for a textual prompt.
    async fn generate(&self, prompt: &str) -> GameforgeResult<Vec<u8>>;
}

/// Persistence of generated games.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Store a game concept for its owner and return the assigned id.
    async fn save_game(&self, owner: &Principal, concept: &GameConcept) -> GameforgeResult<GameId>;
}

/// Persistence of per-principal usage counters.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Stored state, or `None` for a principal never seen before.
    async fn load(&self, principal: &Principal) -> GameforgeResult<Option<UsageState>>;

    /// Replace the stored state.
    async fn save(&self, principal: &Principal, state: &UsageState) -> GameforgeResult<()>;
}
