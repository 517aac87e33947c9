//! GameForge: quota-gated generation of video game concepts.
//!
//! A [`GameForge`] checks a principal's daily quota, generates a complete
//! game concept (narrative, characters, locations, concept art prompts and
//! images), stores it and records the use. Each artifact prefers a text
//! generation service and falls back to template synthesis, so a concept is
//! always produced.
//!
//! # Example
//!
//! ```
//! use gameforge::{Ambiance, GameForge, GameforgeConfig, GenerationRequest, Genre, Principal};
//!
//! # #[tokio::main]
//! # async fn main() -> gameforge::GameforgeResult<()> {
//! let forge = GameForge::builder()
//!     .config(GameforgeConfig::default())
//!     .build()?;
//! let alice = Principal::new("alice");
//!
//! let request = GenerationRequest::new(Genre::Rpg, Ambiance::Fantasy, "dragons, prophecy");
//! let game = forge.generate(&alice, &request).await?;
//!
//! assert!(!game.concept.narrative.title.is_empty());
//! assert_eq!(*forge.usage(&alice).await?.usage_count(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod forge;

pub use forge::{GameForge, GameForgeBuilder};

pub use gameforge_core::{
    Ambiance, ArtPrompts, ArtSlot, CharacterRecord, CharacterRole, ConceptArtResult, GameConcept,
    GameId, GeneratedGame, GenerationRequest, GenerationTier, Genre, LocationRecord,
    NarrativeRecord, Principal, Provenance, StoredImage, UsageState, init_telemetry,
    shutdown_telemetry,
};
pub use gameforge_error::{
    GameforgeError, GameforgeErrorKind, GameforgeResult, GenerationError, GenerationErrorKind,
    QuotaError, QuotaErrorKind, StorageError, StorageErrorKind,
};
pub use gameforge_interface::{
    GameRepository, ImageGenerationService, PromptVariables, QuotaStore, TextGenerationService,
    render_prompt,
};
pub use gameforge_narrative::{GenerationOrchestrator, PromptSet, TemplateTables};
pub use gameforge_quota::{
    Clock, GameforgeConfig, InMemoryQuotaStore, ManualClock, QuotaGovernor, SystemClock,
};
pub use gameforge_storage::{FileSystemGameRepository, GameRecord, InMemoryGameRepository};
