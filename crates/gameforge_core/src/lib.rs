//! Core data types for GameForge.
//!
//! This crate provides the value objects passed between the quota governor,
//! the generation pipeline and the persistence collaborators.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod concept_art;
mod game;
mod location;
mod narrative;
mod provenance;
mod request;
mod telemetry;
mod usage;

pub use character::{CharacterRecord, CharacterRecordBuilder, CharacterRole};
pub use concept_art::{ArtPrompts, ArtSlot, ConceptArtResult, StoredImage};
pub use game::{GameConcept, GameId, GeneratedGame, Principal};
pub use location::{LocationRecord, LocationRecordBuilder};
pub use narrative::{NarrativeRecord, NarrativeRecordBuilder};
pub use provenance::{ArtifactKind, Generated, GenerationTier, Provenance};
pub use request::{Ambiance, GenerationRequest, Genre};
pub use telemetry::{init_telemetry, shutdown_telemetry};
pub use usage::UsageState;
