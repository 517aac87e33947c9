//! Game concept generation for GameForge.
//!
//! This crate turns a [`GenerationRequest`](gameforge_core::GenerationRequest)
//! into a complete [`GameConcept`](gameforge_core::GameConcept). Each artifact
//! is first requested from a text generation service and validated; when the
//! service is absent, unreachable or answers with something unusable, the
//! artifact is synthesized from template tables instead.
//!
//! # Architecture
//!
//! - [`SectionSchema`] recovers labeled sections from free text
//! - [`extract_bounded_list`] recovers a capped list of records from free text
//! - [`TemplateSynthesizer`] builds every artifact from [`TemplateTables`]
//! - [`Artifact`] pairs the two tiers for each artifact kind
//! - [`GenerationOrchestrator`] runs the tiers and the [`ConceptArtPipeline`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod concept_art;
mod extraction;
mod orchestrator;
mod prompts;
mod sections;
mod synthesizer;
mod templates;

pub use artifact::{
    ArtPromptArtifact, Artifact, ArtifactContext, CharacterArtifact, LocationArtifact,
    NarrativeArtifact,
};
pub use concept_art::ConceptArtPipeline;
pub use extraction::{MAX_LIST_ITEMS, extract_bounded_list, extract_records};
pub use orchestrator::{GenerationOrchestrator, GenerationOrchestratorBuilder};
pub use prompts::PromptSet;
pub use sections::{SectionField, SectionMap, SectionSchema};
pub use synthesizer::TemplateSynthesizer;
pub use templates::{
    Archetype, CharacterSeed, CharacterTables, DEFAULT_KEY, KeywordPools, LocationSeed,
    LocationTables, NarrativeTables, TemplateTables, TextTable, TitlePools,
};
