//! The assembled game concept and its identifiers.

use crate::{
    ArtPrompts, CharacterRecord, ConceptArtResult, GenerationRequest, LocationRecord,
    NarrativeRecord, Provenance,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier that owns quota and generated games.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap an account identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier assigned to a persisted game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConcept {
    /// Parameters the concept was generated from
    pub request: GenerationRequest,
    /// Title and narrative texts
    pub narrative: NarrativeRecord,
    /// At most three characters, in source order
    pub characters: Vec<CharacterRecord>,
    /// At most three locations, in source order
    pub locations: Vec<LocationRecord>,
    /// Prompts sent to the image service
    pub art_prompts: ArtPrompts,
    /// Images that were produced
    pub concept_art: ConceptArtResult,
    /// Tier used for each artifact
    pub provenance: Provenance,
}

/// A persisted game concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGame {
    /// Identifier returned by the repository
    pub id: GameId,
    /// The concept that was stored
    pub concept: GameConcept,
}
