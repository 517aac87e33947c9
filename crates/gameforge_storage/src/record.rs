//! Serializable form of a persisted game.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use gameforge_core::{
    ArtPrompts, ArtSlot, CharacterRecord, GameConcept, GameId, GenerationRequest, LocationRecord,
    NarrativeRecord, Principal, Provenance, StoredImage,
};
use serde::{Deserialize, Serialize};

/// Metadata of one stored concept art image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageEntry {
    slot: ArtSlot,
    /// Path relative to the game directory
    path: String,
    mime_type: String,
    size_bytes: u64,
}

impl ImageEntry {
    /// Describe an image about to be stored.
    pub fn describe(image: &StoredImage) -> Self {
        let slot = *image.slot();
        Self {
            slot,
            path: format!("{}/{}", slot.directory(), slot.filename()),
            mime_type: image.mime_type().to_string(),
            size_bytes: image.len() as u64,
        }
    }
}

/// Game record as written to `game.json`. Image bytes live beside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameRecord {
    id: GameId,
    owner: Principal,
    created_at: DateTime<Utc>,
    request: GenerationRequest,
    narrative: NarrativeRecord,
    characters: Vec<CharacterRecord>,
    locations: Vec<LocationRecord>,
    art_prompts: ArtPrompts,
    provenance: Provenance,
    images: Vec<ImageEntry>,
}

impl GameRecord {
    /// Record for a concept about to be stored.
    pub fn new(id: GameId, owner: &Principal, concept: &GameConcept) -> Self {
        Self {
            id,
            owner: owner.clone(),
            created_at: Utc::now(),
            request: concept.request.clone(),
            narrative: concept.narrative.clone(),
            characters: concept.characters.clone(),
            locations: concept.locations.clone(),
            art_prompts: concept.art_prompts.clone(),
            provenance: concept.provenance,
            images: concept.concept_art.images().map(ImageEntry::describe).collect(),
        }
    }

    /// Entry for a slot, when an image was stored for it.
    pub fn image(&self, slot: ArtSlot) -> Option<&ImageEntry> {
        self.images.iter().find(|entry| entry.slot == slot)
    }
}
