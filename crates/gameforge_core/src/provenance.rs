//! Which tier produced each artifact.

use serde::{Deserialize, Serialize};

/// Strategy that produced an artifact.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationTier {
    /// Parsed from the text generation service
    #[display("AI")]
    Ai,
    /// Synthesized from static tables
    #[display("TEMPLATE")]
    Template,
}

/// The independently generated parts of a game concept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Title and narrative texts
    #[display("narrative")]
    Narrative,
    /// Cast of characters
    #[display("characters")]
    Characters,
    /// Set of locations
    #[display("locations")]
    Locations,
    /// Concept art prompts
    #[display("art_prompts")]
    ArtPrompts,
}

/// A value tagged with the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    /// The produced value
    pub value: T,
    /// Tier that produced it
    pub tier: GenerationTier,
}

impl<T> Generated<T> {
    /// Tag a value produced by the AI tier.
    pub fn ai(value: T) -> Self {
        Self {
            value,
            tier: GenerationTier::Ai,
        }
    }

    /// Tag a value produced by the template tier.
    pub fn template(value: T) -> Self {
        Self {
            value,
            tier: GenerationTier::Template,
        }
    }

    /// Drop the tag.
    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Tier used for each artifact of one game concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// Tier of the narrative
    pub narrative: GenerationTier,
    /// Tier of the characters
    pub characters: GenerationTier,
    /// Tier of the locations
    pub locations: GenerationTier,
    /// Tier of the art prompts
    pub art_prompts: GenerationTier,
}

impl Provenance {
    /// Tier recorded for an artifact kind.
    pub fn tier(&self, kind: ArtifactKind) -> GenerationTier {
        match kind {
            ArtifactKind::Narrative => self.narrative,
            ArtifactKind::Characters => self.characters,
            ArtifactKind::Locations => self.locations,
            ArtifactKind::ArtPrompts => self.art_prompts,
        }
    }

    /// True when every artifact came from the template tier.
    pub fn all_template(&self) -> bool {
        [self.narrative, self.characters, self.locations, self.art_prompts]
            .iter()
            .all(|tier| *tier == GenerationTier::Template)
    }
}
