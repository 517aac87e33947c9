//! Narrative text of a game concept.

use serde::{Deserialize, Serialize};

/// Title plus the four narrative texts of a game.
///
/// `title` is never empty. The other fields may be empty when the text
/// service omitted the matching section.
///
/// # Examples
///
/// ```
/// use gameforge_core::NarrativeRecordBuilder;
///
/// let narrative = NarrativeRecordBuilder::default()
///     .title("Neon Rebellion")
///     .main_story("Une IA rebelle soulève la mégalopole.")
///     .build()
///     .unwrap();
/// assert!(narrative.description.is_empty());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct NarrativeRecord {
    /// Game title
    pub title: String,
    /// Short pitch
    #[serde(default)]
    pub description: String,
    /// Description of the game world
    #[serde(default)]
    pub universe_description: String,
    /// Main storyline
    #[serde(default)]
    pub main_story: String,
    /// Core gameplay mechanics
    #[serde(default)]
    pub gameplay_mechanics: String,
}
