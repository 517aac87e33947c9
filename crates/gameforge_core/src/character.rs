//! Characters of a game concept.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Narrative role of a character.
///
/// Parsing is lenient: codes are matched case-insensitively, the French
/// labels are accepted, and `"A ou B"` takes the first recognised
/// alternative. Anything else becomes [`CharacterRole::Neutral`].
///
/// # Examples
///
/// ```
/// use gameforge_core::CharacterRole;
///
/// assert_eq!(CharacterRole::lenient("Allié"), CharacterRole::Ally);
/// assert_eq!(CharacterRole::lenient("PROTAGONIST ou ALLY"), CharacterRole::Protagonist);
/// assert_eq!(CharacterRole::lenient("villager"), CharacterRole::Neutral);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum CharacterRole {
    /// Player character
    Protagonist,
    /// Opposing force
    Antagonist,
    /// Companion
    Ally,
    /// Guide
    Mentor,
    /// Anyone else
    #[default]
    Neutral,
}

impl CharacterRole {
    /// Parse a role the way loosely formatted service output spells it.
    pub fn lenient(raw: &str) -> Self {
        raw.split(" ou ")
            .flat_map(|part| part.split(['/', '|']))
            .find_map(Self::parse_single)
            .unwrap_or_default()
    }

    fn parse_single(raw: &str) -> Option<Self> {
        let token = raw.trim().trim_matches(|c: char| c == '*' || c == '"');
        if let Ok(role) = Self::from_str(token) {
            return Some(role);
        }
        match token.to_lowercase().as_str() {
            "protagoniste" | "héros" | "heros" | "hero" => Some(Self::Protagonist),
            "antagoniste" | "méchant" | "villain" => Some(Self::Antagonist),
            "allié" | "allie" | "alliée" => Some(Self::Ally),
            "neutre" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Human readable French label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Protagonist => "Protagoniste",
            Self::Antagonist => "Antagoniste",
            Self::Ally => "Allié",
            Self::Mentor => "Mentor",
            Self::Neutral => "Neutre",
        }
    }
}

impl<'de> Deserialize<'de> for CharacterRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::lenient).unwrap_or_default())
    }
}

/// One member of the cast.
///
/// # Examples
///
/// ```
/// use gameforge_core::{CharacterRecord, CharacterRole};
///
/// let json = r#"{"name": "Kira", "role": "ANTAGONIST"}"#;
/// let character: CharacterRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(character.role, CharacterRole::Antagonist);
/// assert!(character.abilities.is_empty());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct CharacterRecord {
    /// Character name
    #[serde(default)]
    pub name: String,
    /// Narrative role
    #[serde(default)]
    pub role: CharacterRole,
    /// Class or profession, e.g. "Guerrier"
    #[serde(default)]
    pub character_class: String,
    /// Backstory
    #[serde(default)]
    pub background: String,
    /// Skills and powers
    #[serde(default)]
    pub abilities: String,
    /// What drives the character
    #[serde(default)]
    pub motivations: String,
    /// Looks
    #[serde(default)]
    pub appearance: String,
}
