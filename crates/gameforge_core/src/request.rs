//! Generation parameters supplied by the caller.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Game genre.
///
/// Parses from and displays as its SCREAMING_SNAKE_CASE code.
///
/// # Examples
///
/// ```
/// use gameforge_core::Genre;
///
/// let genre: Genre = "visual_novel".parse().unwrap();
/// assert_eq!(genre, Genre::VisualNovel);
/// assert_eq!(genre.to_string(), "VISUAL_NOVEL");
/// assert_eq!(genre.label(), "Visual Novel");
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
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Genre {
    /// Role-playing game
    Rpg,
    /// First-person shooter
    Fps,
    /// Metroidvania
    Metroidvania,
    /// Visual novel
    VisualNovel,
    /// Platformer
    Platformer,
    /// Strategy
    Strategy,
    /// Puzzle
    Puzzle,
    /// Adventure
    Adventure,
    /// Simulation
    Simulation,
    /// Racing
    Racing,
}

impl Genre {
    /// The SCREAMING_SNAKE_CASE code, e.g. `VISUAL_NOVEL`.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Rpg => "RPG",
            Genre::Fps => "FPS",
            Genre::Metroidvania => "Metroidvania",
            Genre::VisualNovel => "Visual Novel",
            Genre::Platformer => "Platformer",
            Genre::Strategy => "Stratégie",
            Genre::Puzzle => "Puzzle",
            Genre::Adventure => "Aventure",
            Genre::Simulation => "Simulation",
            Genre::Racing => "Course",
        }
    }
}

/// Mood or setting of the game.
///
/// # Examples
///
/// ```
/// use gameforge_core::Ambiance;
///
/// let ambiance: Ambiance = "SCI_FI".parse().unwrap();
/// assert_eq!(ambiance, Ambiance::SciFi);
/// assert_eq!(ambiance.label(), "Science-Fiction");
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
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Ambiance {
    /// Post-apocalyptic wasteland
    PostApocalyptic,
    /// Dreamlike, surreal
    Dreamlike,
    /// Cyberpunk
    Cyberpunk,
    /// Dark fantasy
    DarkFantasy,
    /// Medieval
    Medieval,
    /// Science fiction
    SciFi,
    /// Horror
    Horror,
    /// Steampunk
    Steampunk,
    /// Present day
    Modern,
    /// High fantasy
    Fantasy,
}

impl Ambiance {
    /// The SCREAMING_SNAKE_CASE code, e.g. `DARK_FANTASY`.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Ambiance::PostApocalyptic => "Post-apocalyptique",
            Ambiance::Dreamlike => "Onirique",
            Ambiance::Cyberpunk => "Cyberpunk",
            Ambiance::DarkFantasy => "Dark Fantasy",
            Ambiance::Medieval => "Médiéval",
            Ambiance::SciFi => "Science-Fiction",
            Ambiance::Horror => "Horreur",
            Ambiance::Steampunk => "Steampunk",
            Ambiance::Modern => "Moderne",
            Ambiance::Fantasy => "Fantasy",
        }
    }
}

/// Immutable input to one generation run.
///
/// # Examples
///
/// ```
/// use gameforge_core::{Ambiance, GenerationRequest, Genre};
///
/// let request = GenerationRequest::new(Genre::Rpg, Ambiance::Fantasy, "dragons, , prophecy ");
/// assert_eq!(request.keyword_tokens(), vec!["dragons", "prophecy"]);
/// assert!(request.cultural_references().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerationRequest {
    genre: Genre,
    ambiance: Ambiance,
    keywords: String,
    #[serde(default)]
    cultural_references: Option<String>,
}

impl GenerationRequest {
    /// Create a request without cultural references.
    pub fn new(genre: Genre, ambiance: Ambiance, keywords: impl Into<String>) -> Self {
        Self {
            genre,
            ambiance,
            keywords: keywords.into(),
            cultural_references: None,
        }
    }

    /// Attach free-text cultural references. Blank text is treated as absent.
    pub fn with_cultural_references(mut self, references: impl Into<String>) -> Self {
        let references = references.into();
        self.cultural_references = if references.trim().is_empty() {
            None
        } else {
            Some(references)
        };
        self
    }

    /// Keywords split on commas and trimmed, empty tokens discarded, order kept.
    pub fn keyword_tokens(&self) -> Vec<&str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Cultural references, or an empty string when absent.
    pub fn cultural_references_text(&self) -> &str {
        self.cultural_references.as_deref().unwrap_or("")
    }
}
