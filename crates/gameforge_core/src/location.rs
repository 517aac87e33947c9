//! Locations of a game world.

use serde::{Deserialize, Serialize};

/// One place in the game world.
///
/// Missing fields deserialize to empty strings so that loosely shaped
/// service output still converts.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct LocationRecord {
    /// Place name
    #[serde(default)]
    pub name: String,
    /// What the place looks like
    #[serde(default)]
    pub description: String,
    /// Mood of the place
    #[serde(default)]
    pub atmosphere: String,
    /// Why the place matters to play
    #[serde(default)]
    pub gameplay_significance: String,
}
