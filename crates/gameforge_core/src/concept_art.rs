//! Concept art slots and images.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One of the two fixed concept art slots.
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
    derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtSlot {
    /// Character portrait
    #[display("CHARACTER")]
    Character,
    /// Environment landscape
    #[display("ENVIRONMENT")]
    Environment,
}

impl ArtSlot {
    /// Fixed file name of the slot's image.
    pub fn filename(self) -> &'static str {
        match self {
            ArtSlot::Character => "character.png",
            ArtSlot::Environment => "environment.png",
        }
    }

    /// Upload directory of the slot, relative to a game's root.
    pub fn directory(self) -> &'static str {
        match self {
            ArtSlot::Character => "concept_art/characters",
            ArtSlot::Environment => "concept_art/environments",
        }
    }

    /// Match the `type` tag used in service output, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "CHARACTER" => Some(ArtSlot::Character),
            "ENVIRONMENT" => Some(ArtSlot::Environment),
            _ => None,
        }
    }
}

/// The character and environment prompts sent to the image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtPrompts {
    /// Prompt for the character portrait
    pub character: String,
    /// Prompt for the environment landscape
    pub environment: String,
}

impl ArtPrompts {
    /// Prompt for the given slot.
    pub fn for_slot(&self, slot: ArtSlot) -> &str {
        match slot {
            ArtSlot::Character => &self.character,
            ArtSlot::Environment => &self.environment,
        }
    }
}

/// Image bytes kept for one slot.
///
/// # Examples
///
/// ```
/// use gameforge_core::{ArtSlot, StoredImage};
///
/// let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0];
/// let image = StoredImage::new(ArtSlot::Environment, png);
/// assert_eq!(image.mime_type(), "image/png");
/// assert_eq!(image.filename(), "environment.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoredImage {
    slot: ArtSlot,
    #[getter(skip)]
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl StoredImage {
    /// Wrap image bytes for a slot, sniffing the MIME type from magic bytes.
    pub fn new(slot: ArtSlot, bytes: Vec<u8>) -> Self {
        Self {
            slot,
            mime_type: sniff_mime(&bytes),
            bytes,
        }
    }

    /// MIME type sniffed from the payload.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Fixed file name of the slot.
    pub fn filename(&self) -> &'static str {
        self.slot.filename()
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Images produced for a game. Each slot is present or absent on its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConceptArtResult {
    /// Character portrait, if generation succeeded
    pub character_image: Option<StoredImage>,
    /// Environment landscape, if generation succeeded
    pub environment_image: Option<StoredImage>,
}

impl ConceptArtResult {
    /// Image stored in the given slot.
    pub fn get(&self, slot: ArtSlot) -> Option<&StoredImage> {
        match slot {
            ArtSlot::Character => self.character_image.as_ref(),
            ArtSlot::Environment => self.environment_image.as_ref(),
        }
    }

    /// Place an image in its slot, replacing any previous one.
    pub fn insert(&mut self, image: StoredImage) {
        match image.slot {
            ArtSlot::Character => self.character_image = Some(image),
            ArtSlot::Environment => self.environment_image = Some(image),
        }
    }

    /// Present images, character first.
    pub fn images(&self) -> impl Iterator<Item = &StoredImage> {
        self.character_image
            .iter()
            .chain(self.environment_image.iter())
    }
}
