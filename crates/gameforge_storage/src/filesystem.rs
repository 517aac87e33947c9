//! Filesystem game repository.

use crate::{GameRecord, ImageEntry};
use async_trait::async_trait;
use gameforge_core::{GameConcept, GameId, Principal};
use gameforge_error::{GameforgeResult, StorageError, StorageErrorKind};
use gameforge_interface::GameRepository;
use std::path::{Path, PathBuf};

/// Name of the record file inside each game directory.
pub const RECORD_FILE: &str = "game.json";

/// Game repository storing one directory per game.
///
/// # Layout
///
/// ```text
/// {base_path}/
/// └── {game_id}/
///     ├── game.json
///     └── concept_art/
///         ├── characters/character.png
///         └── environments/environment.png
/// ```
///
/// `game.json` is written after the images, so a directory without it is an
/// incomplete save.
#[derive(Debug, Clone)]
pub struct FileSystemGameRepository {
    base_path: PathBuf,
}

impl FileSystemGameRepository {
    /// Create a repository rooted at `base_path`, creating the directory if
    /// needed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> GameforgeResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created game repository");
        Ok(Self { base_path })
    }

    /// Directory holding one game.
    pub fn game_dir(&self, id: &GameId) -> PathBuf {
        self.base_path.join(id.to_string())
    }
}

#[async_trait]
impl GameRepository for FileSystemGameRepository {
    #[tracing::instrument(skip(self, concept), fields(owner = %owner, title = %concept.narrative.title))]
    async fn save_game(&self, owner: &Principal, concept: &GameConcept) -> GameforgeResult<GameId> {
        let id = GameId::new();
        let dir = self.game_dir(&id);
        let record = GameRecord::new(id, owner, concept);

        for image in concept.concept_art.images() {
            let entry = ImageEntry::describe(image);
            write(&dir.join(entry.path()), image.bytes()).await?;
        }

        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        write(&dir.join(RECORD_FILE), &json).await?;

        tracing::info!(
            game_id = %id,
            path = %dir.display(),
            images = record.images().len(),
            "Stored game"
        );
        Ok(id)
    }
}

async fn write(path: &Path, data: &[u8]) -> GameforgeResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    tokio::fs::write(path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;

    tracing::debug!(path = %path.display(), size = data.len(), "Wrote file");
    Ok(())
}
