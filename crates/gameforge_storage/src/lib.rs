//! Game repositories for GameForge.
//!
//! Two implementations of [`GameRepository`](gameforge_interface::GameRepository):
//!
//! - [`InMemoryGameRepository`]: a map, for tests and embedding
//! - [`FileSystemGameRepository`]: one directory per game with a JSON record
//!   and the concept art images
//!
//! # Example
//!
//! ```rust,no_run
//! use gameforge_core::Principal;
//! use gameforge_interface::GameRepository;
//! use gameforge_storage::FileSystemGameRepository;
//!
//! # async fn example(concept: gameforge_core::GameConcept) -> Result<(), Box<dyn std::error::Error>> {
//! let repository = FileSystemGameRepository::new("/tmp/gameforge/games")?;
//! let id = repository.save_game(&Principal::new("alice"), &concept).await?;
//! assert!(repository.game_dir(&id).join("game.json").is_file());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod memory;
mod record;

pub use filesystem::{FileSystemGameRepository, RECORD_FILE};
pub use memory::InMemoryGameRepository;
pub use record::{GameRecord, ImageEntry};
