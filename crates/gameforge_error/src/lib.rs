//! Error types for GameForge.
//!
//! This crate provides the error types shared by every GameForge crate.
//!
//! # Error Hierarchy
//!
//! Domain errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific failure
//! - `*Error` struct wraps the kind with the file and line that raised it
//! - Constructors use `#[track_caller]` so the location is captured automatically
//!
//! Every domain error converts into [`GameforgeError`] with `?`.
//!
//! # Examples
//!
//! ```
//! use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
//!
//! fn ask_model() -> GameforgeResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::EmptyResponse))?
//! }
//!
//! assert!(ask_model().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod quota;
mod storage;

pub use config::ConfigError;
pub use error::{GameforgeError, GameforgeErrorKind, GameforgeResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use quota::{QuotaError, QuotaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
