//! Trait definitions for GameForge collaborators.
//!
//! The generation pipeline talks to the outside world only through these
//! traits: a text generation service, an image generation service, a game
//! repository and a quota store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod prompt;
mod traits;

pub use prompt::{PromptVariables, render_prompt};
pub use traits::{GameRepository, ImageGenerationService, QuotaStore, TextGenerationService};
