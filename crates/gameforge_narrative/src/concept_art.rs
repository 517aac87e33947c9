//! Concept art rendering.

use gameforge_core::{ArtPrompts, ArtSlot, ConceptArtResult, StoredImage};
use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use gameforge_interface::ImageGenerationService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Renders one image per art slot.
///
/// Slots are requested concurrently and fail independently: a failed,
/// empty or timed-out request leaves only its own slot absent. Rendering
/// never fails as a whole.
#[derive(Clone, Default)]
pub struct ConceptArtPipeline {
    image_service: Option<Arc<dyn ImageGenerationService>>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ConceptArtPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptArtPipeline")
            .field("image_service", &self.image_service.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ConceptArtPipeline {
    /// Pipeline over an optional image service. Without one, every slot
    /// stays absent.
    pub fn new(image_service: Option<Arc<dyn ImageGenerationService>>) -> Self {
        Self {
            image_service,
            timeout: None,
        }
    }

    /// Bound each image request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Render both slots.
    #[instrument(skip(self, prompts))]
    pub async fn render(&self, prompts: &ArtPrompts) -> ConceptArtResult {
        let Some(service) = self.image_service.as_deref() else {
            debug!("No image service configured; concept art skipped");
            return ConceptArtResult::default();
        };

        let (character_image, environment_image) = tokio::join!(
            self.render_slot(service, ArtSlot::Character, prompts.for_slot(ArtSlot::Character)),
            self.render_slot(
                service,
                ArtSlot::Environment,
                prompts.for_slot(ArtSlot::Environment)
            ),
        );

        ConceptArtResult {
            character_image,
            environment_image,
        }
    }

    async fn render_slot(
        &self,
        service: &dyn ImageGenerationService,
        slot: ArtSlot,
        prompt: &str,
    ) -> Option<StoredImage> {
        match self.request(service, slot, prompt).await {
            Ok(image) => {
                info!(
                    slot = %slot,
                    bytes = image.len(),
                    mime_type = image.mime_type(),
                    "Concept art generated"
                );
                Some(image)
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "Concept art generation failed; slot left empty");
                None
            }
        }
    }

    async fn request(
        &self,
        service: &dyn ImageGenerationService,
        slot: ArtSlot,
        prompt: &str,
    ) -> GameforgeResult<StoredImage> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(
                GenerationError::new(GenerationErrorKind::MissingPrompt(slot.to_string())).into(),
            );
        }

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, service.generate(prompt))
                .await
                .map_err(|_| {
                    GenerationError::new(GenerationErrorKind::ServiceUnavailable(format!(
                        "image request timed out after {:?}",
                        limit
                    )))
                })?,
            None => service.generate(prompt).await,
        };

        let bytes = outcome.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ServiceUnavailable(e.to_string()))
        })?;
        if bytes.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        Ok(StoredImage::new(slot, bytes))
    }
}
