//! Tiered generation of a complete game concept.

use crate::{
    ArtPromptArtifact, Artifact, ArtifactContext, CharacterArtifact, ConceptArtPipeline,
    LocationArtifact, NarrativeArtifact, PromptSet, TemplateSynthesizer, TemplateTables,
};
use gameforge_core::{
    ArtPrompts, CharacterRecord, ConceptArtResult, GameConcept, Generated, GenerationRequest,
    GenerationTier, LocationRecord, NarrativeRecord, Provenance,
};
use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use gameforge_interface::{ImageGenerationService, TextGenerationService};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Produces game concepts, preferring the text service and falling back to
/// template synthesis per artifact.
///
/// Generation never fails: every artifact has a template tier, and concept
/// art slots are simply left empty when rendering fails.
///
/// # Examples
///
/// ```
/// use gameforge_core::{Ambiance, GenerationRequest, GenerationTier, Genre};
/// use gameforge_narrative::GenerationOrchestrator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let orchestrator = GenerationOrchestrator::builder().seed(7).build()?;
/// let request = GenerationRequest::new(Genre::Rpg, Ambiance::Fantasy, "dragons");
///
/// let concept = orchestrator.generate_concept(&request).await;
/// assert!(concept.provenance.all_template());
/// assert_eq!(concept.characters.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct GenerationOrchestrator {
    text_service: Option<Arc<dyn TextGenerationService>>,
    synthesizer: TemplateSynthesizer,
    art: ConceptArtPipeline,
    prompts: PromptSet,
    narrative: NarrativeArtifact,
    ai_timeout: Option<Duration>,
    seed: u64,
    draws: AtomicU64,
}

impl std::fmt::Debug for GenerationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("text_service", &self.text_service.is_some())
            .field("art", &self.art)
            .field("ai_timeout", &self.ai_timeout)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl GenerationOrchestrator {
    /// Start building an orchestrator.
    pub fn builder() -> GenerationOrchestratorBuilder {
        GenerationOrchestratorBuilder::default()
    }

    /// Template synthesizer used by the fallback tier.
    pub fn synthesizer(&self) -> &TemplateSynthesizer {
        &self.synthesizer
    }

    /// Prompt templates used by the AI tier.
    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    /// Fresh random source. Runs started from the same seed draw the same
    /// sequence of sources.
    fn rng(&self) -> StdRng {
        let draw = self.draws.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.seed ^ draw.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Generate every artifact and the concept art for a request.
    #[instrument(
        skip(self, request),
        fields(genre = %request.genre(), ambiance = %request.ambiance())
    )]
    pub async fn generate_concept(&self, request: &GenerationRequest) -> GameConcept {
        let narrative = self.generate_narrative(request).await;
        let title = narrative.value.title.clone();

        // Kinds run in order so template draws follow a fixed sequence.
        let characters = self.generate_characters(request, &title).await;
        let locations = self.generate_locations(request, &title).await;
        let art_prompts = self.generate_art_prompts(request, &title).await;

        let concept_art = self.render_concept_art(&art_prompts.value).await;

        let provenance = Provenance {
            narrative: narrative.tier,
            characters: characters.tier,
            locations: locations.tier,
            art_prompts: art_prompts.tier,
        };
        info!(
            title = %title,
            characters = characters.value.len(),
            locations = locations.value.len(),
            images = concept_art.images().count(),
            all_template = provenance.all_template(),
            "Game concept generated"
        );

        GameConcept {
            request: request.clone(),
            narrative: narrative.value,
            characters: characters.value,
            locations: locations.value,
            art_prompts: art_prompts.value,
            concept_art,
            provenance,
        }
    }

    /// Title and narrative texts.
    pub async fn generate_narrative(
        &self,
        request: &GenerationRequest,
    ) -> Generated<NarrativeRecord> {
        self.run(&self.narrative, &ArtifactContext::new(request, ""))
            .await
    }

    /// Up to three characters for a titled game.
    pub async fn generate_characters(
        &self,
        request: &GenerationRequest,
        title: &str,
    ) -> Generated<Vec<CharacterRecord>> {
        self.run(&CharacterArtifact, &ArtifactContext::new(request, title))
            .await
    }

    /// Up to three locations for a titled game.
    pub async fn generate_locations(
        &self,
        request: &GenerationRequest,
        title: &str,
    ) -> Generated<Vec<LocationRecord>> {
        self.run(&LocationArtifact, &ArtifactContext::new(request, title))
            .await
    }

    /// Character and environment prompts for a titled game.
    pub async fn generate_art_prompts(
        &self,
        request: &GenerationRequest,
        title: &str,
    ) -> Generated<ArtPrompts> {
        self.run(&ArtPromptArtifact, &ArtifactContext::new(request, title))
            .await
    }

    /// Render concept art for a pair of prompts.
    pub async fn render_concept_art(&self, prompts: &ArtPrompts) -> ConceptArtResult {
        self.art.render(prompts).await
    }

    /// A request with random genre, ambiance and keywords.
    pub fn random_request(&self) -> GenerationRequest {
        let mut rng = self.rng();
        self.synthesizer.random_request(&mut rng)
    }

    async fn run<A: Artifact>(
        &self,
        artifact: &A,
        ctx: &ArtifactContext<'_>,
    ) -> Generated<A::Output> {
        let kind = artifact.kind();
        match self.attempt_ai(artifact, ctx).await {
            Ok(Some(value)) => {
                info!(artifact = %kind, tier = %GenerationTier::Ai, "Artifact generated");
                return Generated::ai(value);
            }
            Ok(None) => debug!(artifact = %kind, "No text service configured"),
            Err(e) => warn!(artifact = %kind, error = %e, "AI tier failed; using templates"),
        }

        let mut rng = self.rng();
        let value = artifact.synthesize(ctx, &self.synthesizer, &mut rng);
        info!(artifact = %kind, tier = %GenerationTier::Template, "Artifact generated");
        Generated::template(value)
    }

    async fn attempt_ai<A: Artifact>(
        &self,
        artifact: &A,
        ctx: &ArtifactContext<'_>,
    ) -> GameforgeResult<Option<A::Output>> {
        let Some(service) = self.text_service.as_deref() else {
            return Ok(None);
        };

        let template = artifact.prompt_template(&self.prompts);
        let variables = artifact.variables(ctx);

        let outcome = match self.ai_timeout {
            Some(limit) => tokio::time::timeout(limit, service.complete(template, &variables))
                .await
                .map_err(|_| {
                    GenerationError::new(GenerationErrorKind::ServiceUnavailable(format!(
                        "text request timed out after {:?}",
                        limit
                    )))
                })?,
            None => service.complete(template, &variables).await,
        };

        let response = outcome.map_err(|e| {
            GenerationError::new(GenerationErrorKind::ServiceUnavailable(e.to_string()))
        })?;
        if response.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }

        artifact.parse(ctx, &response).map(Some)
    }
}

/// Builder for [`GenerationOrchestrator`].
#[derive(Default)]
pub struct GenerationOrchestratorBuilder {
    text_service: Option<Arc<dyn TextGenerationService>>,
    image_service: Option<Arc<dyn ImageGenerationService>>,
    tables: Option<Arc<TemplateTables>>,
    prompts: Option<PromptSet>,
    seed: Option<u64>,
    ai_timeout: Option<Duration>,
    image_timeout: Option<Duration>,
}

impl GenerationOrchestratorBuilder {
    /// Text service used by the AI tier. Without one, every artifact comes
    /// from templates.
    pub fn text_service(mut self, service: Arc<dyn TextGenerationService>) -> Self {
        self.text_service = Some(service);
        self
    }

    /// Image service used for concept art.
    pub fn image_service(mut self, service: Arc<dyn ImageGenerationService>) -> Self {
        self.image_service = Some(service);
        self
    }

    /// Template tables. Defaults to [`TemplateTables::load`], which layers
    /// user overrides on the bundled tables.
    pub fn tables(mut self, tables: TemplateTables) -> Self {
        self.tables = Some(Arc::new(tables));
        self
    }

    /// Prompt templates. Defaults to [`PromptSet::default`].
    pub fn prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Seed for template synthesis. Defaults to a random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Bound each text service call.
    pub fn ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = Some(timeout);
        self
    }

    /// Bound each image service call.
    pub fn image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = Some(timeout);
        self
    }

    /// Build the orchestrator. Fails only when the template tables cannot be
    /// loaded or are invalid.
    pub fn build(self) -> GameforgeResult<GenerationOrchestrator> {
        let tables = match self.tables {
            Some(tables) => tables,
            None => Arc::new(TemplateTables::load()?),
        };

        let mut art = ConceptArtPipeline::new(self.image_service);
        if let Some(timeout) = self.image_timeout {
            art = art.with_timeout(timeout);
        }

        Ok(GenerationOrchestrator {
            text_service: self.text_service,
            synthesizer: TemplateSynthesizer::from_shared(tables),
            art,
            prompts: self.prompts.unwrap_or_default(),
            narrative: NarrativeArtifact::default(),
            ai_timeout: self.ai_timeout,
            seed: self.seed.unwrap_or_else(rand::random),
            draws: AtomicU64::new(0),
        })
    }
}
