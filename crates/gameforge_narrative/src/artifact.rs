//! Per-artifact generation strategies.
//!
//! Each artifact kind pairs an AI strategy (prompt, variables, parser) with
//! a template strategy. The orchestrator drives every kind through the same
//! tiered runner.

use crate::{MAX_LIST_ITEMS, PromptSet, SectionSchema, TemplateSynthesizer, extract_records};
use gameforge_core::{
    ArtPrompts, ArtSlot, ArtifactKind, CharacterRecord, GenerationRequest, LocationRecord,
    NarrativeRecord,
};
use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use gameforge_interface::PromptVariables;
use rand::rngs::StdRng;
use serde::Deserialize;

/// What an artifact strategy needs to know about the run.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactContext<'a> {
    /// Parameters of the run
    pub request: &'a GenerationRequest,
    /// Title produced by the narrative step, empty before it
    pub title: &'a str,
}

impl<'a> ArtifactContext<'a> {
    /// Context for a run with a known title.
    pub fn new(request: &'a GenerationRequest, title: &'a str) -> Self {
        Self { request, title }
    }

    fn base_variables(&self) -> PromptVariables {
        let mut vars = PromptVariables::new();
        vars.insert("genre".into(), self.request.genre().label().into());
        vars.insert("ambiance".into(), self.request.ambiance().label().into());
        vars.insert("title".into(), self.title.into());
        vars.insert("count".into(), MAX_LIST_ITEMS.to_string());
        vars
    }
}

/// AI strategy plus template strategy for one artifact kind.
pub trait Artifact: Send + Sync {
    /// Value produced by either tier.
    type Output: Send;

    /// Which artifact this is.
    fn kind(&self) -> ArtifactKind;

    /// Prompt template used by the AI tier.
    fn prompt_template<'p>(&self, prompts: &'p PromptSet) -> &'p str;

    /// Variables substituted into the prompt template.
    fn variables(&self, ctx: &ArtifactContext<'_>) -> PromptVariables;

    /// Validate a non-empty service response.
    fn parse(&self, ctx: &ArtifactContext<'_>, response: &str) -> GameforgeResult<Self::Output>;

    /// Template tier. Never fails.
    fn synthesize(
        &self,
        ctx: &ArtifactContext<'_>,
        synthesizer: &TemplateSynthesizer,
        rng: &mut StdRng,
    ) -> Self::Output;
}

/// Title and narrative texts, parsed from labeled sections.
#[derive(Debug, Clone)]
pub struct NarrativeArtifact {
    schema: SectionSchema,
}

impl Default for NarrativeArtifact {
    fn default() -> Self {
        Self {
            schema: SectionSchema::narrative(),
        }
    }
}

impl Artifact for NarrativeArtifact {
    type Output = NarrativeRecord;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Narrative
    }

    fn prompt_template<'p>(&self, prompts: &'p PromptSet) -> &'p str {
        prompts.narrative()
    }

    fn variables(&self, ctx: &ArtifactContext<'_>) -> PromptVariables {
        let mut vars = ctx.base_variables();
        let tokens = ctx.request.keyword_tokens();
        vars.insert("keywords".into(), tokens.join(", "));
        let references = ctx.request.cultural_references_text();
        vars.insert(
            "cultural_ref".into(),
            if references.trim().is_empty() {
                String::new()
            } else {
                format!("Références culturelles: {}", references.trim())
            },
        );
        vars
    }

    fn parse(&self, ctx: &ArtifactContext<'_>, response: &str) -> GameforgeResult<NarrativeRecord> {
        let sections = self.schema.extract(response);
        if sections.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MalformedSection(format!(
                "no labeled section in response (length: {})",
                response.len()
            )))
            .into());
        }

        let title = match sections.get("title") {
            "" => format!("Jeu {}", ctx.request.genre().code()),
            title => title.to_string(),
        };

        Ok(NarrativeRecord {
            title,
            description: sections.get("description").to_string(),
            universe_description: sections.get("universe_description").to_string(),
            main_story: sections.get("main_story").to_string(),
            gameplay_mechanics: sections.get("gameplay_mechanics").to_string(),
        })
    }

    fn synthesize(
        &self,
        ctx: &ArtifactContext<'_>,
        synthesizer: &TemplateSynthesizer,
        rng: &mut StdRng,
    ) -> NarrativeRecord {
        synthesizer.narrative(ctx.request, rng)
    }
}

/// Cast of characters, parsed from a bounded list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterArtifact;

impl Artifact for CharacterArtifact {
    type Output = Vec<CharacterRecord>;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Characters
    }

    fn prompt_template<'p>(&self, prompts: &'p PromptSet) -> &'p str {
        prompts.characters()
    }

    fn variables(&self, ctx: &ArtifactContext<'_>) -> PromptVariables {
        ctx.base_variables()
    }

    fn parse(
        &self,
        _ctx: &ArtifactContext<'_>,
        response: &str,
    ) -> GameforgeResult<Vec<CharacterRecord>> {
        non_empty(extract_records(response, MAX_LIST_ITEMS)?, "characters")
    }

    fn synthesize(
        &self,
        ctx: &ArtifactContext<'_>,
        synthesizer: &TemplateSynthesizer,
        rng: &mut StdRng,
    ) -> Vec<CharacterRecord> {
        synthesizer.characters(ctx.request, ctx.title, rng)
    }
}

/// Locations, parsed from a bounded list.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationArtifact;

impl Artifact for LocationArtifact {
    type Output = Vec<LocationRecord>;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Locations
    }

    fn prompt_template<'p>(&self, prompts: &'p PromptSet) -> &'p str {
        prompts.locations()
    }

    fn variables(&self, ctx: &ArtifactContext<'_>) -> PromptVariables {
        ctx.base_variables()
    }

    fn parse(
        &self,
        _ctx: &ArtifactContext<'_>,
        response: &str,
    ) -> GameforgeResult<Vec<LocationRecord>> {
        non_empty(extract_records(response, MAX_LIST_ITEMS)?, "locations")
    }

    fn synthesize(
        &self,
        ctx: &ArtifactContext<'_>,
        synthesizer: &TemplateSynthesizer,
        rng: &mut StdRng,
    ) -> Vec<LocationRecord> {
        synthesizer.locations(ctx.request, ctx.title, rng)
    }
}

/// Service output item for concept art prompts.
#[derive(Debug, Deserialize)]
struct PromptItem {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    prompt: String,
}

/// Character and environment prompts. Both must come from the same tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtPromptArtifact;

impl Artifact for ArtPromptArtifact {
    type Output = ArtPrompts;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ArtPrompts
    }

    fn prompt_template<'p>(&self, prompts: &'p PromptSet) -> &'p str {
        prompts.art_prompts()
    }

    fn variables(&self, ctx: &ArtifactContext<'_>) -> PromptVariables {
        ctx.base_variables()
    }

    fn parse(&self, _ctx: &ArtifactContext<'_>, response: &str) -> GameforgeResult<ArtPrompts> {
        let items: Vec<PromptItem> = extract_records(response, MAX_LIST_ITEMS)?;
        let find = |slot: ArtSlot| -> GameforgeResult<String> {
            items
                .iter()
                .find(|item| ArtSlot::from_tag(&item.kind) == Some(slot))
                .map(|item| item.prompt.trim())
                .filter(|prompt| !prompt.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    GenerationError::new(GenerationErrorKind::MissingPrompt(slot.to_string()))
                        .into()
                })
        };

        Ok(ArtPrompts {
            character: find(ArtSlot::Character)?,
            environment: find(ArtSlot::Environment)?,
        })
    }

    fn synthesize(
        &self,
        ctx: &ArtifactContext<'_>,
        synthesizer: &TemplateSynthesizer,
        _rng: &mut StdRng,
    ) -> ArtPrompts {
        synthesizer.art_prompts(ctx.request)
    }
}

fn non_empty<T>(records: Vec<T>, what: &str) -> GameforgeResult<Vec<T>> {
    if records.is_empty() {
        Err(GenerationError::new(GenerationErrorKind::MalformedList(format!(
            "response listed no {}",
            what
        )))
        .into())
    } else {
        Ok(records)
    }
}
