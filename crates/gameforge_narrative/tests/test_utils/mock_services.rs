//! Mock text and image services.

use async_trait::async_trait;
use gameforge_core::ArtifactKind;
use gameforge_error::{GameforgeResult, GenerationError, GenerationErrorKind};
use gameforge_interface::{ImageGenerationService, PromptVariables, TextGenerationService};
use gameforge_narrative::PromptSet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(String),
}

/// Mock text service answering per artifact kind.
///
/// The artifact kind is recognised from the prompt template, so responses
/// stay correct when artifacts are requested concurrently.
pub struct MockTextService {
    prompts: PromptSet,
    responses: HashMap<ArtifactKind, MockResponse>,
    delays: HashMap<ArtifactKind, Duration>,
    calls: Arc<Mutex<Vec<(ArtifactKind, PromptVariables)>>>,
}

impl MockTextService {
    /// Mock that fails every request.
    pub fn unreachable() -> Self {
        Self {
            prompts: PromptSet::default(),
            responses: HashMap::new(),
            delays: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer one artifact kind with the given text.
    pub fn respond(mut self, kind: ArtifactKind, text: impl Into<String>) -> Self {
        self.responses.insert(kind, MockResponse::Success(text.into()));
        self
    }

    /// Fail one artifact kind.
    #[allow(dead_code)]
    pub fn fail(mut self, kind: ArtifactKind, message: impl Into<String>) -> Self {
        self.responses.insert(kind, MockResponse::Error(message.into()));
        self
    }

    /// Sleep before answering one artifact kind.
    #[allow(dead_code)]
    pub fn delay(mut self, kind: ArtifactKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    /// Same responses and delays with a fresh call log.
    #[allow(dead_code)]
    pub fn clone_config(&self) -> Self {
        Self {
            prompts: self.prompts.clone(),
            responses: self.responses.clone(),
            delays: self.delays.clone(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Variables received for an artifact kind, most recent call.
    #[allow(dead_code)]
    pub fn variables_for(&self, kind: ArtifactKind) -> Option<PromptVariables> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .map(|(_, vars)| vars.clone())
    }

    fn kind_of(&self, template: &str) -> ArtifactKind {
        if template == self.prompts.characters() {
            ArtifactKind::Characters
        } else if template == self.prompts.locations() {
            ArtifactKind::Locations
        } else if template == self.prompts.art_prompts() {
            ArtifactKind::ArtPrompts
        } else {
            ArtifactKind::Narrative
        }
    }
}

#[async_trait]
impl TextGenerationService for MockTextService {
    async fn complete(
        &self,
        prompt_template: &str,
        variables: &PromptVariables,
    ) -> GameforgeResult<String> {
        let kind = self.kind_of(prompt_template);
        self.calls.lock().unwrap().push((kind, variables.clone()));
        if let Some(delay) = self.delays.get(&kind) {
            tokio::time::sleep(*delay).await;
        }

        match self.responses.get(&kind) {
            Some(MockResponse::Success(text)) => Ok(text.clone()),
            Some(MockResponse::Error(message)) => Err(GenerationError::new(
                GenerationErrorKind::ServiceUnavailable(message.clone()),
            )
            .into()),
            None => Err(GenerationError::new(GenerationErrorKind::ServiceUnavailable(
                "connection refused".to_string(),
            ))
            .into()),
        }
    }
}

/// Minimal PNG signature followed by a marker byte.
pub fn png_bytes(marker: u8) -> Vec<u8> {
    vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, marker]
}

#[derive(Debug, Default)]
struct Flight {
    calls: usize,
    in_flight: usize,
    max_in_flight: usize,
}

/// Mock image service.
///
/// Prompts containing any configured failure marker fail; prompts containing
/// an empty marker yield no bytes; everything else yields a PNG.
pub struct MockImageService {
    fail_markers: Vec<String>,
    empty_markers: Vec<String>,
    delay: Option<Duration>,
    flight: Arc<Mutex<Flight>>,
}

impl MockImageService {
    /// Mock that renders every prompt.
    pub fn new() -> Self {
        Self {
            fail_markers: Vec::new(),
            empty_markers: Vec::new(),
            delay: None,
            flight: Arc::new(Mutex::new(Flight::default())),
        }
    }

    /// Fail prompts containing `marker`.
    #[allow(dead_code)]
    pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_markers.push(marker.into());
        self
    }

    /// Return no bytes for prompts containing `marker`.
    #[allow(dead_code)]
    pub fn empty_on(mut self, marker: impl Into<String>) -> Self {
        self.empty_markers.push(marker.into());
        self
    }

    /// Sleep before answering.
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of images requested so far.
    pub fn call_count(&self) -> usize {
        self.flight.lock().unwrap().calls
    }

    /// Highest number of requests observed in progress at once.
    #[allow(dead_code)]
    pub fn max_in_flight(&self) -> usize {
        self.flight.lock().unwrap().max_in_flight
    }
}

#[async_trait]
impl ImageGenerationService for MockImageService {
    async fn generate(&self, prompt: &str) -> GameforgeResult<Vec<u8>> {
        {
            let mut flight = self.flight.lock().unwrap();
            flight.calls += 1;
            flight.in_flight += 1;
            flight.max_in_flight = flight.max_in_flight.max(flight.in_flight);
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.flight.lock().unwrap().in_flight -= 1;

        if self.fail_markers.iter().any(|m| prompt.contains(m.as_str())) {
            return Err(GenerationError::new(GenerationErrorKind::ServiceUnavailable(
                "image backend rejected the prompt".to_string(),
            ))
            .into());
        }
        if self.empty_markers.iter().any(|m| prompt.contains(m.as_str())) {
            return Ok(Vec::new());
        }
        Ok(png_bytes(prompt.len() as u8))
    }
}
