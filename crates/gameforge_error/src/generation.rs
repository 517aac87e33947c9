//! Errors raised by a single generation tier.
//!
//! None of these escape the orchestrator: each one is answered by falling
//! back to template synthesis, or by leaving an image slot empty.

/// Why an AI generation attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The external service could not be reached or returned an error
    #[display("Generation service unavailable: {}", _0)]
    ServiceUnavailable(String),
    /// The service answered with nothing but whitespace
    #[display("Generation service returned an empty response")]
    EmptyResponse,
    /// No parsable list of mappings could be located in the response
    #[display("Malformed list in response: {}", _0)]
    MalformedList(String),
    /// No labeled section could be recognised in the response
    #[display("Malformed sections in response: {}", _0)]
    MalformedSection(String),
    /// A required image prompt was absent from the response
    #[display("Missing {} prompt in response", _0)]
    MissingPrompt(String),
    /// A prompt template could not be rendered
    #[display("Prompt template error: {}", _0)]
    PromptTemplate(String),
}

/// Generation tier failure with location tracking.
///
/// # Examples
///
/// ```
/// use gameforge_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MalformedList("no '[' found".into()));
/// assert!(err.to_string().contains("Malformed list"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of failure
    pub kind: GenerationErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Borrow the failure kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}
