//! Usage quota errors.

/// Kinds of quota failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum QuotaErrorKind {
    /// The principal has used up today's allowance
    #[display("Daily quota exceeded for {}: {} of {} generations used", principal, usage, limit)]
    Exceeded {
        /// Principal whose quota is exhausted
        principal: String,
        /// Generations recorded today
        usage: u32,
        /// Daily allowance
        limit: u32,
    },
    /// The quota store failed to load or save usage state
    #[display("Quota store failure: {}", _0)]
    Store(String),
}

/// Quota error with location tracking.
///
/// # Examples
///
/// ```
/// use gameforge_error::{QuotaError, QuotaErrorKind};
///
/// let err = QuotaError::new(QuotaErrorKind::Exceeded {
///     principal: "alice".to_string(),
///     usage: 10,
///     limit: 10,
/// });
/// assert!(err.is_exceeded());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Quota Error: {} at line {} in {}", kind, line, file)]
pub struct QuotaError {
    /// The kind of error that occurred
    pub kind: QuotaErrorKind,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl QuotaError {
    /// Create a new quota error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: QuotaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error reports an exhausted allowance.
    pub fn is_exceeded(&self) -> bool {
        matches!(self.kind, QuotaErrorKind::Exceeded { .. })
    }
}
