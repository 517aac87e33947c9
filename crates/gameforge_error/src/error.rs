//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, QuotaError, StorageError};

/// Every failure a GameForge operation can surface.
///
/// # Examples
///
/// ```
/// use gameforge_error::{ConfigError, GameforgeError};
///
/// let err: GameforgeError = ConfigError::new("bad limit").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum GameforgeErrorKind {
    /// A generation tier failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Quota exhausted or quota store failure
    #[from(QuotaError)]
    Quota(QuotaError),
    /// Configuration could not be loaded or validated
    #[from(ConfigError)]
    Config(ConfigError),
    /// Persistence failure
    #[from(StorageError)]
    Storage(StorageError),
}

/// GameForge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use gameforge_error::{GameforgeErrorKind, GameforgeResult, QuotaError, QuotaErrorKind};
///
/// fn generate() -> GameforgeResult<()> {
///     Err(QuotaError::new(QuotaErrorKind::Store("disk full".into())))?
/// }
///
/// let err = generate().unwrap_err();
/// assert!(matches!(err.kind(), GameforgeErrorKind::Quota(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("GameForge Error: {}", _0)]
pub struct GameforgeError(Box<GameforgeErrorKind>);

impl GameforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: GameforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GameforgeErrorKind {
        &self.0
    }

    /// True when the error reports an exhausted daily quota.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.kind(), GameforgeErrorKind::Quota(e) if e.is_exceeded())
    }
}

impl<T> From<T> for GameforgeError
where
    T: Into<GameforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for GameForge operations.
pub type GameforgeResult<T> = std::result::Result<T, GameforgeError>;
