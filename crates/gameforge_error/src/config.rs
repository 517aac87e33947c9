//! Configuration error types.

/// Raised when bundled or user configuration cannot be loaded or fails validation.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong, including the offending source where known
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// Create a configuration error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use gameforge_error::ConfigError;
    ///
    /// let err = ConfigError::new("title prefixes must not be empty");
    /// assert!(err.to_string().contains("title prefixes"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
