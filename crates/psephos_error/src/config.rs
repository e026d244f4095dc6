//! Configuration error types.

/// Configuration error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A required setting is absent
    #[display("Missing configuration value: {}", _0)]
    Missing(String),
    /// A setting is present but unusable
    #[display("Invalid configuration value for {}: {}", key, message)]
    Invalid {
        /// Configuration key
        key: String,
        /// What was wrong with it
        message: String,
    },
    /// The configuration source could not be read
    #[display("Configuration source error: {}", _0)]
    Source(String),
}

/// Configuration error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
