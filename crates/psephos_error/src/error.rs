//! Top-level error wrapper types.

use crate::{ChainError, ConfigError, RegistryError, VoteError};

/// This is the foundation error enum. Each Psephos crate contributes a
/// variant for its own error type.
///
/// # Examples
///
/// ```
/// use psephos_error::{PsephosError, ChainError, ChainErrorKind};
///
/// let chain_err = ChainError::new(ChainErrorKind::Rpc("timeout".into()));
/// let err: PsephosError = chain_err.into();
/// assert!(format!("{}", err).contains("Chain Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PsephosErrorKind {
    /// Contract gateway error
    #[from(ChainError)]
    Chain(ChainError),
    /// Voter registry error
    #[from(RegistryError)]
    Registry(RegistryError),
    /// Vote or registration flow error
    #[from(VoteError)]
    Vote(VoteError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Psephos error with kind discrimination.
///
/// # Examples
///
/// ```
/// use psephos_error::{PsephosResult, ConfigError, ConfigErrorKind};
///
/// fn might_fail() -> PsephosResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Missing("gateway_url".into())))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Psephos Error: {}", _0)]
pub struct PsephosError(Box<PsephosErrorKind>);

impl PsephosError {
    /// Create a new error from a kind.
    pub fn new(kind: PsephosErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PsephosErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PsephosErrorKind
impl<T> From<T> for PsephosError
where
    T: Into<PsephosErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Psephos operations.
pub type PsephosResult<T> = std::result::Result<T, PsephosError>;
