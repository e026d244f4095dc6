//! Smart contract gateway error types.

/// Contract read/write error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ChainErrorKind {
    /// RPC or network transport failure
    #[display("Chain RPC error: {}", _0)]
    Rpc(String),
    /// Gateway returned a non-success status
    #[display("Gateway returned status {}: {}", status, message)]
    Gateway {
        /// HTTP status code from the gateway
        status: u16,
        /// Response body or status text
        message: String,
    },
    /// Contract call reverted
    #[display("Contract reverted: {}", _0)]
    Revert(String),
    /// Response could not be decoded
    #[display("Malformed gateway response: {}", _0)]
    Decode(String),
    /// No election exists for the requested id
    #[display("Election {} does not exist", _0)]
    NoSuchElection(u64),
    /// The election id counter could not be read
    #[display("Election id counter unreadable: {}", _0)]
    CounterUnreadable(String),
}

/// Contract gateway error with source location tracking.
///
/// # Examples
///
/// ```
/// use psephos_error::{ChainError, ChainErrorKind};
///
/// let err = ChainError::new(ChainErrorKind::NoSuchElection(7));
/// assert!(format!("{}", err).contains("does not exist"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chain Error: {} at line {} in {}", kind, line, file)]
pub struct ChainError {
    /// The kind of error that occurred
    pub kind: ChainErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ChainError {
    /// Create a new ChainError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChainErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error means the election simply is not there.
    ///
    /// The resolver treats missing ids as skippable rather than fatal.
    pub fn is_missing_election(&self) -> bool {
        matches!(self.kind, ChainErrorKind::NoSuchElection(_))
    }
}
