//! Vote and registration flow error types.

use crate::{ChainError, RegistryError};

/// Vote flow error conditions.
///
/// The taxonomy separates validation failures (caught before any external
/// call), duplicate-action failures (detected by re-querying external state),
/// and wrapped external-call failures.
#[derive(Debug, Clone, derive_more::Display)]
pub enum VoteErrorKind {
    /// NIN is not exactly eleven ASCII digits
    #[display("Invalid NIN: must be exactly 11 digits")]
    InvalidNin,
    /// Wallet address is empty or malformed
    #[display("Invalid wallet address: {}", _0)]
    InvalidWallet(String),
    /// Candidate index out of range for the ballot
    #[display("Unknown candidate index {} (ballot has {} candidates)", index, count)]
    UnknownCandidate {
        /// The requested index
        index: u32,
        /// Number of candidates on the ballot
        count: u32,
    },
    /// Operation attempted out of step order
    #[display("Operation not valid in step {}", _0)]
    WrongStep(String),
    /// Wallet has no registration record
    #[display("No registration found for this wallet")]
    NotRegistered,
    /// Supplied NIN does not match the registered one
    #[display("NIN does not match the registration for this wallet")]
    IdentityMismatch,
    /// The voter has already cast a vote in this election
    #[display("This voter has already voted in this election")]
    AlreadyVoted,
    /// The wallet already has a registered NIN
    #[display("This wallet address already has a registered NIN")]
    AlreadyRegistered,
    /// The NIN is registered to a different wallet
    #[display("This NIN is already registered with another wallet address")]
    NinClaimed,
    /// Registrations are locked by the administrator
    #[display("NIN registration is currently locked")]
    RegistrationLocked,
    /// No election is currently accepting votes
    #[display("No active election")]
    NoActiveElection,
    /// Contract call failed
    #[display("{}", _0)]
    Chain(ChainError),
    /// Registry call failed
    #[display("{}", _0)]
    Registry(RegistryError),
}

/// Vote flow error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Vote Error: {} at line {} in {}", kind, line, file)]
pub struct VoteError {
    /// The kind of error that occurred
    pub kind: VoteErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VoteError {
    /// Create a new VoteError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VoteErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<ChainError> for VoteError {
    #[track_caller]
    fn from(err: ChainError) -> Self {
        VoteError::new(VoteErrorKind::Chain(err))
    }
}

impl From<RegistryError> for VoteError {
    #[track_caller]
    fn from(err: RegistryError) -> Self {
        VoteError::new(VoteErrorKind::Registry(err))
    }
}
