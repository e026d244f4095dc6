//! Candidate records and winner computation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A candidate on an election ballot, projected from contract state.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct Candidate {
    /// Candidate name
    name: String,
    /// Party affiliation
    party: String,
    /// Current tally reported by the contract
    votes: u64,
    /// Position of the candidate on the ballot, used when casting a vote
    index: u32,
}

/// Pick the winner of a completed election by plurality.
///
/// Ties are broken by the lowest ballot position, matching the contract's
/// reporting order. Returns `None` for an empty ballot.
///
/// # Examples
///
/// ```
/// use psephos_core::{Candidate, winner};
///
/// let ballot = vec![
///     Candidate::new("Ada".into(), "Unity".into(), 40, 0),
///     Candidate::new("Grace".into(), "Progress".into(), 55, 1),
/// ];
/// assert_eq!(winner(&ballot).unwrap().name(), "Grace");
/// ```
pub fn winner(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best = candidates.first()?;
    for candidate in &candidates[1..] {
        if candidate.votes > best.votes {
            best = candidate;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, votes: u64, index: u32) -> Candidate {
        Candidate::new(name.to_string(), "Party".to_string(), votes, index)
    }

    #[test]
    fn winner_is_plurality() {
        let ballot = vec![candidate("a", 10, 0), candidate("b", 30, 1), candidate("c", 20, 2)];
        assert_eq!(winner(&ballot).unwrap().name(), "b");
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        let ballot = vec![candidate("a", 30, 0), candidate("b", 30, 1)];
        assert_eq!(winner(&ballot).unwrap().name(), "a");
    }

    #[test]
    fn empty_ballot_has_no_winner() {
        assert!(winner(&[]).is_none());
    }
}
