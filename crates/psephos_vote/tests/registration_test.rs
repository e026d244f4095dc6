//! Tests for the NIN registration flow.

mod test_utils;

use psephos_core::VoterStatus;
use psephos_error::VoteErrorKind;
use psephos_vote::RegistrationFlow;
use test_utils::MockRegistry;

const WALLET: &str = "0xAbCdEf0123456789";
const NIN: &str = "12345678901";

#[tokio::test]
async fn registration_inserts_with_status_not_voted() {
    let registry = MockRegistry::default();
    let flow = RegistrationFlow::new(registry.clone());

    let record = flow.register(WALLET, NIN).await.unwrap();
    assert_eq!(record.wallet_address(), &WALLET.to_lowercase());
    assert_eq!(record.nin(), NIN);
    assert_eq!(*record.status(), VoterStatus::NotVoted);
    assert_eq!(registry.status_of(WALLET), Some(VoterStatus::NotVoted));
}

#[tokio::test]
async fn malformed_nin_is_rejected_before_any_lookup() {
    let flow = RegistrationFlow::new(MockRegistry::default());

    let err = flow.register(WALLET, "123").await.unwrap_err();
    assert!(matches!(err.kind, VoteErrorKind::InvalidNin));
    let err = flow.register("", NIN).await.unwrap_err();
    assert!(matches!(err.kind, VoteErrorKind::InvalidWallet(_)));
}

#[tokio::test]
async fn locked_submissions_reject_registration() {
    let registry = MockRegistry::default().locked(true);
    let flow = RegistrationFlow::new(registry);

    let err = flow.register(WALLET, NIN).await.unwrap_err();
    assert!(matches!(err.kind, VoteErrorKind::RegistrationLocked));
}

#[tokio::test]
async fn wallet_can_register_only_once() {
    let registry =
        MockRegistry::default().with_voter(WALLET, NIN, VoterStatus::NotVoted);
    let flow = RegistrationFlow::new(registry);

    let err = flow.register(WALLET, "98765432109").await.unwrap_err();
    assert!(matches!(err.kind, VoteErrorKind::AlreadyRegistered));
}

#[tokio::test]
async fn nin_cannot_be_claimed_by_a_second_wallet() {
    let registry =
        MockRegistry::default().with_voter(WALLET, NIN, VoterStatus::NotVoted);
    let flow = RegistrationFlow::new(registry);

    let err = flow.register("0xother", NIN).await.unwrap_err();
    assert!(matches!(err.kind, VoteErrorKind::NinClaimed));
}
