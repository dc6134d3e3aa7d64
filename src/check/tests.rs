//! Unit tests for the approval check facade.

use std::num::NonZeroU32;
use std::sync::Arc;

use mockall::predicate::function;
use rstest::{fixture, rstest};

use super::{ApprovalCheck, CheckOutcome};
use crate::github::error::CheckError;
use crate::github::gateway::MockReviewGateway;
use crate::github::locator::{PullRequestLocator, PullRequestNumber};
use crate::github::models::ReviewEvent;
use crate::github::models::test_support::{approved_by, changes_requested_by, dismissed_for};
use crate::policy::EvaluationResult;
use crate::telemetry::TelemetryEvent;
use crate::telemetry::test_support::RecordingTelemetrySink;

#[fixture]
fn locator() -> PullRequestLocator {
    let number = PullRequestNumber::new(1031).expect("sample number should be positive");
    PullRequestLocator::from_slug("https://api.github.com", "multitheftauto/mtasa-blue", number)
        .expect("sample locator should build")
}

fn gateway_returning(reviews: Vec<ReviewEvent>) -> MockReviewGateway {
    let mut gateway = MockReviewGateway::new();
    gateway
        .expect_list_reviews()
        .with(function(|locator: &PullRequestLocator| {
            locator.number().get() == 1031
        }))
        .times(1)
        .return_once(move |_| Ok(reviews));
    gateway
}

fn gateway_failing(error: CheckError) -> MockReviewGateway {
    let mut gateway = MockReviewGateway::new();
    gateway
        .expect_list_reviews()
        .times(1)
        .return_once(move |_| Err(error));
    gateway
}

#[rstest]
#[case::satisfied(vec![approved_by(1)], CheckOutcome::Satisfied)]
#[case::rejected(vec![approved_by(1), changes_requested_by(2)], CheckOutcome::Rejected)]
#[case::empty(vec![], CheckOutcome::ApprovalsNeeded(NonZeroU32::MIN))]
#[case::dismissed(vec![approved_by(1), dismissed_for(1)], CheckOutcome::ApprovalsNeeded(NonZeroU32::MIN))]
#[tokio::test]
async fn run_maps_policy_verdicts(
    locator: PullRequestLocator,
    #[case] reviews: Vec<ReviewEvent>,
    #[case] expected: CheckOutcome,
) {
    let gateway = gateway_returning(reviews);
    let check = ApprovalCheck::new(&gateway);

    assert_eq!(check.run(&locator).await, expected);
}

#[rstest]
#[tokio::test]
async fn fetch_failure_is_internal_error(locator: PullRequestLocator) {
    let gateway = gateway_failing(CheckError::Network {
        message: "connection refused".to_owned(),
    });
    let check = ApprovalCheck::new(&gateway);

    let outcome = check.run(&locator).await;

    let CheckOutcome::InternalError(error) = &outcome else {
        panic!("expected InternalError, got {outcome:?}");
    };
    assert_eq!(
        error.to_string(),
        "could not get reviews: network error talking to GitHub: connection refused"
    );
    assert!(!outcome.is_success());
    assert_eq!(outcome.exit_status(), 1);
}

#[rstest]
#[tokio::test]
async fn evaluate_wraps_gateway_errors(locator: PullRequestLocator) {
    let gateway = gateway_failing(CheckError::Authentication {
        message: "Bad credentials".to_owned(),
    });
    let check = ApprovalCheck::new(&gateway);

    let error = check
        .evaluate(&locator)
        .await
        .expect_err("gateway failure should propagate");

    assert!(
        matches!(
            &error,
            CheckError::Reviews { source } if matches!(**source, CheckError::Authentication { .. })
        ),
        "expected wrapped Authentication error, got {error:?}"
    );
}

#[rstest]
#[tokio::test]
async fn run_records_telemetry(locator: PullRequestLocator) {
    let gateway = gateway_returning(vec![approved_by(1), approved_by(2)]);
    let sink = Arc::new(RecordingTelemetrySink::default());
    let check = ApprovalCheck::new(&gateway).with_telemetry(sink.clone());

    let outcome = check.run(&locator).await;

    assert_eq!(outcome, CheckOutcome::Satisfied);
    assert_eq!(
        sink.take(),
        vec![
            TelemetryEvent::ReviewsFetched { review_count: 2 },
            TelemetryEvent::CheckCompleted {
                outcome: "satisfied".to_owned(),
                approvals_needed: 0,
            },
        ]
    );
}

#[rstest]
#[tokio::test]
async fn failed_run_records_only_completion(locator: PullRequestLocator) {
    let gateway = gateway_failing(CheckError::Api {
        message: "boom".to_owned(),
    });
    let sink = Arc::new(RecordingTelemetrySink::default());
    let check = ApprovalCheck::new(&gateway).with_telemetry(sink.clone());

    let outcome = check.run(&locator).await;

    assert_eq!(outcome.label(), "internal_error");
    assert_eq!(
        sink.take(),
        vec![TelemetryEvent::CheckCompleted {
            outcome: "internal_error".to_owned(),
            approvals_needed: 0,
        }]
    );
}

#[rstest]
#[case(CheckOutcome::Satisfied, 0, 0)]
#[case(CheckOutcome::Rejected, 1, 0)]
#[case(CheckOutcome::ApprovalsNeeded(NonZeroU32::MIN), 1, 1)]
#[case(CheckOutcome::InternalError(CheckError::MissingRepository), 1, 0)]
fn outcome_exit_status(#[case] outcome: CheckOutcome, #[case] status: u8, #[case] needed: u32) {
    assert_eq!(outcome.exit_status(), status);
    assert_eq!(outcome.approvals_needed(), needed);
}

#[rstest]
fn outcome_from_evaluation_result() {
    assert_eq!(
        CheckOutcome::from(EvaluationResult::Rejected),
        CheckOutcome::Rejected
    );
    assert_eq!(
        CheckOutcome::from(Err::<EvaluationResult, _>(CheckError::MissingToken)),
        CheckOutcome::InternalError(CheckError::MissingToken)
    );
}
