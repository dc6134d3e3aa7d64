//! Approval check facade used by the CLI.
//!
//! [`ApprovalCheck`] fetches a pull request's reviews through a
//! [`ReviewGateway`] and reduces them with [`crate::policy::evaluate`].
//! [`CheckOutcome`] is the value the runner maps to an exit code; fetch
//! failures become [`CheckOutcome::InternalError`] and are never reported as
//! a policy verdict.

use std::num::NonZeroU32;
use std::sync::Arc;

use crate::github::error::CheckError;
use crate::github::gateway::ReviewGateway;
use crate::github::locator::PullRequestLocator;
use crate::policy::{EvaluationResult, evaluate};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Result of one run of the approval check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Policy satisfied.
    Satisfied,
    /// This many more qualifying approvals are needed.
    ApprovalsNeeded(NonZeroU32),
    /// A qualifying reviewer has not approved.
    Rejected,
    /// The check could not run.
    InternalError(CheckError),
}

impl CheckOutcome {
    /// Whether the check passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Process exit status: `0` on success, `1` otherwise.
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Further approvals needed; zero unless approvals are missing.
    #[must_use]
    pub const fn approvals_needed(&self) -> u32 {
        match self {
            Self::ApprovalsNeeded(count) => count.get(),
            Self::Satisfied | Self::Rejected | Self::InternalError(_) => 0,
        }
    }

    /// Short snake-case label for logs and telemetry.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::ApprovalsNeeded(_) => "approvals_needed",
            Self::Rejected => "rejected",
            Self::InternalError(_) => "internal_error",
        }
    }
}

impl From<EvaluationResult> for CheckOutcome {
    fn from(value: EvaluationResult) -> Self {
        match value {
            EvaluationResult::Satisfied => Self::Satisfied,
            EvaluationResult::ApprovalsNeeded(count) => Self::ApprovalsNeeded(count),
            EvaluationResult::Rejected => Self::Rejected,
        }
    }
}

impl From<Result<EvaluationResult, CheckError>> for CheckOutcome {
    fn from(value: Result<EvaluationResult, CheckError>) -> Self {
        match value {
            Ok(result) => result.into(),
            Err(error) => Self::InternalError(error),
        }
    }
}

/// Runs the approval policy against one pull request using a gateway.
pub struct ApprovalCheck<'client, Gateway>
where
    Gateway: ReviewGateway,
{
    client: &'client Gateway,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<'client, Gateway> ApprovalCheck<'client, Gateway>
where
    Gateway: ReviewGateway,
{
    /// Create a new check using the provided gateway.
    #[must_use]
    pub fn new(client: &'client Gateway) -> Self {
        Self {
            client,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Records telemetry events to `sink`.
    #[must_use]
    pub fn with_telemetry(self, sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            telemetry: sink,
            ..self
        }
    }

    /// Fetch the reviews and evaluate them.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Reviews`] wrapping the gateway failure when the
    /// review history cannot be fetched.
    pub async fn evaluate(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<EvaluationResult, CheckError> {
        let reviews = self
            .client
            .list_reviews(locator)
            .await
            .map_err(CheckError::reviews)?;

        self.telemetry.record(TelemetryEvent::ReviewsFetched {
            review_count: reviews.len(),
        });
        tracing::info!(
            pull_request = %locator.display_name(),
            reviews = reviews.len(),
            "fetched reviews"
        );

        Ok(evaluate(&reviews))
    }

    /// Run the check to completion.
    ///
    /// Never fails: a fetch failure is returned as
    /// [`CheckOutcome::InternalError`].
    pub async fn run(&self, locator: &PullRequestLocator) -> CheckOutcome {
        let outcome = CheckOutcome::from(self.evaluate(locator).await);

        if let CheckOutcome::InternalError(error) = &outcome {
            tracing::error!(pull_request = %locator.display_name(), %error, "approval check failed");
        }

        self.telemetry.record(TelemetryEvent::CheckCompleted {
            outcome: outcome.label().to_owned(),
            approvals_needed: outcome.approvals_needed(),
        });

        outcome
    }
}

#[cfg(test)]
mod tests;
