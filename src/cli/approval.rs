//! Approval check operation.

use std::sync::Arc;

use approval_gate::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use approval_gate::{ApprovalCheck, CheckError, CheckOutcome, GateConfig, OctocrabReviewGateway};

use super::output::write_outcome;

/// Checks the configured pull request and prints the outcome annotation.
///
/// # Errors
///
/// Returns the configuration error when inputs are missing or malformed,
/// before any request is made, and [`CheckError::Io`] when the annotation
/// cannot be written. Failures to fetch reviews are not errors here; they
/// are reported as [`CheckOutcome::InternalError`].
pub async fn run(config: &GateConfig) -> Result<CheckOutcome, CheckError> {
    config.validate()?;
    let locator = config.resolve_locator()?;
    let token = config.resolve_token()?;

    if token.is_none() {
        tracing::warn!("no token configured; querying GitHub anonymously");
    }

    let gateway =
        OctocrabReviewGateway::for_locator(token.as_ref(), &locator, config.reviews_per_page)?;
    let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    };

    let outcome = ApprovalCheck::new(&gateway)
        .with_telemetry(telemetry)
        .run(&locator)
        .await;

    write_outcome(&outcome)?;
    Ok(outcome)
}
