//! GitHub review retrieval.
//!
//! This module wraps Octocrab to locate the pull request under check and to
//! fetch its complete, chronologically ordered review history. Errors are
//! mapped into [`CheckError`] variants so that callers can report precise
//! failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod rate_limit;

pub use error::CheckError;
pub use gateway::{
    DEFAULT_REVIEWS_PER_PAGE, MAX_REVIEWS_PER_PAGE, OctocrabReviewGateway, ReviewGateway,
};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
    parse_pull_request_ref,
};
pub use models::{AuthorAssociation, ReviewEvent, ReviewState, ReviewerId};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockReviewGateway;

#[cfg(test)]
mod tests;
