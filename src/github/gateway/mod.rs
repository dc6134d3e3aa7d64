//! Gateways for loading pull request reviews through Octocrab.
//!
//! The `ReviewGateway` trait is the seam between the approval check and the
//! GitHub API: tests mock it, while `OctocrabReviewGateway` performs the
//! real, paginated HTTP requests.

mod client;
mod error_mapping;
mod reviews;

pub use reviews::{DEFAULT_REVIEWS_PER_PAGE, MAX_REVIEWS_PER_PAGE, OctocrabReviewGateway};

use async_trait::async_trait;

use crate::github::error::CheckError;
use crate::github::locator::PullRequestLocator;
use crate::github::models::ReviewEvent;

/// Source of the review history of a pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetch every review on the pull request in chronological order,
    /// following pagination until the last page.
    ///
    /// A failure on any page fails the whole call; no partial list is
    /// returned.
    async fn list_reviews(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ReviewEvent>, CheckError>;
}
