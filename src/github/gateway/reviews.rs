//! Octocrab implementation of the review gateway.

use async_trait::async_trait;
use octocrab::{Octocrab, Page};

use crate::github::error::CheckError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator};
use crate::github::models::{ApiReview, ReviewEvent};
use crate::github::rate_limit::RateLimitInfo;

use super::ReviewGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{is_rate_limit_error, map_octocrab_error};

/// Page size requested when none is configured.
pub const DEFAULT_REVIEWS_PER_PAGE: u8 = 100;

/// Largest page size GitHub accepts for the reviews endpoint.
pub const MAX_REVIEWS_PER_PAGE: u8 = 100;

/// Octocrab-backed review gateway.
pub struct OctocrabReviewGateway {
    client: Octocrab,
    per_page: u8,
}

impl OctocrabReviewGateway {
    /// Creates a gateway from an Octocrab client.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidPagination` when `per_page` is zero or
    /// above [`MAX_REVIEWS_PER_PAGE`].
    pub fn new(client: Octocrab, per_page: u8) -> Result<Self, CheckError> {
        validate_per_page(per_page)?;
        Ok(Self { client, per_page })
    }

    /// Builds an Octocrab client against the locator's API base, optionally
    /// authenticated with `token`.
    ///
    /// The page size is checked first, so no client is built for a rejected
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidUrl` when the base URI cannot be parsed,
    /// `CheckError::Api` when Octocrab fails to construct a client, and
    /// `CheckError::InvalidPagination` for an out-of-range page size.
    pub fn for_locator(
        token: Option<&PersonalAccessToken>,
        locator: &PullRequestLocator,
        per_page: u8,
    ) -> Result<Self, CheckError> {
        validate_per_page(per_page)?;
        let client = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self { client, per_page })
    }

    async fn map_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> CheckError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                let base_message =
                    format!("{operation} failed: {message}", message = source.message);
                let message = match &rate_limit {
                    Some(info) => format!(
                        "{base_message} ({info}; retry in {wait}s)",
                        wait = info.seconds_until_reset()
                    ),
                    None => base_message,
                };

                CheckError::RateLimitExceeded {
                    rate_limit,
                    message,
                }
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let limit = u32::try_from(rate.limit).ok()?;
        let remaining = u32::try_from(rate.remaining).ok()?;
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}

#[async_trait]
impl ReviewGateway for OctocrabReviewGateway {
    async fn list_reviews(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<Vec<ReviewEvent>, CheckError> {
        let per_page = self.per_page.to_string();
        let query_params = [("per_page", per_page.as_str())];

        let first_page: Page<ApiReview> = match self
            .client
            .get(locator.reviews_path(), Some(&query_params))
            .await
        {
            Ok(page) => page,
            Err(error) => return Err(self.map_error_with_rate_limit("list reviews", &error).await),
        };

        tracing::debug!(
            pull_request = %locator.display_name(),
            first_page_len = first_page.items.len(),
            has_next = first_page.next.is_some(),
            "fetched first page of reviews"
        );

        // all_pages walks the Link headers sequentially, keeping response order.
        let reviews = match self.client.all_pages(first_page).await {
            Ok(reviews) => reviews,
            Err(error) => return Err(self.map_error_with_rate_limit("list reviews", &error).await),
        };

        Ok(reviews.into_iter().map(ReviewEvent::from).collect())
    }
}

fn validate_per_page(per_page: u8) -> Result<(), CheckError> {
    if per_page == 0 {
        return Err(CheckError::InvalidPagination {
            message: "per_page must be at least 1".to_owned(),
        });
    }

    if per_page > MAX_REVIEWS_PER_PAGE {
        return Err(CheckError::InvalidPagination {
            message: format!("per_page must not exceed {MAX_REVIEWS_PER_PAGE}"),
        });
    }

    Ok(())
}
