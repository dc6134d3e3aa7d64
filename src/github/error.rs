//! Error types exposed by the approval gate.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while resolving inputs or fetching reviews from GitHub.
///
/// Policy outcomes are never expressed through this type: a pull request
/// that lacks approval is an [`crate::EvaluationResult`], not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    /// Neither configuration nor `GITHUB_REPOSITORY` named a repository.
    #[error("repository is required (use --repository or set GITHUB_REPOSITORY)")]
    MissingRepository,

    /// The repository slug is not of the form `owner/repo`.
    #[error("repository must be of the form owner/repo, got {value:?}")]
    InvalidRepository {
        /// Slug as supplied.
        value: String,
    },

    /// Neither a pull request number nor a pull request ref was supplied.
    #[error("pull request number is required (use --pr-number or set GITHUB_REF)")]
    MissingPullRequestNumber,

    /// The Git ref does not point at a pull request.
    #[error("git ref must match refs/pull/<number>/merge, got {value:?}")]
    InvalidPullRequestRef {
        /// Ref as supplied.
        value: String,
    },

    /// The provided URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request URL path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// An explicitly supplied token was blank.
    #[error("personal access token must not be blank")]
    MissingToken,

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if it could be queried after the failure.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Fetching the review list failed.
    #[error("could not get reviews: {source}")]
    Reviews {
        /// Underlying gateway failure.
        source: Box<CheckError>,
    },
}

impl CheckError {
    /// Wraps a gateway failure with review-fetch context.
    #[must_use]
    pub fn reviews(source: Self) -> Self {
        Self::Reviews {
            source: Box::new(source),
        }
    }

    /// Returns true when the error stems from missing or malformed inputs
    /// rather than from talking to GitHub.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRepository
                | Self::InvalidRepository { .. }
                | Self::MissingPullRequestNumber
                | Self::InvalidPullRequestRef { .. }
                | Self::InvalidUrl(_)
                | Self::MissingPathSegments
                | Self::InvalidPullRequestNumber
                | Self::MissingToken
                | Self::InvalidPagination { .. }
                | Self::Configuration { .. }
        )
    }
}
