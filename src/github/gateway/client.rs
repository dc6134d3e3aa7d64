//! Octocrab client setup for the review gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::CheckError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an Octocrab client rooted at `api_base`, which is either public
/// GitHub or a GitHub Enterprise `/api/v3` endpoint.
///
/// Without a token the client issues anonymous requests, which GitHub
/// accepts for public repositories at a lower rate limit.
///
/// # Errors
///
/// Returns `CheckError::InvalidUrl` when the base URI cannot be parsed or
/// `CheckError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: Option<&PersonalAccessToken>,
    api_base: &str,
) -> Result<Octocrab, CheckError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| CheckError::InvalidUrl(error.to_string()))?;

    let builder = Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| CheckError::Api {
            message: format!("build client failed: {error}"),
        })?;

    let authenticated = match token {
        Some(value) => builder.personal_token(value.as_ref()),
        None => builder,
    };

    authenticated
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
