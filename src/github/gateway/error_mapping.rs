//! Classification of Octocrab failures met while fetching reviews.
//!
//! Every variant produced here ends up inside `CheckError::Reviews`, so the
//! runner reports it as an internal error rather than a policy verdict.

use http::StatusCode;

use crate::github::error::CheckError;

/// Statuses GitHub uses when the token is missing, bad, or lacks access to
/// the repository.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Failures that happened before GitHub produced a response.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Whether GitHub refused the request because the quota ran out.
///
/// GitHub answers 403 both for missing permissions and for an exhausted
/// quota, so the message or documentation link must mention rate limiting.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Maps an Octocrab failure from `operation` to a [`CheckError`].
///
/// Rate limiting is left to the gateway, which queries `/rate_limit` to
/// enrich the error before falling back to this mapping.
pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> CheckError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        let message = &source.message;
        return if is_auth_failure(status) {
            CheckError::Authentication {
                message: format!("{operation} failed: GitHub returned {status} {message}"),
            }
        } else {
            CheckError::Api {
                message: format!("{operation} failed with status {status}: {message}"),
            }
        };
    }

    if is_network_error(error) {
        return CheckError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    CheckError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use rstest::rstest;

    use super::is_auth_failure;

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, true)]
    #[case::forbidden(StatusCode::FORBIDDEN, true)]
    #[case::not_found(StatusCode::NOT_FOUND, false)]
    #[case::server_error(StatusCode::BAD_GATEWAY, false)]
    fn auth_failures_are_401_and_403(#[case] status: StatusCode, #[case] expected: bool) {
        assert_eq!(is_auth_failure(status), expected);
    }
}
