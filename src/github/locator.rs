//! Identity wrappers and locators for the pull request under check.

use url::Url;

use super::error::CheckError;

/// Public GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Repository owner (user or organisation) wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::MissingPathSegments` when the value is empty.
    pub fn new(value: &str) -> Result<Self, CheckError> {
        if value.is_empty() {
            return Err(CheckError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::MissingPathSegments` when the value is empty.
    pub fn new(value: &str) -> Result<Self, CheckError> {
        if value.is_empty() {
            return Err(CheckError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidPullRequestNumber` for zero.
    pub const fn new(value: u64) -> Result<Self, CheckError> {
        if value == 0 {
            return Err(CheckError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, CheckError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CheckError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Extracts the pull request number from a CI ref such as
/// `refs/pull/42/merge`.
///
/// Both the `merge` and `head` refs that GitHub creates for a pull request
/// are accepted.
///
/// # Errors
///
/// Returns `CheckError::InvalidPullRequestRef` when the ref does not name a
/// pull request, or `CheckError::InvalidPullRequestNumber` when the number
/// is zero.
///
/// # Example
///
/// ```
/// use approval_gate::github::locator::parse_pull_request_ref;
///
/// let number = parse_pull_request_ref("refs/pull/1031/merge").expect("valid ref");
/// assert_eq!(number.get(), 1031);
/// ```
pub fn parse_pull_request_ref(git_ref: &str) -> Result<PullRequestNumber, CheckError> {
    let invalid = || CheckError::InvalidPullRequestRef {
        value: git_ref.to_owned(),
    };

    let rest = git_ref.strip_prefix("refs/pull/").ok_or_else(invalid)?;
    let digits = rest
        .strip_suffix("/merge")
        .or_else(|| rest.strip_suffix("/head"))
        .ok_or_else(invalid)?;
    let value = digits.parse::<u64>().map_err(|_| invalid())?;

    PullRequestNumber::new(value)
}

/// Derives the GitHub API base URL from a web host.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, CheckError> {
    if host.eq_ignore_ascii_case("github.com") {
        return parse_api_base(DEFAULT_API_BASE);
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = parse_api_base(&format!("{scheme}://{authority}"))?;

    api_url
        .set_port(port)
        .map_err(|()| CheckError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

fn parse_api_base(value: &str) -> Result<Url, CheckError> {
    Url::parse(value).map_err(|error| CheckError::InvalidUrl(format!("{value}: {error}")))
}

/// The pull request whose reviews are checked, plus the API base that
/// serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Assembles a locator from already validated parts.
    #[must_use]
    pub const fn new(
        api_base: Url,
        owner: RepositoryOwner,
        repository: RepositoryName,
        number: PullRequestNumber,
    ) -> Self {
        Self {
            api_base,
            owner,
            repository,
            number,
        }
    }

    /// Builds a locator from an `owner/repo` slug as found in
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidUrl` when `api_base` cannot be parsed and
    /// `CheckError::InvalidRepository` when the slug is not exactly two
    /// non-empty segments.
    ///
    /// # Example
    ///
    /// ```
    /// use approval_gate::github::locator::{PullRequestLocator, PullRequestNumber};
    ///
    /// let number = PullRequestNumber::new(7311).expect("non-zero");
    /// let locator = PullRequestLocator::from_slug("https://api.github.com", "facebook/react", number)
    ///     .expect("valid slug");
    /// assert_eq!(locator.owner().as_str(), "facebook");
    /// assert_eq!(locator.repository().as_str(), "react");
    /// ```
    pub fn from_slug(
        api_base: &str,
        slug: &str,
        number: PullRequestNumber,
    ) -> Result<Self, CheckError> {
        let invalid = || CheckError::InvalidRepository {
            value: slug.to_owned(),
        };

        let (owner_part, repository_part) = slug.trim().split_once('/').ok_or_else(invalid)?;
        if repository_part.contains('/') {
            return Err(invalid());
        }

        let owner = RepositoryOwner::new(owner_part).map_err(|_| invalid())?;
        let repository = RepositoryName::new(repository_part).map_err(|_| invalid())?;

        Ok(Self::new(
            parse_api_base(api_base)?,
            owner,
            repository,
            number,
        ))
    }

    /// Parses a pull request web URL in the form
    /// `https://github.com/<owner>/<repo>/pull/<number>`.
    ///
    /// GitHub Enterprise hosts get an `api/v3` base on the same host.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidUrl` when parsing fails,
    /// `MissingPathSegments` when the path is not `/owner/repo/pull/<number>`,
    /// and `InvalidPullRequestNumber` when the final segment is not a
    /// positive integer.
    pub fn parse(input: &str) -> Result<Self, CheckError> {
        let parsed =
            Url::parse(input).map_err(|error| CheckError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(CheckError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(CheckError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(CheckError::MissingPathSegments)?;
        let marker = segments.next().ok_or(CheckError::MissingPathSegments)?;
        let number_segment = segments.next().ok_or(CheckError::MissingPathSegments)?;

        if marker != "pull" || number_segment.is_empty() {
            return Err(CheckError::MissingPathSegments);
        }

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let number = number_segment
            .parse::<u64>()
            .map_err(|_| CheckError::InvalidPullRequestNumber)
            .and_then(PullRequestNumber::new)?;

        let host = parsed
            .host_str()
            .ok_or_else(|| CheckError::InvalidUrl("URL must include a host".to_owned()))?;
        let api_base = derive_api_base_from_host(parsed.scheme(), host, parsed.port())?;

        Ok(Self::new(api_base, owner, repository, number))
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// `owner/repo#number`, for log lines.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!(
            "{}/{}#{}",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn reviews_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}
