//! Gate configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach, lowest to
//! highest precedence:
//!
//! 1. **Defaults** – built-in application defaults
//! 2. **Configuration file** – `.approval-gate.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `APPROVAL_GATE_*`
//! 4. **Command-line arguments**
//!
//! When a value is absent from every layer, the variables GitHub Actions
//! sets for each job are consulted: `GITHUB_TOKEN`, `GITHUB_REPOSITORY`,
//! `GITHUB_REF` and `GITHUB_API_URL`. Inside a `pull_request` workflow the
//! gate therefore needs no configuration at all.
//!
//! # Configuration File
//!
//! ```toml
//! repository = "octocat/hello-world"
//! pr_number = 42
//! api_url = "https://ghe.example.com/api/v3"
//! reviews_per_page = 50
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::CheckError;
use crate::github::gateway::{DEFAULT_REVIEWS_PER_PAGE, MAX_REVIEWS_PER_PAGE};
use crate::github::locator::{
    DEFAULT_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber,
    parse_pull_request_ref,
};

/// Token variable provided to every GitHub Actions job.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
/// `owner/repo` of the repository running the workflow.
pub const GITHUB_REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
/// Ref that triggered the workflow, `refs/pull/<n>/merge` for pull requests.
pub const GITHUB_REF_VAR: &str = "GITHUB_REF";
/// REST API base of the GitHub instance running the workflow.
pub const GITHUB_API_URL_VAR: &str = "GITHUB_API_URL";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use approval_gate::GateConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GateConfig::load().expect("failed to load configuration");
/// config.validate().expect("configuration should be consistent");
/// let locator = config.resolve_locator().expect("pull request required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "APPROVAL_GATE",
    discovery(
        dotfile_name = ".approval-gate.toml",
        config_file_name = "approval-gate.toml",
        app_name = "approval-gate"
    )
)]
pub struct GateConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `APPROVAL_GATE_TOKEN`, falling back to `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    ///
    /// Without any token the gate queries GitHub anonymously.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository slug in `owner/repo` form.
    ///
    /// Can be provided via:
    /// - CLI: `--repository <SLUG>` or `-r <SLUG>`
    /// - Environment: `APPROVAL_GATE_REPOSITORY`, falling back to
    ///   `GITHUB_REPOSITORY`
    /// - Config file: `repository = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Pull request number.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-number <N>` or `-n <N>`
    /// - Environment: `APPROVAL_GATE_PR_NUMBER`
    /// - Config file: `pr_number = 42`
    ///
    /// Takes precedence over `git_ref`.
    #[ortho_config(cli_short = 'n')]
    pub pr_number: Option<u64>,

    /// Pull request ref such as `refs/pull/42/merge`.
    ///
    /// Can be provided via:
    /// - CLI: `--git-ref <REF>` or `-g <REF>`
    /// - Environment: `APPROVAL_GATE_GIT_REF`, falling back to `GITHUB_REF`
    /// - Config file: `git_ref = "..."`
    #[ortho_config(cli_short = 'g')]
    pub git_ref: Option<String>,

    /// Pull request web URL, an alternative to `repository` plus a number.
    ///
    /// The API base is derived from the URL's host.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `APPROVAL_GATE_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// GitHub REST API base URL.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `APPROVAL_GATE_API_URL`, falling back to
    ///   `GITHUB_API_URL`
    /// - Config file: `api_url = "..."`
    ///
    /// Defaults to `https://api.github.com`.
    #[ortho_config(cli_short = 'a')]
    pub api_url: Option<String>,

    /// Reviews requested per page, between 1 and 100.
    ///
    /// Defaults to 100.
    #[ortho_config(cli_short = 'p')]
    pub reviews_per_page: u8,

    /// Writes JSONL telemetry events to stderr.
    ///
    /// Can be provided via:
    /// - CLI: `--telemetry` / `-T`
    /// - Config file: `telemetry = true`
    #[ortho_config(cli_short = 'T')]
    pub telemetry: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            pr_number: None,
            git_ref: None,
            pr_url: None,
            api_url: None,
            reviews_per_page: DEFAULT_REVIEWS_PER_PAGE,
            telemetry: false,
        }
    }
}

/// Reads a variable, treating blank values as unset.
fn non_blank_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

impl GateConfig {
    /// Checks that the configured values do not contradict each other.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] when `pr_url` is combined with
    /// `repository`, `pr_number` or `git_ref`, and
    /// [`CheckError::InvalidPagination`] when `reviews_per_page` is out of
    /// range.
    pub fn validate(&self) -> Result<(), CheckError> {
        let has_explicit_parts =
            self.repository.is_some() || self.pr_number.is_some() || self.git_ref.is_some();
        if self.pr_url.is_some() && has_explicit_parts {
            return Err(CheckError::Configuration {
                message: "pr_url cannot be combined with repository, pr_number or git_ref"
                    .to_owned(),
            });
        }

        if self.reviews_per_page == 0 || self.reviews_per_page > MAX_REVIEWS_PER_PAGE {
            return Err(CheckError::InvalidPagination {
                message: format!(
                    "reviews_per_page must be between 1 and {MAX_REVIEWS_PER_PAGE}, got {}",
                    self.reviews_per_page
                ),
            });
        }

        Ok(())
    }

    /// Resolves the token from configuration or `GITHUB_TOKEN`.
    ///
    /// Returns `Ok(None)` when no source provides a token, in which case
    /// requests are anonymous.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingToken`] when the configured token is
    /// blank.
    pub fn resolve_token(&self) -> Result<Option<PersonalAccessToken>, CheckError> {
        match &self.token {
            Some(value) => PersonalAccessToken::new(value).map(Some),
            None => non_blank_env(GITHUB_TOKEN_VAR)
                .map(PersonalAccessToken::new)
                .transpose(),
        }
    }

    /// Returns the API base from configuration, `GITHUB_API_URL`, or the
    /// public GitHub default.
    #[must_use]
    pub fn resolve_api_url(&self) -> String {
        self.api_url
            .clone()
            .or_else(|| non_blank_env(GITHUB_API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned())
    }

    /// Returns the `owner/repo` slug from configuration or
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingRepository`] when neither is set.
    pub fn resolve_repository(&self) -> Result<String, CheckError> {
        self.repository
            .clone()
            .or_else(|| non_blank_env(GITHUB_REPOSITORY_VAR))
            .ok_or(CheckError::MissingRepository)
    }

    /// Returns the pull request number from `pr_number`, or else parsed from
    /// `git_ref` / `GITHUB_REF`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InvalidPullRequestNumber`] for a zero number,
    /// [`CheckError::InvalidPullRequestRef`] when the ref does not name a
    /// pull request, and [`CheckError::MissingPullRequestNumber`] when no
    /// source is set.
    pub fn resolve_pr_number(&self) -> Result<PullRequestNumber, CheckError> {
        if let Some(number) = self.pr_number {
            return PullRequestNumber::new(number);
        }

        let git_ref = self
            .git_ref
            .clone()
            .or_else(|| non_blank_env(GITHUB_REF_VAR))
            .ok_or(CheckError::MissingPullRequestNumber)?;

        parse_pull_request_ref(&git_ref)
    }

    /// Builds the locator of the pull request under check.
    ///
    /// `pr_url` wins when set; otherwise the repository, number and API base
    /// are resolved individually.
    ///
    /// # Errors
    ///
    /// Propagates the failures of [`PullRequestLocator::parse`],
    /// [`Self::resolve_repository`], [`Self::resolve_pr_number`] and
    /// [`PullRequestLocator::from_slug`].
    pub fn resolve_locator(&self) -> Result<PullRequestLocator, CheckError> {
        if let Some(url) = self.pr_url.as_deref() {
            return PullRequestLocator::parse(url);
        }

        let repository = self.resolve_repository()?;
        let number = self.resolve_pr_number()?;
        PullRequestLocator::from_slug(&self.resolve_api_url(), &repository, number)
    }
}

#[cfg(test)]
mod tests;
