//! Unit tests for pull request location and token handling.

use rstest::rstest;

use super::{
    CheckError, PersonalAccessToken, PullRequestLocator, PullRequestNumber,
    parse_pull_request_ref,
};

fn number(value: u64) -> PullRequestNumber {
    PullRequestNumber::new(value).expect("sample number should be positive")
}

#[rstest]
fn parses_standard_github_url_segments() {
    let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/12/files")
        .expect("should parse standard GitHub URL");
    assert_eq!(locator.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(locator.repository().as_str(), "repo", "repository mismatch");
    assert_eq!(locator.number().get(), 12_u64, "number mismatch");
    assert_eq!(
        locator.api_base().as_str(),
        "https://api.github.com/",
        "api base mismatch"
    );
}

#[rstest]
fn parses_enterprise_url() {
    let locator = PullRequestLocator::parse("https://ghe.example.com/foo/bar/pull/7")
        .expect("should parse enterprise URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com/api/v3",
        "enterprise api base mismatch"
    );
}

#[rstest]
#[case::missing_number("https://github.com/octo/repo/pull/")]
#[case::issues_path("https://github.com/octo/repo/issues/4")]
#[case::pulls_collection("https://github.com/octo/repo/pulls/4")]
fn rejects_non_pull_request_paths(#[case] url: &str) {
    let result = PullRequestLocator::parse(url);
    assert!(
        matches!(result, Err(CheckError::MissingPathSegments)),
        "expected MissingPathSegments for {url}, got {result:?}"
    );
}

#[rstest]
#[case::non_numeric("https://github.com/octo/repo/pull/not-a-number")]
#[case::zero("https://github.com/octo/repo/pull/0")]
fn rejects_invalid_numbers(#[case] url: &str) {
    let result = PullRequestLocator::parse(url);
    assert!(
        matches!(result, Err(CheckError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber for {url}, got {result:?}"
    );
}

#[rstest]
fn rejects_invalid_url() {
    let result = PullRequestLocator::parse("octo/repo/pull/4");
    assert!(
        matches!(result, Err(CheckError::InvalidUrl(_))),
        "expected InvalidUrl for malformed URL, got {result:?}"
    );
}

#[rstest]
fn builds_locator_from_slug() {
    let locator = PullRequestLocator::from_slug("https://api.github.com", "octo/repo", number(9))
        .expect("slug should parse");

    assert_eq!(locator.display_name(), "octo/repo#9");
    assert_eq!(locator.reviews_path(), "/repos/octo/repo/pulls/9/reviews");
}

#[rstest]
#[case::no_separator("octo")]
#[case::empty_owner("/repo")]
#[case::empty_repository("octo/")]
#[case::extra_segment("octo/repo/extra")]
fn rejects_malformed_slugs(#[case] slug: &str) {
    let result = PullRequestLocator::from_slug("https://api.github.com", slug, number(1));
    assert!(
        matches!(result, Err(CheckError::InvalidRepository { .. })),
        "expected InvalidRepository for {slug:?}, got {result:?}"
    );
}

#[rstest]
fn rejects_unparseable_api_base() {
    let result = PullRequestLocator::from_slug("not a url", "octo/repo", number(1));
    assert!(
        matches!(result, Err(CheckError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
#[case("refs/pull/1031/merge", 1031)]
#[case("refs/pull/5/head", 5)]
fn parses_pull_request_refs(#[case] git_ref: &str, #[case] expected: u64) {
    let parsed = parse_pull_request_ref(git_ref).expect("pull request ref should parse");
    assert_eq!(parsed.get(), expected);
}

#[rstest]
#[case::branch("refs/heads/main")]
#[case::tag("refs/tags/v1.0.0")]
#[case::missing_suffix("refs/pull/12")]
#[case::non_numeric("refs/pull/abc/merge")]
#[case::empty("")]
fn rejects_non_pull_request_refs(#[case] git_ref: &str) {
    let result = parse_pull_request_ref(git_ref);
    assert!(
        matches!(result, Err(CheckError::InvalidPullRequestRef { .. })),
        "expected InvalidPullRequestRef for {git_ref:?}, got {result:?}"
    );
}

#[rstest]
fn rejects_zero_in_ref() {
    let result = parse_pull_request_ref("refs/pull/0/merge");
    assert!(
        matches!(result, Err(CheckError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber, got {result:?}"
    );
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   ")]
fn rejects_blank_token(#[case] raw: &str) {
    let result = PersonalAccessToken::new(raw);
    assert!(
        matches!(result, Err(CheckError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn trims_token_whitespace() {
    let token = PersonalAccessToken::new("  ghp_example \n").expect("token should be valid");
    assert_eq!(token.value(), "ghp_example");
}
