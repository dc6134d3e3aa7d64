//! Review events as returned by the GitHub pull request reviews endpoint.
//!
//! `ApiReview` is the internal deserialisation target; it converts into the
//! public [`ReviewEvent`] with string enumerations mapped onto closed types.
//! Unrecognised strings land in an explicit `Unknown` variant instead of
//! failing the whole page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Stable numeric identifier of a reviewing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReviewerId(u64);

impl ReviewerId {
    /// Identifier used for reviews whose author account was deleted.
    ///
    /// GitHub reports such reviews with a `null` user; they all collapse
    /// onto this one identifier.
    pub const GHOST: Self = Self(0);

    /// Wraps a raw account id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw account id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReviewerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Relationship of a reviewer to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorAssociation {
    /// Invited collaborator.
    Collaborator,
    /// Repository owner.
    Owner,
    /// Member of the owning organisation.
    Member,
    /// Has previously committed to the repository.
    Contributor,
    /// First-time contributor to the repository.
    FirstTimeContributor,
    /// First contribution to GitHub at all.
    FirstTimer,
    /// Placeholder for an imported account.
    Mannequin,
    /// No association.
    None,
    /// Value this crate does not recognise.
    Unknown(String),
}

impl AuthorAssociation {
    /// Maps the API string onto an association.
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        match value {
            "COLLABORATOR" => Self::Collaborator,
            "OWNER" => Self::Owner,
            "MEMBER" => Self::Member,
            "CONTRIBUTOR" => Self::Contributor,
            "FIRST_TIME_CONTRIBUTOR" => Self::FirstTimeContributor,
            "FIRST_TIMER" => Self::FirstTimer,
            "MANNEQUIN" => Self::Mannequin,
            "NONE" => Self::None,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Whether reviews from this association count towards the policy.
    ///
    /// Only collaborators, owners and organisation members qualify.
    /// `Unknown` never qualifies.
    #[must_use]
    pub const fn is_qualifying(&self) -> bool {
        matches!(self, Self::Collaborator | Self::Owner | Self::Member)
    }

    /// API spelling of the association.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Collaborator => "COLLABORATOR",
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::Mannequin => "MANNEQUIN",
            Self::None => "NONE",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

/// Outcome recorded by a single review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    /// The reviewer approved the changes.
    Approved,
    /// The reviewer asked for changes.
    ChangesRequested,
    /// A plain comment with no verdict.
    Commented,
    /// The review was withdrawn by a maintainer.
    Dismissed,
    /// Review started but not submitted.
    Pending,
    /// Value this crate does not recognise.
    Unknown(String),
}

impl ReviewState {
    /// Maps the API string onto a review state.
    #[must_use]
    pub fn from_api(value: &str) -> Self {
        match value {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "COMMENTED" => Self::Commented,
            "DISMISSED" => Self::Dismissed,
            "PENDING" => Self::Pending,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// API spelling of the state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Approved => "APPROVED",
            Self::ChangesRequested => "CHANGES_REQUESTED",
            Self::Commented => "COMMENTED",
            Self::Dismissed => "DISMISSED",
            Self::Pending => "PENDING",
            Self::Unknown(raw) => raw.as_str(),
        }
    }
}

/// One submitted or dismissed review on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    /// Reviewing account.
    pub reviewer: ReviewerId,
    /// Reviewer login, when the account still exists.
    pub reviewer_login: Option<String>,
    /// Reviewer relationship to the repository.
    pub author_association: AuthorAssociation,
    /// Review outcome.
    pub state: ReviewState,
    /// Submission time, when GitHub reports one.
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiReview {
    pub(crate) user: Option<ApiUser>,
    pub(crate) state: Option<String>,
    pub(crate) author_association: Option<String>,
    pub(crate) submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) id: u64,
    pub(crate) login: Option<String>,
}

impl From<ApiReview> for ReviewEvent {
    fn from(value: ApiReview) -> Self {
        let (reviewer, reviewer_login) = value.user.map_or((ReviewerId::GHOST, None), |user| {
            (ReviewerId::new(user.id), user.login)
        });

        Self {
            reviewer,
            reviewer_login,
            author_association: AuthorAssociation::from_api(
                value.author_association.as_deref().unwrap_or_default(),
            ),
            state: ReviewState::from_api(value.state.as_deref().unwrap_or_default()),
            submitted_at: value.submitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiReview, AuthorAssociation, ReviewEvent, ReviewState, ReviewerId};

    #[rstest]
    fn api_review_converts_into_event() {
        let value = json!({
            "id": 80,
            "node_id": "MDE3OlB1bGxSZXF1ZXN0UmV2aWV3ODA=",
            "user": { "login": "octocat", "id": 1 },
            "body": "Here is the body for the review.",
            "state": "APPROVED",
            "author_association": "COLLABORATOR",
            "submitted_at": "2019-11-17T17:43:43Z",
            "commit_id": "ecdd80bb57125d7ba9641ffaa4d7d2c19d3f3091"
        });

        let api: ApiReview = serde_json::from_value(value).expect("ApiReview should deserialise");
        let event = ReviewEvent::from(api);

        assert_eq!(event.reviewer, ReviewerId::new(1));
        assert_eq!(event.reviewer_login.as_deref(), Some("octocat"));
        assert_eq!(event.author_association, AuthorAssociation::Collaborator);
        assert_eq!(event.state, ReviewState::Approved);
        assert!(event.submitted_at.is_some(), "timestamp should parse");
    }

    #[rstest]
    fn deleted_account_maps_to_ghost() {
        let value = json!({
            "id": 81,
            "user": null,
            "state": "CHANGES_REQUESTED",
            "author_association": "NONE",
            "submitted_at": null
        });

        let api: ApiReview = serde_json::from_value(value).expect("ApiReview should deserialise");
        let event = ReviewEvent::from(api);

        assert_eq!(event.reviewer, ReviewerId::GHOST);
        assert!(event.reviewer_login.is_none());
        assert!(event.submitted_at.is_none());
    }

    #[rstest]
    #[case("COLLABORATOR", true)]
    #[case("OWNER", true)]
    #[case("MEMBER", true)]
    #[case("CONTRIBUTOR", false)]
    #[case("FIRST_TIME_CONTRIBUTOR", false)]
    #[case("NONE", false)]
    #[case("STAFF", false)]
    #[case("", false)]
    fn qualifying_associations(#[case] raw: &str, #[case] qualifies: bool) {
        assert_eq!(
            AuthorAssociation::from_api(raw).is_qualifying(),
            qualifies,
            "unexpected qualification for {raw:?}"
        );
    }

    #[rstest]
    fn unknown_values_round_trip_their_spelling() {
        let state = ReviewState::from_api("ESCALATED");
        let association = AuthorAssociation::from_api("STAFF");

        assert_eq!(state, ReviewState::Unknown("ESCALATED".to_owned()));
        assert_eq!(state.as_str(), "ESCALATED");
        assert_eq!(association.as_str(), "STAFF");
    }
}
