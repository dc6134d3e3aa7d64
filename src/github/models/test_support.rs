//! Builders for `ReviewEvent` fixtures.
//!
//! # Examples
//!
//! ```
//! use approval_gate::github::models::test_support::{approved_by, changes_requested_by};
//! use approval_gate::github::models::ReviewState;
//!
//! let approval = approved_by(1);
//! assert_eq!(approval.state, ReviewState::Approved);
//!
//! let veto = changes_requested_by(2);
//! assert_eq!(veto.state, ReviewState::ChangesRequested);
//! ```

use super::{AuthorAssociation, ReviewEvent, ReviewState, ReviewerId};

/// Constructs a review event with the given reviewer, association and state.
///
/// The login is set to `reviewer-{id}` and no timestamp is recorded.
#[must_use]
pub fn review(reviewer: u64, association: AuthorAssociation, state: ReviewState) -> ReviewEvent {
    ReviewEvent {
        reviewer: ReviewerId::new(reviewer),
        reviewer_login: Some(format!("reviewer-{reviewer}")),
        author_association: association,
        state,
        submitted_at: None,
    }
}

/// A collaborator approval.
#[must_use]
pub fn approved_by(reviewer: u64) -> ReviewEvent {
    review(reviewer, AuthorAssociation::Collaborator, ReviewState::Approved)
}

/// A collaborator change request.
#[must_use]
pub fn changes_requested_by(reviewer: u64) -> ReviewEvent {
    review(
        reviewer,
        AuthorAssociation::Collaborator,
        ReviewState::ChangesRequested,
    )
}

/// A collaborator comment.
#[must_use]
pub fn commented_by(reviewer: u64) -> ReviewEvent {
    review(reviewer, AuthorAssociation::Collaborator, ReviewState::Commented)
}

/// A collaborator review that was later dismissed.
#[must_use]
pub fn dismissed_for(reviewer: u64) -> ReviewEvent {
    review(reviewer, AuthorAssociation::Collaborator, ReviewState::Dismissed)
}
