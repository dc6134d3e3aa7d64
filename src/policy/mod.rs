//! Review approval policy.
//!
//! A pull request passes when at least one qualifying reviewer (a
//! collaborator, owner or organisation member) approves it and no qualifying
//! reviewer's latest standing is a non-approval. Reviews are folded in
//! chronological order into an [`AcceptanceTable`] holding each reviewer's
//! current standing:
//!
//! - reviews from non-qualifying accounts are ignored;
//! - comments are ignored and never overwrite a verdict;
//! - a dismissal forgets the reviewer's verdict entirely;
//! - any other review replaces the reviewer's verdict, approving only when
//!   the state is `APPROVED`.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::github::models::{ReviewEvent, ReviewState, ReviewerId};

/// Number of qualifying approvals the policy asks for.
pub const REQUIRED_APPROVALS: NonZeroU32 = NonZeroU32::MIN;

/// Current verdict of a single reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// Latest verdict is an approval.
    Approved,
    /// Latest verdict is anything other than an approval.
    NotApproved,
}

/// Why an event left the table untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The reviewer is not a collaborator, owner or member.
    NonQualifying,
    /// The review carried no verdict.
    Comment,
}

/// Effect of applying one event to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event did not change anything.
    Ignored(IgnoreReason),
    /// The reviewer's standing was set, replacing any earlier one.
    Recorded(Standing),
    /// The reviewer's standing was removed by a dismissal.
    Forgotten,
}

/// Per-reviewer standing built from one pull request's reviews.
///
/// Iteration follows reviewer id order so diagnostics are reproducible; the
/// verdict itself does not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptanceTable {
    standings: BTreeMap<ReviewerId, Standing>,
}

impl AcceptanceTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            standings: BTreeMap::new(),
        }
    }

    /// Folds one review into the table.
    pub fn apply(&mut self, event: &ReviewEvent) -> Transition {
        if !event.author_association.is_qualifying() {
            return Transition::Ignored(IgnoreReason::NonQualifying);
        }

        match event.state {
            ReviewState::Commented => Transition::Ignored(IgnoreReason::Comment),
            ReviewState::Dismissed => {
                self.standings.remove(&event.reviewer);
                Transition::Forgotten
            }
            ReviewState::Approved => self.record(event.reviewer, Standing::Approved),
            ReviewState::ChangesRequested | ReviewState::Pending | ReviewState::Unknown(_) => {
                self.record(event.reviewer, Standing::NotApproved)
            }
        }
    }

    fn record(&mut self, reviewer: ReviewerId, standing: Standing) -> Transition {
        self.standings.insert(reviewer, standing);
        Transition::Recorded(standing)
    }

    /// Current standing of `reviewer`, if any.
    #[must_use]
    pub fn standing(&self, reviewer: ReviewerId) -> Option<Standing> {
        self.standings.get(&reviewer).copied()
    }

    /// Number of reviewers with a standing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.standings.len()
    }

    /// Whether no reviewer currently has a standing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    /// First reviewer, in id order, whose standing is not an approval.
    #[must_use]
    pub fn first_blocking(&self) -> Option<ReviewerId> {
        self.standings
            .iter()
            .find(|(_, standing)| **standing == Standing::NotApproved)
            .map(|(reviewer, _)| *reviewer)
    }

    /// Verdict for the table in its current state.
    #[must_use]
    pub fn verdict(&self) -> EvaluationResult {
        if self.is_empty() {
            return EvaluationResult::ApprovalsNeeded(REQUIRED_APPROVALS);
        }

        if self.first_blocking().is_some() {
            return EvaluationResult::Rejected;
        }

        EvaluationResult::Satisfied
    }
}

/// Outcome of evaluating a pull request's reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationResult {
    /// No further approvals are needed.
    Satisfied,
    /// This many more qualifying approvals are needed.
    ApprovalsNeeded(NonZeroU32),
    /// A qualifying reviewer's latest verdict is not an approval.
    Rejected,
}

impl EvaluationResult {
    /// Further approvals needed; zero unless approvals are missing.
    #[must_use]
    pub const fn approvals_needed(self) -> u32 {
        match self {
            Self::ApprovalsNeeded(count) => count.get(),
            Self::Satisfied | Self::Rejected => 0,
        }
    }

    /// Whether the pull request passes the policy.
    #[must_use]
    pub const fn is_satisfied(self) -> bool {
        matches!(self, Self::Satisfied)
    }
}

/// Reduces reviews, in the order given, to a verdict.
///
/// `events` must be in chronological order: a later review from the same
/// reviewer overrides an earlier one.
///
/// # Example
///
/// ```
/// use approval_gate::github::models::test_support::{approved_by, changes_requested_by};
/// use approval_gate::policy::{EvaluationResult, evaluate};
///
/// let events = vec![changes_requested_by(1), approved_by(1)];
/// assert_eq!(evaluate(&events), EvaluationResult::Satisfied);
///
/// let reversed = vec![approved_by(1), changes_requested_by(1)];
/// assert_eq!(evaluate(&reversed), EvaluationResult::Rejected);
/// ```
#[must_use]
pub fn evaluate(events: &[ReviewEvent]) -> EvaluationResult {
    let mut table = AcceptanceTable::new();

    for event in events {
        let transition = table.apply(event);
        tracing::debug!(
            reviewer = %event.reviewer,
            login = event.reviewer_login.as_deref().unwrap_or("ghost"),
            association = event.author_association.as_str(),
            state = event.state.as_str(),
            ?transition,
            "applied review"
        );
    }

    let verdict = table.verdict();
    if let Some(reviewer) = table.first_blocking() {
        tracing::info!(%reviewer, "reviewer has not approved");
    }
    tracing::info!(
        reviewers = table.len(),
        reviews = events.len(),
        ?verdict,
        "evaluated reviews"
    );

    verdict
}
