//! Approval gate library crate.
//!
//! Decides whether a GitHub pull request satisfies a minimal review policy:
//! at least one approval from a collaborator, owner or organisation member,
//! and no such reviewer whose latest verdict is anything but an approval.
//! The library fetches the complete review history through Octocrab,
//! reduces it to an [`EvaluationResult`], and reports failures to fetch as
//! a distinct [`CheckOutcome::InternalError`].

pub mod check;
pub mod config;
pub mod github;
pub mod policy;
pub mod telemetry;

pub use check::{ApprovalCheck, CheckOutcome};
pub use config::GateConfig;
pub use github::{
    AuthorAssociation, CheckError, OctocrabReviewGateway, PersonalAccessToken,
    PullRequestLocator, ReviewEvent, ReviewGateway, ReviewState, ReviewerId,
};
pub use policy::{AcceptanceTable, EvaluationResult, evaluate};
