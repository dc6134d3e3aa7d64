//! CLI operation handlers.
//!
//! - [`approval`]: Run the approval check for the configured pull request
//!
//! Annotation formatting is in [`output`].

pub mod approval;
pub mod output;
