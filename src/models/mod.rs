//! Request and response payloads
//!
//! Nothing here outlives a single webhook delivery.

pub mod event;
pub mod issue;

pub use event::StoryEvent;
pub use issue::{CreateIssueRequest, CreatedIssue, TrackerIssue};
