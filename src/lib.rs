//! Story Test-Case Generator
//!
//! Receives Jira webhooks for Stories, asks a chat-completion model for
//! Gherkin-style test cases and files them back as a linked "Test" issue.
//! This library exposes core modules for the binary and for testing.

pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod tracker;

// Re-export commonly used types for tests
pub use config::{AppConfig, JiraConfig, OpenAiConfig, ServerConfig};
pub use error::{AppError, AppResult};
pub use generator::{build_prompt, OpenAiGenerator, TestCaseGenerator};
pub use handlers::{bind, router, WebhookState};
pub use models::{CreatedIssue, StoryEvent, TrackerIssue};
pub use tracker::{test_issue_summary, IssueTracker, JiraClient};
