//! Jira issue-creation client
//!
//! Files the generated test cases as a new "Test" issue whose summary
//! references the source Story key. The link is by text only.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::JiraConfig;
use crate::constants::{issue_types, JIRA_CREATE_ISSUE_PATH};
use crate::error::{AppError, AppResult};
use crate::models::{CreateIssueRequest, CreatedIssue, TrackerIssue};

/// Creates Test issues in the tracker
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn create_test_issue(&self, story_key: &str, test_cases: &str)
        -> AppResult<CreatedIssue>;
}

/// Summary of the Test issue filed for `story_key`
pub fn test_issue_summary(story_key: &str) -> String {
    format!("Test Cases for {}", story_key)
}

/// Jira Cloud / Server REST v3 client
pub struct JiraClient {
    client: reqwest::Client,
    endpoint: String,
    project_key: String,
    user_email: String,
    api_token: SecretString,
}

impl JiraClient {
    /// Create a client from configuration
    pub fn new(config: &JiraConfig) -> AppResult<Self> {
        let user_email = config
            .user_email
            .clone()
            .ok_or_else(|| AppError::Internal("Missing Jira user email".to_string()))?;
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| AppError::Internal("Missing Jira API token".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                JIRA_CREATE_ISSUE_PATH
            ),
            project_key: config.project_key.clone(),
            user_email,
            api_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the Test issue for a Story
    pub fn test_issue(&self, story_key: &str, test_cases: &str) -> TrackerIssue {
        TrackerIssue {
            project_key: self.project_key.clone(),
            summary: test_issue_summary(story_key),
            body: test_cases.to_string(),
            issue_type: issue_types::TEST.to_string(),
        }
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn create_test_issue(
        &self,
        story_key: &str,
        test_cases: &str,
    ) -> AppResult<CreatedIssue> {
        let issue = self.test_issue(story_key, test_cases);

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.user_email, Some(self.api_token.expose_secret()))
            .json(&CreateIssueRequest::from(&issue))
            .send()
            .await
            .map_err(|e| AppError::Tracker(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::TrackerStatus {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| AppError::Tracker(format!("Failed to parse JSON: {}", e)))?;

        tracing::info!(
            story_key = %story_key,
            test_issue = created.key().unwrap_or_default(),
            "Test issue created"
        );

        Ok(created)
    }
}
