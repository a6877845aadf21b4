//! Outbound Jira issue payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Issue to be created in the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerIssue {
    pub project_key: String,
    pub summary: String,
    /// Generated test cases, stored as the issue description
    pub body: String,
    pub issue_type: String,
}

/// Body of `POST /rest/api/3/issue`
#[derive(Debug, Serialize)]
pub struct CreateIssueRequest<'a> {
    pub fields: IssueFields<'a>,
}

#[derive(Debug, Serialize)]
pub struct IssueFields<'a> {
    pub project: ProjectRef<'a>,
    pub summary: &'a str,
    pub description: &'a str,
    pub issuetype: IssueTypeRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct ProjectRef<'a> {
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub struct IssueTypeRef<'a> {
    pub name: &'a str,
}

impl<'a> From<&'a TrackerIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a TrackerIssue) -> Self {
        Self {
            fields: IssueFields {
                project: ProjectRef {
                    key: &issue.project_key,
                },
                summary: &issue.summary,
                description: &issue.body,
                issuetype: IssueTypeRef {
                    name: &issue.issue_type,
                },
            },
        }
    }
}

/// Jira's answer to a successful issue creation
///
/// Kept as the tracker sent it so the webhook caller sees the full response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedIssue(pub Value);

impl CreatedIssue {
    /// Issue key, e.g. `PROJ-43`, when present as a string
    pub fn key(&self) -> Option<&str> {
        self.0.get("key").and_then(Value::as_str)
    }
}
