//! Inbound Jira webhook event
//!
//! Jira posts `{ webhookEvent, issue: { key, fields: { issuetype: { name },
//! summary, description } } }`. Any of those may be missing or carry an
//! unexpected type; such fields are read as empty strings instead of
//! rejecting the delivery.

use serde_json::Value;

use crate::constants::issue_types;

/// Fields of an inbound issue event the pipeline cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryEvent {
    /// Jira event name, e.g. `jira:issue_created`
    pub webhook_event: String,
    /// Issue key, e.g. `PROJ-42`
    pub issue_key: String,
    /// Issue type name, e.g. `Story`
    pub issue_type: String,
    pub summary: String,
    pub description: String,
}

impl StoryEvent {
    /// Extract an event from an arbitrary JSON body
    pub fn from_payload(payload: &Value) -> Self {
        let issue = payload.get("issue");
        let fields = issue.and_then(|i| i.get("fields"));

        Self {
            webhook_event: string_at(Some(payload), &["webhookEvent"]),
            issue_key: string_at(issue, &["key"]),
            issue_type: string_at(fields, &["issuetype", "name"]),
            summary: string_at(fields, &["summary"]),
            description: string_at(fields, &["description"]),
        }
    }

    /// Only Stories trigger generation (exact, case-sensitive match)
    pub fn is_story(&self) -> bool {
        self.issue_type == issue_types::STORY
    }
}

fn string_at(root: Option<&Value>, path: &[&str]) -> String {
    root.and_then(|root| path.iter().try_fold(root, |value, key| value.get(*key)))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
