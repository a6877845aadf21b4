//! Webhook handler for incoming Jira issue events

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppResult;
use crate::generator::TestCaseGenerator;
use crate::models::{CreatedIssue, StoryEvent};
use crate::tracker::IssueTracker;

/// Webhook response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WebhookResponse {
    /// Event was not for a Story; nothing was called
    Ignored { reason: String },
    /// Test issue created
    Success { test_issue: CreatedIssue },
}

/// State needed by the webhook handler
pub struct WebhookState {
    /// Produces test-case text from a Story
    pub generator: Arc<dyn TestCaseGenerator>,
    /// Files the Test issue
    pub tracker: Arc<dyn IssueTracker>,
}

impl WebhookState {
    pub fn new(generator: Arc<dyn TestCaseGenerator>, tracker: Arc<dyn IssueTracker>) -> Self {
        Self { generator, tracker }
    }
}

/// Webhook handler
///
/// POST /jira-webhook
///
/// Non-Story events are acknowledged and ignored. For Stories the generator
/// is called first and its text handed to the tracker. A failure in either
/// call aborts the request with an error response; nothing is retried and
/// the generated text is not kept.
pub async fn webhook_handler(
    State(state): State<Arc<WebhookState>>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<WebhookResponse>)> {
    let delivery_id = Uuid::new_v4();
    let span = tracing::info_span!("webhook", %delivery_id);
    span.in_scope(|| tracing::debug!(payload = %payload, "Webhook received"));

    let event = StoryEvent::from_payload(&payload);
    let response = process_event(&state, &event).instrument(span).await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Run the Story pipeline for one event
pub async fn process_event(
    state: &WebhookState,
    event: &StoryEvent,
) -> AppResult<WebhookResponse> {
    if !event.is_story() {
        tracing::info!(
            issue_key = %event.issue_key,
            issue_type = %event.issue_type,
            "Ignoring non-Story event"
        );
        return Ok(WebhookResponse::Ignored {
            reason: "not a Story".to_string(),
        });
    }

    tracing::info!(
        issue_key = %event.issue_key,
        webhook_event = %event.webhook_event,
        "Generating test cases for Story"
    );

    let test_cases = state
        .generator
        .generate(&event.summary, &event.description)
        .await?;

    tracing::debug!(
        issue_key = %event.issue_key,
        test_cases = %test_cases,
        "Test cases generated"
    );

    let test_issue = state
        .tracker
        .create_test_issue(&event.issue_key, &test_cases)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                issue_key = %event.issue_key,
                error = %e,
                "Test issue creation failed, generated test cases dropped"
            );
        })?;

    Ok(WebhookResponse::Success { test_issue })
}
