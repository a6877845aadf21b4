//! Webhook Flow Integration Tests
//!
//! Drives `POST /jira-webhook` through the full router with stub
//! collaborators:
//! - Issue type filtering
//! - Generator then tracker orchestration
//! - Failure propagation from either collaborator

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use story_testgen::{router, WebhookState};
use tower::ServiceExt;

use crate::support::{
    body_json, post_json, story_payload, StubGenerator, StubTracker, GHERKIN,
};

fn app(generator: Arc<StubGenerator>, tracker: Arc<StubTracker>) -> axum::Router {
    router(Arc::new(WebhookState::new(generator, tracker)))
}

// =============================================================================
// FILTERING
// =============================================================================

#[tokio::test]
async fn test_non_story_is_ignored() {
    for issue_type in ["Bug", "Task", "Epic", "story", "STORY", ""] {
        let generator = StubGenerator::ok();
        let tracker = StubTracker::ok();

        let response = app(generator.clone(), tracker.clone())
            .oneshot(post_json(
                "/jira-webhook",
                &story_payload(issue_type, "PROJ-1", "Crash on save", "Steps..."),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{issue_type:?}");
        assert_eq!(
            body_json(response).await,
            json!({ "status": "ignored", "reason": "not a Story" })
        );
        assert!(generator.calls().is_empty());
        assert!(tracker.calls().is_empty());
    }
}

#[tokio::test]
async fn test_payload_without_issue_is_ignored() {
    let generator = StubGenerator::ok();
    let tracker = StubTracker::ok();

    let response = app(generator.clone(), tracker.clone())
        .oneshot(post_json("/jira-webhook", &json!({ "webhookEvent": "jira:issue_deleted" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ignored");
    assert!(generator.calls().is_empty());
    assert!(tracker.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_json_rejected_without_calls() {
    let generator = StubGenerator::ok();
    let tracker = StubTracker::ok();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/jira-webhook")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = app(generator.clone(), tracker.clone())
        .oneshot(request)
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(generator.calls().is_empty());
    assert!(tracker.calls().is_empty());
}

// =============================================================================
// ORCHESTRATION
// =============================================================================

#[tokio::test]
async fn test_story_generates_and_files_test_issue() {
    let generator = StubGenerator::ok();
    let tracker = StubTracker::ok();

    let response = app(generator.clone(), tracker.clone())
        .oneshot(post_json(
            "/jira-webhook",
            &story_payload("Story", "PROJ-42", "Login feature", "As a user..."),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        generator.calls(),
        vec![("Login feature".to_string(), "As a user...".to_string())]
    );
    assert_eq!(
        tracker.calls(),
        vec![("PROJ-42".to_string(), GHERKIN.to_string())]
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["test_issue"]["key"], "PROJ-43");
}

#[tokio::test]
async fn test_missing_summary_and_description_default_to_empty() {
    let generator = StubGenerator::ok();
    let tracker = StubTracker::ok();

    let payload = json!({
        "issue": {
            "key": "PROJ-9",
            "fields": { "issuetype": { "name": "Story" } }
        }
    });

    let response = app(generator.clone(), tracker.clone())
        .oneshot(post_json("/jira-webhook", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.calls(), vec![(String::new(), String::new())]);
    assert_eq!(tracker.calls()[0].0, "PROJ-9");
}

// =============================================================================
// FAILURE PROPAGATION
// =============================================================================

#[tokio::test]
async fn test_generator_failure_skips_tracker() {
    let generator = StubGenerator::failing();
    let tracker = StubTracker::ok();

    let response = app(generator.clone(), tracker.clone())
        .oneshot(post_json(
            "/jira-webhook",
            &story_payload("Story", "PROJ-42", "Login feature", "As a user..."),
        ))
        .await
        .unwrap();

    assert!(response.status().is_server_error());
    assert_eq!(generator.calls().len(), 1);
    assert!(tracker.calls().is_empty());

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["reason"], "generation_failed");
}

#[tokio::test]
async fn test_tracker_rejection_is_not_swallowed() {
    let generator = StubGenerator::ok();
    let tracker = StubTracker::failing(400);

    let response = app(generator.clone(), tracker.clone())
        .oneshot(post_json(
            "/jira-webhook",
            &story_payload("Story", "PROJ-42", "Login feature", "As a user..."),
        ))
        .await
        .unwrap();

    assert!(response.status().is_server_error());
    assert_eq!(tracker.calls().len(), 1);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["reason"], "tracker_failed");
    assert!(body["details"].as_str().unwrap().contains("400"));
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = app(StubGenerator::ok(), StubTracker::ok())
        .oneshot(
            axum::http::Request::builder()
                .uri("/health")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
