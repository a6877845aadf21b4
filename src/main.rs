//! Story Test-Case Generator - Jira webhook to Gherkin test issues
//!
//! This is the main entry point for the service.
//! It wires the generator and tracker clients into the Axum router.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use story_testgen::{bind, router, AppConfig, JiraClient, OpenAiGenerator, WebhookState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::load_validated()?;

    init_tracing(config.server.debug);

    tracing::info!("Starting story-testgen v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.openai.model,
        jira_base_url = %config.jira.base_url,
        project_key = %config.jira.project_key,
        "Configuration loaded"
    );

    let generator = Arc::new(OpenAiGenerator::new(&config.openai)?);
    let tracker = Arc::new(JiraClient::new(&config.jira)?);
    tracing::info!(
        generator = %generator.endpoint(),
        tracker = %tracker.endpoint(),
        "Clients initialized"
    );

    let app = router(Arc::new(WebhookState::new(generator, tracker)));

    let listener = bind(&config.server).await?;
    tracing::info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "story_testgen=debug,tower_http=debug"
    } else {
        "story_testgen=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}
