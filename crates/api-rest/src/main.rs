//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). Deployments normally run the workspace's main `berani-run`
//! binary, which adds dotenv loading.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, core_config_from_env, AppState};

/// Main entry point for the Berani REST API server
///
/// Starts the REST API server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `BERANI_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `OPENAI_API_KEY`: Provider credential; absence means every request falls back
/// - `OPENAI_BASE_URL`: Override for the provider base URL
/// - `BERANI_MODEL`: Provider model identifier
/// - `BERANI_DEBUG`: Echo provider error classes in report metadata
/// - `BERANI_REQUIRE_REPORT_FIELDS`: Reject reports missing dateISO/timeISO/description
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("BERANI_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting Berani REST API on {}", addr);

    let cfg = Arc::new(core_config_from_env()?);
    if !cfg.has_api_key() {
        tracing::warn!("no OPENAI_API_KEY set; all responses will use deterministic fallbacks");
    }

    let state = AppState::new(cfg);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
