use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{app, core_config_from_env, AppState};

/// Main entry point for the Berani backend
///
/// Loads `.env`, resolves configuration from the environment once, builds the provider client
/// when a key is present, and serves the REST API. There is no other state: the provider
/// handle is read-only after this point and is torn down with the process.
///
/// # Environment Variables
/// - `BERANI_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `OPENAI_API_KEY`: Provider credential; absence means every request falls back
/// - `OPENAI_BASE_URL`: Override for the provider base URL
/// - `BERANI_MODEL`: Provider model identifier (default: "gpt-4o-mini")
/// - `BERANI_DEBUG`: Echo provider error classes in report metadata
/// - `BERANI_REQUIRE_REPORT_FIELDS`: Reject reports missing dateISO/timeISO/description
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("berani=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("BERANI_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting Berani backend on {}", addr);

    let cfg = Arc::new(core_config_from_env()?);
    if cfg.has_api_key() {
        tracing::info!(model = cfg.model(), "provider client configured");
    } else {
        tracing::warn!("no OPENAI_API_KEY set; all responses will use deterministic fallbacks");
    }

    let state = AppState::new(cfg);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
