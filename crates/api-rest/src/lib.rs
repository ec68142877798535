//! # API REST
//!
//! REST API implementation for the Berani backend.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, legacy path aliases)
//!
//! Uses `api-shared` for wire types and `berani-core` for response synthesis.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AssistantRequest, AssistantResponse, DiagOpenAiRes, DiagRes, HealthRes, HealthService,
    ReportRequest, ReportResponse, ResponseMeta, RootRes,
};
use berani_core::{ChatProvider, CoreConfig, OpenAiProvider, ResponseSynthesizer, SynthError};

pub const SERVICE_NAME: &str = "berani-backend";

/// Legacy client paths answered by the canonical `POST /assistant` handler.
const ASSISTANT_ALIASES: &[&str] = &[
    "/chat",
    "/api/chat",
    "/v1/chat",
    "/messages",
    "/api/messages",
    "/respond",
];

/// Legacy client paths answered by the canonical `POST /generate_report` handler.
const REPORT_ALIASES: &[&str] = &[
    "/report",
    "/api/report",
    "/v1/report",
    "/generate",
    "/api/generate",
];

/// Application state shared across REST API handlers
///
/// Holds the startup configuration and the synthesizer with its single long-lived provider
/// handle; everything here is read-only after construction.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    synthesizer: Arc<ResponseSynthesizer>,
}

impl AppState {
    /// Build state from configuration, constructing the OpenAI client when a key is present.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let provider = cfg.api_key().map(|key| {
            Arc::new(OpenAiProvider::new(
                key.to_owned(),
                cfg.api_base().to_owned(),
                cfg.model().to_owned(),
            )) as Arc<dyn ChatProvider>
        });
        Self::with_provider(cfg, provider)
    }

    /// Build state with an explicit provider handle (or none). Used by tests to inject
    /// scripted providers.
    pub fn with_provider(cfg: Arc<CoreConfig>, provider: Option<Arc<dyn ChatProvider>>) -> Self {
        let synthesizer = Arc::new(ResponseSynthesizer::new(cfg.clone(), provider));
        Self { cfg, synthesizer }
    }
}

/// Resolve core configuration from the process environment.
///
/// Called once at startup by the server binaries; `berani-core` itself never reads
/// environment variables.
pub fn core_config_from_env() -> berani_core::SynthResult<CoreConfig> {
    use berani_core::config::{flag_from_env_value, DEFAULT_API_BASE, DEFAULT_MODEL};

    CoreConfig::new(
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.into()),
        std::env::var("BERANI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        flag_from_env_value(std::env::var("BERANI_DEBUG").ok()),
        flag_from_env_value(std::env::var("BERANI_REQUIRE_REPORT_FIELDS").ok()),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(root, health, diag, diag_openai, assistant, generate_report),
    components(schemas(
        RootRes,
        HealthRes,
        DiagRes,
        DiagOpenAiRes,
        AssistantRequest,
        AssistantResponse,
        ReportRequest,
        ReportResponse,
        ResponseMeta,
    ))
)]
struct ApiDoc;

/// Build the REST router.
///
/// One canonical route per operation; legacy paths are registered from the alias tables so
/// compatibility lives in routing configuration rather than duplicated handlers.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/diag", get(diag))
        .route("/diag_openai", get(diag_openai))
        .route("/assistant", post(assistant))
        .route("/generate_report", post(generate_report));

    for path in ASSISTANT_ALIASES {
        router = router.route(path, post(assistant));
    }
    for path in REPORT_ALIASES {
        router = router.route(path, post(generate_report));
    }

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service identity", body = RootRes)
    )
)]
/// Service identity endpoint
///
/// Returns the service name and version so deployed revisions can be told apart.
#[axum::debug_handler]
async fn root(State(_state): State<AppState>) -> Json<RootRes> {
    Json(RootRes {
        ok: true,
        service: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/diag",
    responses(
        (status = 200, description = "Configuration diagnostics", body = DiagRes)
    )
)]
/// Configuration diagnostics
///
/// Reports whether an API key was seen in the environment and whether the provider client is
/// ready, without making any outbound call. `openai_lib` and `openai_error` are kept for wire
/// compatibility with older clients of this endpoint.
#[axum::debug_handler]
async fn diag(State(state): State<AppState>) -> Json<DiagRes> {
    Json(DiagRes {
        ok: true,
        has_env_key: state.cfg.has_api_key(),
        client_ready: state.synthesizer.provider_ready(),
        openai_lib: state.synthesizer.provider_name().map(str::to_owned),
        openai_error: None,
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

#[utoipa::path(
    get,
    path = "/diag_openai",
    responses(
        (status = 200, description = "Provider round-trip result", body = DiagOpenAiRes)
    )
)]
/// Provider round-trip diagnostics
///
/// Attempts a trivial provider call ("reply OK"). Always answers 200; failures are reported
/// in the body rather than raised.
#[axum::debug_handler]
async fn diag_openai(State(state): State<AppState>) -> Json<DiagOpenAiRes> {
    match state.synthesizer.probe_provider().await {
        Ok(reply) => Json(DiagOpenAiRes {
            ok: true,
            reply: Some(reply),
            error: None,
        }),
        Err(err) => Json(DiagOpenAiRes {
            ok: false,
            reply: None,
            error: Some(err.to_string()),
        }),
    }
}

#[utoipa::path(
    post,
    path = "/assistant",
    request_body = AssistantRequest,
    responses(
        (status = 200, description = "Answer or fallback text", body = AssistantResponse)
    )
)]
/// Answer a free-text question
///
/// A missing or malformed body is treated as an empty question rather than rejected; provider
/// faults degrade to fallback text, so this endpoint always answers 200.
#[axum::debug_handler]
async fn assistant(
    State(state): State<AppState>,
    body: Option<Json<AssistantRequest>>,
) -> Json<AssistantResponse> {
    let Json(req) = body.unwrap_or_default();
    Json(state.synthesizer.synthesize_answer(&req.question).await)
}

#[utoipa::path(
    post,
    path = "/generate_report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Report draft or deterministic template", body = ReportResponse),
        (status = 400, description = "Missing required field")
    )
)]
/// Draft an incident report
///
/// Provider faults degrade to the deterministic template. The only client error is a missing
/// required field, and only when required-field validation is enabled in configuration.
#[axum::debug_handler]
async fn generate_report(
    State(state): State<AppState>,
    body: Option<Json<ReportRequest>>,
) -> Result<Json<ReportResponse>, (StatusCode, String)> {
    let Json(req) = body.unwrap_or_default();
    match state.synthesizer.synthesize_report(&req).await {
        Ok(resp) => Ok(Json(resp)),
        Err(err @ SynthError::MissingField(_)) => {
            tracing::warn!("report validation failed: {err}");
            Err((StatusCode::BAD_REQUEST, err.to_string()))
        }
        Err(err) => {
            tracing::error!("report synthesis error: {err:?}");
            Err((StatusCode::BAD_REQUEST, err.to_string()))
        }
    }
}
