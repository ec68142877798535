//! JSON wire types for the Berani REST API.
//!
//! Field names follow the mobile client's existing payloads (`dateISO`, `locationText`, ...),
//! so renames here are wire-compatibility constraints, not style choices.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /assistant`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AssistantRequest {
    /// Free-text question; missing or blank is tolerated and answered with a fixed prompt.
    #[serde(default)]
    pub question: String,
}

/// Body of `POST /generate_report`. No field is required for fallback generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReportRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "dateISO")]
    pub date_iso: Option<String>,
    #[serde(default, rename = "timeISO")]
    pub time_iso: Option<String>,
    #[serde(default, rename = "locationText")]
    pub location_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Diagnostic metadata attached to fallback responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssistantResponse {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub ok: bool,
    pub service: String,
    pub version: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
}

/// Response of `GET /diag`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagRes {
    pub ok: bool,
    pub has_env_key: bool,
    pub client_ready: bool,
    pub openai_lib: Option<String>,
    pub openai_error: Option<String>,
    pub version: String,
}

/// Response of `GET /diag_openai`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagOpenAiRes {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
