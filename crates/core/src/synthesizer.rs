//! Response synthesis: one provider attempt, then a deterministic fallback.
//!
//! Each public operation is a single attempt-then-fallback decision tree. The provider is
//! called at most once per request and no provider fault ever escapes this module; the
//! "catch everything, degrade gracefully" policy lives in [`ResponseSynthesizer::call_provider`]
//! and [`ResponseSynthesizer::fallback_meta`] rather than being repeated per call site.

use crate::config::CoreConfig;
use crate::fallback;
use crate::provider::{ChatMessage, ChatProvider, ProviderError};
use crate::{SynthError, SynthResult};
use api_shared::{AssistantResponse, ReportRequest, ReportResponse, ResponseMeta};
use std::sync::Arc;

const ANSWER_SYSTEM_PROMPT: &str = "You are a supportive, non-judgmental safety assistant for \
the Berani app. Be concise and give practical next steps. Avoid stereotypes and avoid \
diagnosis. If the user may be in danger, tell them to call 999 (Malaysia) first.";

const DIAG_PROMPT: &str = "reply OK";

/// Synthesizes answers and incident-report drafts, degrading to deterministic text on any
/// provider fault.
///
/// Holds the single long-lived provider handle; both fields are read-only after construction,
/// so the synthesizer is safe to share across concurrent requests.
pub struct ResponseSynthesizer {
    cfg: Arc<CoreConfig>,
    provider: Option<Arc<dyn ChatProvider>>,
}

impl ResponseSynthesizer {
    pub fn new(cfg: Arc<CoreConfig>, provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { cfg, provider }
    }

    /// Whether a provider client is configured.
    pub fn provider_ready(&self) -> bool {
        self.provider.is_some()
    }

    /// Name of the configured provider backend, if any.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_deref().map(ChatProvider::name)
    }

    /// Answer a free-text question.
    ///
    /// An empty or whitespace-only question short-circuits to a fixed prompt without touching
    /// the provider. Every provider fault resolves to the supportive fallback text; this
    /// operation never fails.
    pub async fn synthesize_answer(&self, question: &str) -> AssistantResponse {
        let question = question.trim();
        if question.is_empty() {
            return AssistantResponse {
                answer: fallback::EMPTY_QUESTION_PROMPT.into(),
                meta: None,
            };
        }

        let messages = vec![
            ChatMessage::system(ANSWER_SYSTEM_PROMPT),
            ChatMessage::user(question),
        ];

        match self.call_provider(messages, self.cfg.answer_timeout()).await {
            Ok(answer) => AssistantResponse { answer, meta: None },
            Err(err) => {
                let answer = match err {
                    // Nothing was attempted or the attempt produced nothing; the plain
                    // fallback reads better without an issue note.
                    ProviderError::Unavailable | ProviderError::EmptyOutput => {
                        fallback::ANSWER_FALLBACK.to_owned()
                    }
                    _ => fallback::answer_fallback_with_note(),
                };
                AssistantResponse {
                    answer,
                    meta: Some(self.fallback_meta(&err, true)),
                }
            }
        }
    }

    /// Draft an incident report from form data.
    ///
    /// The only caller-visible error is a missing required field, and only when the
    /// required-fields flag is enabled; provider faults always resolve to the deterministic
    /// template.
    pub async fn synthesize_report(&self, payload: &ReportRequest) -> SynthResult<ReportResponse> {
        if self.cfg.require_report_fields() {
            require_field(payload.date_iso.as_deref(), "dateISO")?;
            require_field(payload.time_iso.as_deref(), "timeISO")?;
            require_field(payload.description.as_deref(), "description")?;
        }

        let messages = vec![ChatMessage::user(report_prompt(payload))];

        match self.call_provider(messages, self.cfg.report_timeout()).await {
            Ok(report) => Ok(ReportResponse { report, meta: None }),
            Err(err) => Ok(ReportResponse {
                report: fallback::report_template(payload),
                // Error detail only reaches the caller under the debug flag.
                meta: Some(self.fallback_meta(&err, self.cfg.debug())),
            }),
        }
    }

    /// Trivial provider round-trip for the diagnostics endpoint.
    pub async fn probe_provider(&self) -> Result<String, ProviderError> {
        self.call_provider(
            vec![ChatMessage::user(DIAG_PROMPT)],
            self.cfg.answer_timeout(),
        )
        .await
    }

    /// The single provider attempt. Logs failures for operators and hands the typed error to
    /// fallback selection; no retry.
    async fn call_provider(
        &self,
        messages: Vec<ChatMessage>,
        timeout: std::time::Duration,
    ) -> Result<String, ProviderError> {
        let provider = self.provider.as_deref().ok_or(ProviderError::Unavailable)?;
        let result = provider.chat(messages, timeout).await;
        if let Err(err) = &result {
            tracing::warn!(class = err.class(), "provider call failed: {err}");
        }
        result
    }

    /// Fallback metadata selection.
    ///
    /// `no_client` is always named since it carries no internal detail; other error classes
    /// are echoed only when `expose_reason` is set.
    fn fallback_meta(&self, err: &ProviderError, expose_reason: bool) -> ResponseMeta {
        let reason = match err {
            ProviderError::Unavailable => Some(err.class().to_owned()),
            _ if expose_reason => Some(err.class().to_owned()),
            _ => None,
        };
        ResponseMeta {
            fallback: true,
            reason,
        }
    }
}

fn require_field(value: Option<&str>, name: &'static str) -> SynthResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(SynthError::MissingField(name)),
    }
}

/// Neutral drafting instruction embedding the form fields.
fn report_prompt(payload: &ReportRequest) -> String {
    let field = |v: &Option<String>| -> String {
        v.as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback::PLACEHOLDER)
            .to_owned()
    };
    format!(
        "Write a clear, empathetic incident report for an app called Berani.\n\
         \n\
         Context:\n\
         - Category: {category}\n\
         - Date: {date}\n\
         - Time: {time}\n\
         - Location: {location}\n\
         \n\
         User description:\n\
         {description}\n\
         \n\
         Requirements:\n\
         - Structure: who/what/when/where, impact, next steps.\n\
         - No speculation; keep to what the user reported.\n\
         - Supportive tone, simple language, no PII, under 220 words.",
        category = field(&payload.category),
        date = field(&payload.date_iso),
        time = field(&payload.time_iso),
        location = field(&payload.location_text),
        description = field(&payload.description),
    )
}
