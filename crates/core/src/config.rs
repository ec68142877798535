//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the synthesizer. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::{SynthError, SynthResult};
use std::time::Duration;

/// Default base URL for the OpenAI-compatible chat API.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default model identifier sent with every chat request.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Upper bound on a single assistant provider call.
pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a single report provider call.
pub const DEFAULT_REPORT_TIMEOUT: Duration = Duration::from_secs(12);

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_key: Option<String>,
    api_base: String,
    model: String,
    debug: bool,
    require_report_fields: bool,
    answer_timeout: Duration,
    report_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// A blank `api_key` is treated the same as an absent one: the provider path is
    /// considered unavailable and every request resolves to the deterministic fallback.
    pub fn new(
        api_key: Option<String>,
        api_base: String,
        model: String,
        debug: bool,
        require_report_fields: bool,
    ) -> SynthResult<Self> {
        if api_base.trim().is_empty() {
            return Err(SynthError::InvalidInput("api_base cannot be empty".into()));
        }
        if model.trim().is_empty() {
            return Err(SynthError::InvalidInput("model cannot be empty".into()));
        }

        let api_key = api_key.filter(|k| !k.trim().is_empty());

        Ok(Self {
            api_key,
            api_base,
            model,
            debug,
            require_report_fields,
            answer_timeout: DEFAULT_ANSWER_TIMEOUT,
            report_timeout: DEFAULT_REPORT_TIMEOUT,
        })
    }

    /// Override the per-call timeouts (used by tests and non-standard deployments).
    pub fn with_timeouts(mut self, answer_timeout: Duration, report_timeout: Duration) -> Self {
        self.answer_timeout = answer_timeout;
        self.report_timeout = report_timeout;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn require_report_fields(&self) -> bool {
        self.require_report_fields
    }

    pub fn answer_timeout(&self) -> Duration {
        self.answer_timeout
    }

    pub fn report_timeout(&self) -> Duration {
        self.report_timeout
    }
}

/// Interpret an environment variable value as a boolean flag.
///
/// Accepts `1`, `true`, `yes` and `on` (case-insensitive); everything else, including an
/// unset variable, is `false`. Takes the value rather than the variable name so the core
/// never reads the process environment itself.
pub fn flag_from_env_value(value: Option<String>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}
