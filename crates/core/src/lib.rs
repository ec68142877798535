//! # Berani Core
//!
//! Core response-synthesis logic for the Berani safety backend.
//!
//! This crate contains pure business logic:
//! - Answer and report synthesis with attempt-then-fallback semantics
//! - The chat-completion provider interface and its OpenAI-compatible client
//! - Deterministic fallback templates
//!
//! **No API concerns**: HTTP routing, CORS, and OpenAPI documentation belong in `api-rest`;
//! wire types live in `api-shared`.

pub mod config;
pub mod error;
pub mod fallback;
pub mod provider;
pub mod synthesizer;

pub use config::CoreConfig;
pub use error::{SynthError, SynthResult};
pub use provider::{ChatMessage, ChatProvider, OpenAiProvider, ProviderError};
pub use synthesizer::ResponseSynthesizer;
