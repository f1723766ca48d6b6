//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities — clone them freely.
//! Async is delegated to the underlying provider; the `complete` method is
//! `async fn` on the enum so callers need no trait-object machinery.
//!
//! Providers are stateless: the full turn history is supplied on every call.
//! Conversation state lives in the agent.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider misconfigured: {0}")]
    Config(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Turn types ────────────────────────────────────────────────────────────────

/// Who produced a turn. Role names follow the Gemini wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One conversation turn, as supplied to the provider.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: Role::Model, text: text.into() }
    }
}

/// Token accounting reported by the backend, when available.
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A completed round-trip: the reply text plus optional usage data.
#[derive(Debug, Clone)]
pub struct LlmReply {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini(providers::gemini::GeminiProvider),
    Dummy(providers::dummy::DummyProvider),
}

impl LlmProvider {
    /// Send the conversation (ending with the latest user turn) and return
    /// the model's reply.
    pub async fn complete(&self, turns: &[ChatTurn]) -> Result<LlmReply, ProviderError> {
        match self {
            LlmProvider::Gemini(p) => p.complete(turns).await,
            LlmProvider::Dummy(p) => p.complete(turns).await,
        }
    }

    /// Human-readable backend name for banners and logs.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Gemini(_) => "gemini",
            LlmProvider::Dummy(_) => "dummy",
        }
    }
}
