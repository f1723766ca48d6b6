//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory — called at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod gemini;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `GEMINI_API_KEY` / `GOOGLE_API_KEY` env
/// (never TOML). The gemini backend refuses to build without one.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "gemini" => {
            let g = &config.gemini;
            let key = api_key.ok_or_else(|| {
                ProviderError::Config(
                    "gemini provider requires GEMINI_API_KEY (or GOOGLE_API_KEY) to be set".into(),
                )
            })?;
            let p = gemini::GeminiProvider::new(
                g.api_base_url.clone(),
                g.model.clone(),
                g.temperature,
                g.timeout_seconds,
                key,
            )?;
            Ok(LlmProvider::Gemini(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}
