//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `NOESIS_WORK_DIR` and `NOESIS_LOG_LEVEL` env overrides.
//! The LLM API key is sourced from the environment only, never from TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// Gemini provider configuration.
/// Populated from `[llm.gemini]` in the TOML.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL — the `models/{model}:generateContent` path is appended.
    pub api_base_url: String,
    /// Model name used in the request path.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM backend configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"dummy"`, `"gemini"`).
    /// Maps to `default` in `[llm]` TOML — named `default` there to signal
    /// that other provider sections can coexist without being loaded.
    pub provider: String,
    /// Config for the Gemini provider (`[llm.gemini]`).
    pub gemini: GeminiConfig,
}

/// Session transcript configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum transcript entries before FIFO eviction.
    pub transcript_cap: usize,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub agent_name: String,
    /// Working directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    /// Path to the system prompt file (absolute, or relative to the cwd).
    pub system_prompt: PathBuf,
    pub session: SessionConfig,
    pub llm: LlmConfig,
    /// API key from `GEMINI_API_KEY` (fallback `GOOGLE_API_KEY`) env vars.
    /// Never sourced from TOML. `None` only works with the dummy provider.
    pub llm_api_key: Option<String>,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    agent: RawAgent,
    #[serde(default)]
    session: RawSession,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawAgent {
    name: String,
    work_dir: String,
    log_level: String,
    #[serde(default = "default_system_prompt")]
    system_prompt: String,
}

#[derive(Deserialize, Default)]
struct RawSession {
    transcript_cap: Option<usize>,
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGeminiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), gemini: RawGeminiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
    #[serde(default = "default_gemini_temperature")]
    temperature: f32,
    #[serde(default = "default_gemini_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            timeout_seconds: default_gemini_timeout_seconds(),
        }
    }
}

fn default_llm_provider() -> String { "gemini".to_string() }
fn default_gemini_api_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_gemini_model() -> String { "gemini-1.5-flash-8b".to_string() }
fn default_gemini_temperature() -> f32 { 0.7 }
fn default_gemini_timeout_seconds() -> u64 { 60 }
fn default_system_prompt() -> String { "prompts/system.md".to_string() }

const DEFAULT_TRANSCRIPT_CAP: usize = 500;

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let work_dir_override = env::var("NOESIS_WORK_DIR").ok();
    let log_level_override = env::var("NOESIS_LOG_LEVEL").ok();
    load_from(
        Path::new("config/default.toml"),
        work_dir_override.as_deref(),
        log_level_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    work_dir_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let a = parsed.agent;

    let work_dir_str = work_dir_override.unwrap_or(&a.work_dir).to_string();
    let work_dir = expand_home(&work_dir_str);
    let log_level = log_level_override.unwrap_or(&a.log_level).to_string();

    Ok(Config {
        agent_name: a.name,
        work_dir,
        log_level,
        system_prompt: PathBuf::from(a.system_prompt),
        session: SessionConfig {
            transcript_cap: parsed.session.transcript_cap.unwrap_or(DEFAULT_TRANSCRIPT_CAP),
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            gemini: GeminiConfig {
                api_base_url: parsed.llm.gemini.api_base_url,
                model: parsed.llm.gemini.model,
                temperature: parsed.llm.gemini.temperature,
                timeout_seconds: parsed.llm.gemini.timeout_seconds,
            },
        },
        llm_api_key: env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default(work_dir: &Path) -> Self {
        Self {
            agent_name: "test".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            system_prompt: PathBuf::from("prompts/system.md"),
            session: SessionConfig { transcript_cap: DEFAULT_TRANSCRIPT_CAP },
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0/v1beta".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
        }
    }
}
