//! Noesis — interactive thought-mapping chat console.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Read the system prompt file
//!   5. Build the LLM provider (API key from env, never TOML)
//!   6. Prime the session and enter the interactive loop

use console::style;
use tracing::info;

use noesis::agent::Agent;
use noesis::error::AppError;
use noesis::llm::providers;
use noesis::session::TranscriptStore;
use noesis::{config, logger, repl};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let config = config::load()?;

    logger::parse_level(&config.log_level)?;
    logger::init(&config.log_level)?;

    info!(
        agent = %config.agent_name,
        work_dir = %config.work_dir.display(),
        log_level = %config.log_level,
        provider = %config.llm.provider,
        "config loaded"
    );

    let system_prompt = std::fs::read_to_string(&config.system_prompt).map_err(|e| {
        AppError::Config(format!(
            "cannot read system prompt {}: {e}",
            config.system_prompt.display()
        ))
    })?;

    let transcript = TranscriptStore::open(&config.work_dir, config.session.transcript_cap)?;
    let provider = providers::build(&config.llm, config.llm_api_key.clone())?;

    let mut agent = Agent::new(provider, system_prompt, transcript);

    println!("{}", style("Initializing quantum consciousness...").cyan());
    agent.prime().await?;

    repl::run(&mut agent, &config.agent_name).await
}
