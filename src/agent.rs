//! Agent — owns the conversation and runs the per-turn pipeline.
//!
//! The provider is stateless; the agent holds the turn history and supplies
//! it whole on every call. Each successful turn also feeds the thought
//! trail, the science scores, and the on-disk transcript.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::analysis::science;
use crate::analysis::thoughts::{Category, ThoughtTrail};
use crate::error::AppError;
use crate::llm::{ChatTurn, LlmProvider, TokenUsage};
use crate::session::TranscriptStore;

/// Everything the caller needs to render one completed turn.
#[derive(Debug)]
pub struct TurnReport {
    pub text: String,
    pub scores: Vec<(&'static str, f32)>,
    pub complexity: f32,
    pub elapsed: Duration,
    pub usage: Option<TokenUsage>,
}

/// Session counters for the `stats` view.
#[derive(Debug)]
pub struct SessionStats {
    pub queries: usize,
    pub mean_response_time: Option<Duration>,
    pub transcript_len: usize,
}

pub struct Agent {
    provider: LlmProvider,
    system_prompt: String,
    history: Vec<ChatTurn>,
    trail: ThoughtTrail,
    transcript: TranscriptStore,
}

impl Agent {
    pub fn new(provider: LlmProvider, system_prompt: String, transcript: TranscriptStore) -> Self {
        Self {
            provider,
            system_prompt,
            history: Vec::new(),
            trail: ThoughtTrail::new(),
            transcript,
        }
    }

    /// Open the session: send the system prompt as the first turn and record
    /// the SYSTEM thought. A failure here is fatal — without the priming
    /// turn the session has no persona.
    pub async fn prime(&mut self) -> Result<(), AppError> {
        let turns = vec![ChatTurn::user(self.system_prompt.clone())];
        let reply = self.provider.complete(&turns).await?;

        self.history.push(ChatTurn::user(self.system_prompt.clone()));
        self.history.push(ChatTurn::model(reply.text));
        self.trail.record("System initialization complete", Category::System);

        info!(provider = self.provider.name(), "session primed");
        Ok(())
    }

    /// Run one query through the full pipeline: thought recording, LLM
    /// round-trip, analysis, transcript. On provider failure only the INPUT
    /// thought remains recorded and the history is unchanged, so the next
    /// query starts from a clean slate.
    pub async fn process_query(&mut self, query: &str) -> Result<TurnReport, AppError> {
        self.trail.record(format!("Query received: {query}"), Category::Input);

        let mut turns = self.history.clone();
        turns.push(ChatTurn::user(query.to_string()));

        let started = Instant::now();
        let reply = self.provider.complete(&turns).await?;
        let elapsed = started.elapsed();

        self.history.push(ChatTurn::user(query.to_string()));
        self.history.push(ChatTurn::model(reply.text.clone()));

        let scores = science::score(&reply.text);
        let complexity = science::complexity(&reply.text);

        self.trail.record_timed(
            format!("Response generated (complexity: {complexity:.2})"),
            Category::Output,
            elapsed,
        );

        // Transcript failures degrade to a warning — the turn itself succeeded.
        if let Err(e) = self.transcript.append("user", query) {
            warn!(error = %e, "failed to log user turn");
        }
        if let Err(e) = self.transcript.append("model", &reply.text) {
            warn!(error = %e, "failed to log model turn");
        }

        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            complexity,
            history_turns = self.history.len(),
            "turn complete"
        );

        Ok(TurnReport {
            text: reply.text,
            scores,
            complexity,
            elapsed,
            usage: reply.usage,
        })
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            queries: self.trail.query_count(),
            mean_response_time: self.trail.mean_response_time(),
            transcript_len: self.transcript.len(),
        }
    }

    /// Rendered thought flow for the `viz` view.
    pub fn thought_map(&self) -> String {
        self.trail.render_flow()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Turns exchanged so far (priming included).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
