//! End-to-end turn flow on the dummy provider — no network, no API key.

use noesis::agent::Agent;
use noesis::llm::LlmProvider;
use noesis::llm::providers::dummy::DummyProvider;
use noesis::session::TranscriptStore;
use tempfile::TempDir;

const SYSTEM_PROMPT: &str = "You are a reasoning agent. Acknowledge and wait.";

fn build_agent(dir: &TempDir) -> Agent {
    let transcript = TranscriptStore::open(dir.path(), 100).unwrap();
    Agent::new(LlmProvider::Dummy(DummyProvider), SYSTEM_PROMPT.to_string(), transcript)
}

#[tokio::test]
async fn fresh_agent_has_no_thoughts() {
    let dir = TempDir::new().unwrap();
    let agent = build_agent(&dir);

    assert_eq!(agent.thought_map(), "No thoughts processed yet.");
    assert_eq!(agent.stats().queries, 0);
    assert_eq!(agent.history_len(), 0);
}

#[tokio::test]
async fn priming_opens_the_session() {
    let dir = TempDir::new().unwrap();
    let mut agent = build_agent(&dir);

    agent.prime().await.unwrap();

    // Priming exchanges the system prompt and the acknowledgement.
    assert_eq!(agent.history_len(), 2);
    assert!(agent.thought_map().starts_with("[SYSTEM] System initialization complete"));
    // Priming is not a query and is not logged to the transcript.
    assert_eq!(agent.stats().queries, 0);
    assert_eq!(agent.stats().transcript_len, 0);
}

#[tokio::test]
async fn turn_report_carries_text_scores_and_timing() {
    let dir = TempDir::new().unwrap();
    let mut agent = build_agent(&dir);
    agent.prime().await.unwrap();

    let report = agent
        .process_query("explain entanglement and superposition")
        .await
        .unwrap();

    assert_eq!(report.text, "[echo] explain entanglement and superposition");
    assert_eq!(report.scores.len(), 4);
    let quantum = report.scores.iter().find(|(c, _)| *c == "quantum").unwrap().1;
    assert!((quantum - 2.0 / 3.0).abs() < f32::EPSILON);
    assert!(report.complexity > 0.0 && report.complexity <= 1.0);
    assert!(report.usage.is_none());
}

#[tokio::test]
async fn thought_flow_grows_turn_by_turn() {
    let dir = TempDir::new().unwrap();
    let mut agent = build_agent(&dir);
    agent.prime().await.unwrap();

    agent.process_query("first question").await.unwrap();
    agent.process_query("second question").await.unwrap();

    let map = agent.thought_map();
    let expected_order = [
        "[SYSTEM] System initialization complete",
        "[INPUT] Query received: first question",
        "[OUTPUT] Response generated",
        "[INPUT] Query received: second question",
        "[OUTPUT] Response generated",
    ];
    let mut cursor = 0;
    for marker in expected_order {
        let found = map[cursor..].find(marker).unwrap_or_else(|| panic!("missing '{marker}'"));
        cursor += found + marker.len();
    }
    assert_eq!(map.matches("└─>").count(), 4);
}

#[tokio::test]
async fn transcript_persists_turns_in_order() {
    let dir = TempDir::new().unwrap();
    let mut agent = build_agent(&dir);
    agent.prime().await.unwrap();

    agent.process_query("hello").await.unwrap();

    let transcript = TranscriptStore::open(dir.path(), 100).unwrap();
    let entries = transcript.read_last(10).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].role, "user");
    assert_eq!(entries[0].content, "hello");
    assert_eq!(entries[1].role, "model");
    assert_eq!(entries[1].content, "[echo] hello");
}

#[tokio::test]
async fn stats_reflect_session_activity() {
    let dir = TempDir::new().unwrap();
    let mut agent = build_agent(&dir);
    agent.prime().await.unwrap();

    for q in ["a", "b", "c"] {
        agent.process_query(q).await.unwrap();
    }

    let stats = agent.stats();
    assert_eq!(stats.queries, 3);
    assert_eq!(stats.transcript_len, 6);
    assert!(stats.mean_response_time.is_some());
}
