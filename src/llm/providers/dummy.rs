//! Dummy LLM provider — echoes the latest user turn back prefixed with
//! `[echo]`. Used for offline runs and for testing the full agent
//! round-trip without a real API key.

use crate::llm::{ChatTurn, LlmReply, ProviderError, Role};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, turns: &[ChatTurn]) -> Result<LlmReply, ProviderError> {
        let last_user = turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.as_str())
            .unwrap_or_default();
        Ok(LlmReply { text: format!("[echo] {last_user}"), usage: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn complete_prefixes_echo() {
        let p = DummyProvider;
        let reply = p.complete(&[ChatTurn::user("hello")]).await.unwrap();
        assert_eq!(reply.text, "[echo] hello");
        assert!(reply.usage.is_none());
    }

    #[tokio::test]
    async fn echoes_latest_user_turn_not_model_turns() {
        let p = DummyProvider;
        let turns = [
            ChatTurn::user("first"),
            ChatTurn::model("[echo] first"),
            ChatTurn::user("second"),
        ];
        let reply = p.complete(&turns).await.unwrap();
        assert_eq!(reply.text, "[echo] second");
    }

    #[tokio::test]
    async fn complete_empty_history() {
        let p = DummyProvider;
        let reply = p.complete(&[]).await.unwrap();
        assert_eq!(reply.text, "[echo] ");
    }
}
