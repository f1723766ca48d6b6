//! Thought trail — a chained log of per-turn thoughts.
//!
//! Every recorded thought becomes a node linked to its predecessor, so the
//! whole session forms one insertion-ordered chain. A sliding window of the
//! most recent nodes drives the rendered flow; the full chain is retained
//! for session statistics.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Number of nodes shown in the rendered flow.
const WINDOW_CAP: usize = 10;

/// What kind of event a thought records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    System,
    Input,
    Output,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::System => "SYSTEM",
            Category::Input => "INPUT",
            Category::Output => "OUTPUT",
        };
        f.write_str(s)
    }
}

/// One node in the chain.
///
/// `seq` is a monotonically increasing id — the edge to the previous node
/// is implicit in the ordering, no adjacency storage is needed for a chain
/// that never branches.
#[derive(Debug, Clone)]
pub struct ThoughtNode {
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub text: String,
    pub category: Category,
    /// Round-trip time for the turn this thought concludes, if any.
    pub elapsed: Option<Duration>,
}

/// The session's thought chain plus the render window.
#[derive(Debug, Default)]
pub struct ThoughtTrail {
    nodes: Vec<ThoughtNode>,
    window: VecDeque<u64>,
    next_seq: u64,
}

impl ThoughtTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a thought and return its sequence id.
    pub fn record(&mut self, text: impl Into<String>, category: Category) -> u64 {
        self.push(text.into(), category, None)
    }

    /// Append a thought carrying the measured round-trip time.
    pub fn record_timed(
        &mut self,
        text: impl Into<String>,
        category: Category,
        elapsed: Duration,
    ) -> u64 {
        self.push(text.into(), category, Some(elapsed))
    }

    fn push(&mut self, text: String, category: Category, elapsed: Option<Duration>) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.nodes.push(ThoughtNode { seq, at: Utc::now(), text, category, elapsed });
        self.window.push_back(seq);
        while self.window.len() > WINDOW_CAP {
            self.window.pop_front();
        }
        seq
    }

    /// Render the windowed flow: one `[CATEGORY] text` entry per node,
    /// chained with `└─>` connectors.
    pub fn render_flow(&self) -> String {
        if self.nodes.is_empty() {
            return "No thoughts processed yet.".to_string();
        }
        self.window
            .iter()
            .filter_map(|seq| self.nodes.iter().find(|n| n.seq == *seq))
            .map(|n| format!("[{}] {}", n.category, n.text))
            .collect::<Vec<_>>()
            .join("\n└─> ")
    }

    /// Total thoughts over the whole chain (not just the window).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Queries received over the whole chain.
    pub fn query_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.category == Category::Input).count()
    }

    /// Mean of all recorded round-trip times. `None` when nothing has been
    /// timed yet.
    pub fn mean_response_time(&self) -> Option<Duration> {
        let timed: Vec<Duration> = self.nodes.iter().filter_map(|n| n.elapsed).collect();
        if timed.is_empty() {
            return None;
        }
        let total: Duration = timed.iter().sum();
        Some(total / timed.len() as u32)
    }
}
