//! Per-turn response analyses.
//!
//! Two independent pieces: the thought trail (a chained log of per-turn
//! "thoughts" rendered as a textual flow) and the science scorer (keyword
//! frequency over a fixed vocabulary). Both are decorative — they observe
//! the conversation, they never influence it.

pub mod science;
pub mod thoughts;
