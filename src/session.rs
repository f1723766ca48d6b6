//! Session transcript — capped, turn-ordered, on-disk chat log.
//!
//! One file per work dir: `transcript.md`, Markdown with
//! `### {role} — {timestamp}` delimiters, capped by entry count
//! (FIFO — oldest entries dropped first).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::AppError;

const TRANSCRIPT_FILENAME: &str = "transcript.md";

/// One logged turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: String,
    pub timestamp: String,
    pub content: String,
}

/// Handle on the transcript file under a work dir.
pub struct TranscriptStore {
    dir: PathBuf,
    cap: usize,
}

impl TranscriptStore {
    /// Open (creating if needed) the transcript under `dir`.
    pub fn open(dir: &Path, cap: usize) -> Result<Self, AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::Session(format!("cannot create {}: {e}", dir.display())))?;
        Ok(Self { dir: dir.to_path_buf(), cap })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(TRANSCRIPT_FILENAME)
    }

    /// Append one entry, evicting the oldest past the cap.
    pub fn append(&self, role: &str, content: &str) -> Result<(), AppError> {
        let path = self.path();

        // Read, parse, append, cap, write-back.
        let existing = fs::read_to_string(&path).unwrap_or_default();
        let mut entries = parse_transcript(&existing);

        entries.push(TranscriptEntry {
            role: role.to_string(),
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            content: content.to_string(),
        });

        // FIFO cap: drop oldest.
        while entries.len() > self.cap {
            entries.remove(0);
        }

        fs::write(&path, serialise_transcript(&entries))
            .map_err(|e| AppError::Session(format!("cannot write {}: {e}", path.display())))
    }

    /// The last `n` entries, oldest first. Missing file reads as empty.
    pub fn read_last(&self, n: usize) -> Result<Vec<TranscriptEntry>, AppError> {
        let text = fs::read_to_string(self.path()).unwrap_or_default();
        let entries = parse_transcript(&text);
        let start = entries.len().saturating_sub(n);
        Ok(entries[start..].to_vec())
    }

    /// Current number of stored entries.
    pub fn len(&self) -> usize {
        let text = fs::read_to_string(self.path()).unwrap_or_default();
        parse_transcript(&text).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse transcript.md into entries by splitting on `### ` headers.
fn parse_transcript(text: &str) -> Vec<TranscriptEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(String, String, Vec<String>)> = None;

    for line in text.lines() {
        if let Some(header) = line.strip_prefix("### ") {
            // Flush previous entry.
            if let Some((role, ts, lines)) = current.take() {
                entries.push(TranscriptEntry {
                    role,
                    timestamp: ts,
                    content: lines.join("\n").trim().to_string(),
                });
            }
            // Parse "role — timestamp"
            let (role, ts) = if let Some((r, t)) = header.split_once(" — ") {
                (r.trim().to_string(), t.trim().to_string())
            } else {
                (header.to_string(), String::new())
            };
            current = Some((role, ts, Vec::new()));
        } else if let Some((_, _, ref mut lines)) = current {
            lines.push(line.to_string());
        }
    }
    // Flush last entry.
    if let Some((role, ts, lines)) = current {
        entries.push(TranscriptEntry {
            role,
            timestamp: ts,
            content: lines.join("\n").trim().to_string(),
        });
    }
    entries
}

/// Serialise entries back to Markdown.
fn serialise_transcript(entries: &[TranscriptEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        out.push_str(&format!("### {} — {}\n\n{}\n\n", e.role, e.timestamp, e.content));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(cap: usize) -> (TempDir, TranscriptStore) {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::open(dir.path(), cap).unwrap();
        (dir, store)
    }

    #[test]
    fn append_and_read() {
        let (_dir, store) = setup(10);

        store.append("user", "hello").unwrap();
        store.append("model", "hi there").unwrap();

        let entries = store.read_last(10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, "user");
        assert_eq!(entries[0].content, "hello");
        assert_eq!(entries[1].role, "model");
        assert_eq!(entries[1].content, "hi there");
    }

    #[test]
    fn fifo_cap_drops_oldest() {
        let (_dir, store) = setup(3);

        for i in 0..5 {
            store.append("user", &format!("msg{i}")).unwrap();
        }

        let entries = store.read_last(10).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].content, "msg2");
        assert_eq!(entries[2].content, "msg4");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn read_last_n_takes_the_tail() {
        let (_dir, store) = setup(10);

        store.append("user", "a").unwrap();
        store.append("model", "b").unwrap();
        store.append("user", "c").unwrap();

        let entries = store.read_last(2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "b");
        assert_eq!(entries[1].content, "c");
    }

    #[test]
    fn missing_file_reads_empty() {
        let (_dir, store) = setup(10);
        assert!(store.read_last(5).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn multiline_content_round_trips() {
        let (_dir, store) = setup(10);
        store.append("model", "line one\n\nline three").unwrap();
        let entries = store.read_last(1).unwrap();
        assert_eq!(entries[0].content, "line one\n\nline three");
    }

    #[test]
    fn timestamps_look_iso8601() {
        let (_dir, store) = setup(10);
        store.append("user", "x").unwrap();
        let ts = &store.read_last(1).unwrap()[0].timestamp;
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[10..11], "T");
    }
}
