//! Terminal rendering — panels, tables, and the request spinner.
//!
//! Box-drawing output with ANSI styling via the `console` crate. Styled
//! widths are measured with [`measure_text_width`] so borders stay aligned
//! regardless of the escape codes inside.

use std::time::Duration;

use console::{Term, measure_text_width, style};

/// Widest interior a panel or table will grow to before wrapping.
const MAX_INTERIOR: usize = 76;

// ── Panels ────────────────────────────────────────────────────────────────────

/// Bordered panel with a styled title and a markdown-styled body.
pub fn panel(title: &str, body: &str) -> String {
    let lines = markdown_lines(body);
    frame(title, &lines)
}

/// Startup banner — a panel with plain (pre-styled) lines.
pub fn banner(title: &str, lines: &[String]) -> String {
    frame(title, lines)
}

fn frame(title: &str, lines: &[String]) -> String {
    let styled_title = style(title).cyan().bold().to_string();
    let interior = lines
        .iter()
        .map(|l| measure_text_width(l))
        .chain(std::iter::once(measure_text_width(&styled_title) + 2))
        .max()
        .unwrap_or(0)
        .min(MAX_INTERIOR);

    let mut out = String::new();
    let title_width = measure_text_width(&styled_title);
    let tail = interior.saturating_sub(title_width + 1);
    out.push_str(&format!("┌─ {} {}┐\n", styled_title, "─".repeat(tail)));
    for line in lines {
        let pad = interior.saturating_sub(measure_text_width(line));
        out.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("└{}┘", "─".repeat(interior + 2)));
    out
}

// ── Tables ────────────────────────────────────────────────────────────────────

/// Two-column table with a title row and aligned separators. The left
/// column renders cyan, the right magenta.
pub fn table(title: &str, headers: (&str, &str), rows: &[(String, String)]) -> String {
    let left_width = rows
        .iter()
        .map(|(l, _)| l.len())
        .chain(std::iter::once(headers.0.len()))
        .max()
        .unwrap_or(0);
    let right_width = rows
        .iter()
        .map(|(_, r)| r.len())
        .chain(std::iter::once(headers.1.len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("  {}\n", style(title).bold()));
    out.push_str(&format!(
        "┌─{}─┬─{}─┐\n",
        "─".repeat(left_width),
        "─".repeat(right_width)
    ));
    out.push_str(&format!(
        "│ {:<lw$} │ {:<rw$} │\n",
        headers.0,
        headers.1,
        lw = left_width,
        rw = right_width
    ));
    out.push_str(&format!(
        "├─{}─┼─{}─┤\n",
        "─".repeat(left_width),
        "─".repeat(right_width)
    ));
    for (l, r) in rows {
        let lpad = " ".repeat(left_width - l.len());
        let rpad = " ".repeat(right_width - r.len());
        out.push_str(&format!(
            "│ {}{} │ {}{} │\n",
            style(l).cyan(),
            lpad,
            style(r).magenta(),
            rpad
        ));
    }
    out.push_str(&format!(
        "└─{}─┴─{}─┘",
        "─".repeat(left_width),
        "─".repeat(right_width)
    ));
    out
}

// ── Markdown styling ──────────────────────────────────────────────────────────

/// Minimal markdown styling: `#` headers bold, fenced code dimmed,
/// `inline code` yellow. Prose lines wrap at the panel width.
fn markdown_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut in_fence = false;
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            out.push(style(line).dim().to_string());
            continue;
        }
        if in_fence {
            out.push(style(line).dim().to_string());
        } else if line.starts_with('#') {
            let heading = line.trim_start_matches('#').trim_start();
            out.push(style(heading).bold().to_string());
        } else {
            for wrapped in wrap(line, MAX_INTERIOR) {
                out.push(style_inline_code(&wrapped));
            }
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn style_inline_code(line: &str) -> String {
    let mut out = String::new();
    let mut rest = line;
    // Pairs of backticks become yellow spans; an unmatched backtick passes through.
    while let Some(open) = rest.find('`') {
        let (before, after_open) = rest.split_at(open);
        out.push_str(before);
        match after_open[1..].find('`') {
            Some(close) => {
                let code = &after_open[1..1 + close];
                out.push_str(&style(code).yellow().to_string());
                rest = &after_open[close + 2..];
            }
            None => {
                out.push_str(after_open);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Word-wrap a plain line to `width` columns. Words longer than the width
/// get a line of their own.
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.len() <= width {
        return vec![line.to_string()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

// ── Spinner ───────────────────────────────────────────────────────────────────

/// Braille-frame spinner shown while a request is in flight.
///
/// Animates on stderr only when attached to a TTY; silent otherwise. The
/// animation task is aborted and the line cleared on [`stop`](Self::stop)
/// or drop.
pub struct Spinner {
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    const FRAMES: [&'static str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub fn start(label: &str) -> Self {
        let term = Term::stderr();
        if !term.is_term() {
            return Self { handle: None };
        }
        let label = label.to_string();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            let mut i = 0usize;
            loop {
                interval.tick().await;
                let frame = style(Self::FRAMES[i % Self::FRAMES.len()]).cyan();
                let _ = term.write_str(&format!("\r{frame} {label}"));
                i += 1;
            }
        });
        Self { handle: Some(handle) }
    }

    pub fn stop(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = Term::stderr().clear_line();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_borders_align() {
        let p = panel("Response", "short body");
        let lines: Vec<&str> = p.lines().collect();
        assert!(lines[0].starts_with("┌─"));
        assert!(lines[0].ends_with('┐'));
        assert!(lines.last().unwrap().starts_with('└'));
        // Every rendered line is the same display width.
        let widths: Vec<usize> = lines.iter().map(|l| measure_text_width(l)).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "uneven widths: {widths:?}");
    }

    #[test]
    fn panel_contains_body_and_title() {
        let p = panel("Thought Process Map", "[SYSTEM] ok");
        assert!(console::strip_ansi_codes(&p).contains("Thought Process Map"));
        assert!(console::strip_ansi_codes(&p).contains("[SYSTEM] ok"));
    }

    #[test]
    fn table_renders_all_rows_aligned() {
        let rows = vec![
            ("quantum".to_string(), "0.67".to_string()),
            ("thermo".to_string(), "0.00".to_string()),
        ];
        let t = table("Scientific Principle Analysis", ("Principle", "Application Score"), &rows);
        let plain = console::strip_ansi_codes(&t).to_string();
        assert!(plain.contains("quantum"));
        assert!(plain.contains("0.67"));
        assert!(plain.contains("Principle"));
        let widths: Vec<usize> = plain
            .lines()
            .skip(1) // title line is unboxed
            .map(measure_text_width)
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "uneven widths: {widths:?}");
    }

    #[test]
    fn markdown_headers_and_fences_style() {
        let lines = markdown_lines("# Title\n```\ncode\n```\nplain");
        let plain: Vec<String> = lines
            .iter()
            .map(|l| console::strip_ansi_codes(l).to_string())
            .collect();
        assert_eq!(plain[0], "Title");
        assert_eq!(plain[2], "code");
        assert_eq!(plain[4], "plain");
    }

    #[test]
    fn inline_code_spans_survive_stripping() {
        let styled = style_inline_code("use `cargo` here");
        assert_eq!(console::strip_ansi_codes(&styled), "use `cargo` here".replace('`', ""));
    }

    #[test]
    fn unmatched_backtick_passes_through() {
        let styled = style_inline_code("a ` b");
        assert_eq!(console::strip_ansi_codes(&styled), "a ` b");
    }

    #[test]
    fn wrap_respects_width() {
        let wrapped = wrap(&"word ".repeat(40), 20);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.len() <= 20));
    }

    #[test]
    fn wrap_short_line_untouched() {
        assert_eq!(wrap("short", 20), vec!["short".to_string()]);
    }
}
