// src/report.rs
// =============================================================================
// This module turns probe outcomes into the report the user reads.
//
// Two formats:
// - Text: one [OK]/[BROKEN] line per link, then a summary block
// - JSON: { "results": [...], "summary": {...} } for scripts and CI
//
// Colors come from a small Style value that is passed around, not from any
// global switch. A style with color off gives the exact same text minus the
// escape codes, which is also what the tests compare against.
//
// Rust concepts:
// - Generics: write_report works with any io::Write (stdout, a Vec<u8>, ...)
// - Copy types: Style and Tone are tiny, so we pass them by value
// - serde: #[derive(Serialize)] gives us the JSON form for free
// =============================================================================

use crate::checker::ProbeOutcome;
use anyhow::Result;
use serde::Serialize;
use std::io::{IsTerminal, Write};

// A color we can paint text with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Yellow,
    Blue,
    Dim,
}

impl Tone {
    fn ansi_code(self) -> &'static str {
        match self {
            Tone::Green => "32",
            Tone::Red => "31",
            Tone::Yellow => "33",
            Tone::Blue => "34",
            Tone::Dim => "2",
        }
    }
}

// Decides whether text gets ANSI color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn new(color: bool) -> Self {
        Style { color }
    }

    // Picks a style for stdout
    pub fn for_stdout(no_color: bool) -> Self {
        Style::detect(no_color, std::io::stdout().is_terminal())
    }

    // Color is used only when the user didn't pass --no-color and the output
    // is a terminal, not a pipe or file. Nothing is read from the environment.
    fn detect(no_color: bool, is_terminal: bool) -> Self {
        Style::new(!no_color && is_terminal)
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", tone.ansi_code(), text)
        } else {
            text.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub style: Style,
}

// Aggregate counts, always computed from the outcomes (never stored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ok: usize,
    pub broken: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[ProbeOutcome]) -> Self {
        let ok = outcomes.iter().filter(|o| o.succeeded()).count();
        RunSummary {
            ok,
            broken: outcomes.len() - ok,
            total: outcomes.len(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ProbeOutcome],
    summary: RunSummary,
}

// Writes the full report for a run
//
// Parameters:
//   out: where to write (the binary passes stdout)
//   outcomes: one outcome per unique link, in extraction order
//   options: text or JSON, colored or plain
//
// Lines come out in the same order as `outcomes`.
pub fn write_report<W: Write>(
    out: &mut W,
    outcomes: &[ProbeOutcome],
    options: &ReportOptions,
) -> Result<()> {
    match options.format {
        ReportFormat::Text => write_text(out, outcomes, options.style),
        ReportFormat::Json => write_json(out, outcomes),
    }
}

fn write_text<W: Write>(out: &mut W, outcomes: &[ProbeOutcome], style: Style) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Results ---")?;

    for outcome in outcomes {
        writeln!(out, "{}", format_outcome_line(outcome, style))?;
    }

    let summary = RunSummary::from_outcomes(outcomes);

    writeln!(out)?;
    writeln!(out, "--- Summary ---")?;
    writeln!(
        out,
        "{}",
        style.paint(&format!("Working links: {}", summary.ok), Tone::Green)
    )?;
    writeln!(
        out,
        "{}",
        style.paint(&format!("Broken links: {}", summary.broken), Tone::Red)
    )?;
    writeln!(out, "Total unique links checked: {}", summary.total)?;

    Ok(())
}

fn write_json<W: Write>(out: &mut W, outcomes: &[ProbeOutcome]) -> Result<()> {
    let report = JsonReport {
        results: outcomes,
        summary: RunSummary::from_outcomes(outcomes),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// Formats one result line
//
// Examples (plain style):
//   [OK] (200) - https://www.rust-lang.org
//   [BROKEN] (404 Not Found) - https://example.com/missing
//   [BROKEN] (0 dns error) - https://no-such-host.invalid
pub fn format_outcome_line(outcome: &ProbeOutcome, style: Style) -> String {
    if outcome.succeeded() {
        format!(
            "{} {} - {}",
            style.paint("[OK]", Tone::Green),
            style.paint(&format!("({})", outcome.status_code()), Tone::Dim),
            outcome.url()
        )
    } else {
        let detail = if outcome.status_text().is_empty() {
            format!("({})", outcome.status_code())
        } else {
            format!("({} {})", outcome.status_code(), outcome.status_text())
        };

        format!(
            "{} {} - {}",
            style.paint("[BROKEN]", Tone::Red),
            style.paint(&detail, Tone::Yellow),
            outcome.url()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn ok(url: &str) -> ProbeOutcome {
        ProbeOutcome::from_status(url.to_string(), StatusCode::OK)
    }

    fn not_found(url: &str) -> ProbeOutcome {
        ProbeOutcome::from_status(url.to_string(), StatusCode::NOT_FOUND)
    }

    fn dns_failure(url: &str) -> ProbeOutcome {
        ProbeOutcome::unreachable(url.to_string(), "dns error")
    }

    fn render(outcomes: &[ProbeOutcome], format: ReportFormat) -> String {
        let options = ReportOptions {
            format,
            style: Style::new(false),
        };
        let mut buf = Vec::new();
        write_report(&mut buf, outcomes, &options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_ok_line() {
        let line = format_outcome_line(&ok("https://a.test/"), Style::new(false));
        assert_eq!(line, "[OK] (200) - https://a.test/");
    }

    #[test]
    fn test_broken_line_shows_status_and_reason() {
        let line = format_outcome_line(&not_found("https://b.test/"), Style::new(false));
        assert_eq!(line, "[BROKEN] (404 Not Found) - https://b.test/");
    }

    #[test]
    fn test_network_failure_line() {
        let line = format_outcome_line(&dns_failure("https://c.invalid/"), Style::new(false));
        assert_eq!(line, "[BROKEN] (0 dns error) - https://c.invalid/");
    }

    #[test]
    fn test_broken_line_without_reason() {
        let outcome = ProbeOutcome::from_status(
            "https://d.test/".to_string(),
            StatusCode::from_u16(599).unwrap(),
        );
        let line = format_outcome_line(&outcome, Style::new(false));
        assert_eq!(line, "[BROKEN] (599) - https://d.test/");
    }

    #[test]
    fn test_colored_paint_wraps_text() {
        let painted = Style::new(true).paint("[OK]", Tone::Green);
        assert_eq!(painted, "\x1b[32m[OK]\x1b[0m");
        assert_eq!(Style::new(false).paint("[OK]", Tone::Green), "[OK]");
    }

    #[test]
    fn test_color_follows_flag_and_terminal_only() {
        // An environment variable must not switch color off
        std::env::set_var("NO_COLOR", "1");
        let on_terminal = Style::detect(false, true);
        std::env::remove_var("NO_COLOR");

        assert_eq!(on_terminal, Style::new(true));
        assert_eq!(Style::detect(true, true), Style::new(false));
        assert_eq!(Style::detect(false, false), Style::new(false));
    }

    #[test]
    fn test_text_report_lines_and_summary() {
        let outcomes = vec![
            ok("https://a.test/"),
            not_found("https://b.test/"),
            dns_failure("https://c.invalid/"),
        ];
        let text = render(&outcomes, ReportFormat::Text);

        let expected = "\n--- Results ---\n\
[OK] (200) - https://a.test/\n\
[BROKEN] (404 Not Found) - https://b.test/\n\
[BROKEN] (0 dns error) - https://c.invalid/\n\
\n--- Summary ---\n\
Working links: 1\n\
Broken links: 2\n\
Total unique links checked: 3\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_one_line_per_outcome() {
        let outcomes: Vec<_> = (0..5)
            .map(|i| ok(&format!("https://site.test/{}", i)))
            .collect();
        let text = render(&outcomes, ReportFormat::Text);

        let result_lines = text
            .lines()
            .filter(|l| l.starts_with("[OK]") || l.starts_with("[BROKEN]"))
            .count();
        assert_eq!(result_lines, outcomes.len());
    }

    #[test]
    fn test_summary_counts_add_up() {
        let outcomes = vec![ok("https://a.test/"), not_found("https://b.test/"), ok("https://c.test/")];
        let summary = RunSummary::from_outcomes(&outcomes);
        assert_eq!(summary, RunSummary { ok: 2, broken: 1, total: 3 });
        assert_eq!(summary.ok + summary.broken, summary.total);
    }

    #[test]
    fn test_json_report() {
        let outcomes = vec![ok("https://a.test/"), dns_failure("https://c.invalid/")];
        let text = render(&outcomes, ReportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["results"][0]["url"], "https://a.test/");
        assert_eq!(value["results"][0]["status_code"], 200);
        assert_eq!(value["results"][0]["succeeded"], true);
        assert_eq!(value["results"][1]["status_code"], 0);
        assert_eq!(value["results"][1]["status_text"], "dns error");
        assert_eq!(value["summary"]["ok"], 1);
        assert_eq!(value["summary"]["broken"], 1);
        assert_eq!(value["summary"]["total"], 2);
    }
}
