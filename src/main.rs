// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Read the markdown file
// 3. Extract unique links, probe them all at once, wait for every answer
// 4. Print the report and exit with the proper code
//
// Exit codes:
//   0 = the run finished (even if some links are broken, or there were none)
//   1 = we couldn't start: no file given, file unreadable, client setup failed
//
// Broken links are the report, not a failure of the tool, so they don't
// change the exit code.
// =============================================================================

mod checker;
mod cli;
mod logging;
mod report;

use anyhow::{Context, Result};
use checker::{ProbeOptions, Prober};
use clap::Parser;
use cli::Cli;
use report::{ReportFormat, ReportOptions, Style, Tone};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let exit_code = match run(cli, &mut stdout, &mut stderr).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
//
// Progress lines and the report go to `out`; usage and error messages go
// to `err` (stdout and stderr in the real binary).
// Returns:
//   Ok(0) = run completed
//   Ok(1) = user-facing setup error (already printed)
//   Err   = unexpected error, printed by main()
async fn run<W: Write, E: Write>(cli: Cli, out: &mut W, err: &mut E) -> Result<i32> {
    // Check the argument before touching the filesystem or network.
    // An empty path ("") counts as no path at all.
    let Some(file) = cli.file.as_deref().filter(|f| !f.as_os_str().is_empty()) else {
        writeln!(err, "Error: please provide the path to a markdown file.")?;
        writeln!(err, "{}", cli::usage())?;
        return Ok(1);
    };

    let style = Style::for_stdout(cli.no_color);
    let format = if cli.json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    // JSON mode keeps stdout machine-readable, so no progress chatter
    let show_progress = format == ReportFormat::Text;

    let path = resolve_path(file)?;

    if show_progress {
        writeln!(
            out,
            "{}",
            style.paint(&format!("Reading file: {}", path.display()), Tone::Blue)
        )?;
    }

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            writeln!(err, "Error: file not found at '{}'", path.display())?;
            return Ok(1);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read '{}'", path.display()));
        }
    };
    debug!(bytes = bytes.len(), "read document");

    // Invalid UTF-8 becomes U+FFFD instead of failing the whole run; links
    // next to a stray Latin-1 byte still get checked
    let content = String::from_utf8_lossy(&bytes);

    let links = checker::extract_markdown_links(&content);
    let options = ReportOptions { format, style };

    if links.is_empty() {
        if show_progress {
            writeln!(out, "{}", style.paint("No links found in file.", Tone::Green))?;
        } else {
            report::write_report(out, &[], &options)?;
        }
        out.flush()?;
        return Ok(0);
    }

    if show_progress {
        writeln!(
            out,
            "{}",
            style.paint(
                &format!("Found {} unique link(s). Checking...", links.len()),
                Tone::Blue
            )
        )?;
    }

    let prober = Prober::new(&ProbeOptions {
        timeout: cli.timeout(),
    })?;

    // Nothing is printed until every probe has an outcome
    let outcomes = prober.probe_all(links).await;
    info!(checked = outcomes.len(), "all probes finished");

    report::write_report(out, &outcomes, &options)?;
    out.flush()?;

    Ok(0)
}

// Makes a relative path absolute against the current directory, so messages
// always show the full path that was tried
//
// `.` and `..` are folded away lexically (symlinks are not followed), so
// "docs/../README.md" is reported as "<cwd>/README.md".
fn resolve_path(file: &Path) -> Result<PathBuf> {
    let joined = if file.is_absolute() {
        file.to_path_buf()
    } else {
        let cwd = std::env::current_dir().context("failed to read the current directory")?;
        cwd.join(file)
    };

    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            // pop() on "/" does nothing, so "/.." stays "/"
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
