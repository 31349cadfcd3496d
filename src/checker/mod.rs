// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - markdown: Finds [label](url) links in markdown text
// - http: Sends HEAD probes and turns the answers into ProbeOutcomes
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod http;
mod markdown;

// Re-export public items from submodules
// This lets users write `checker::Prober` instead of `checker::http::Prober`
pub use http::{ProbeOptions, ProbeOutcome, Prober};
pub use markdown::extract_markdown_links;
