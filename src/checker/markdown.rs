// src/checker/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We only care about inline links written as [label](url), where the url
// starts with http:// or https://. Everything else is ignored:
// - bare URLs that are not wrapped in link syntax
// - mailto:, tel:, relative paths, anchors
// - reference-style links ([label][ref])
//
// The match is done with a single regular expression (the `regex` crate).
// A link destination ends at the first whitespace or ')' character, so a
// URL that contains a literal ')' gets cut short and a destination followed
// by a title ([a](https://x "title")) is not recognized at all.
//
// Rust concepts:
// - OnceLock: compile the regex once and reuse it for every call
// - HashSet: remember which URLs we've already seen
// - Iterators: captures_iter() walks every match in the text
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// [one or more non-']' chars](http(s)://one or more non-space, non-')' chars)
const LINK_PATTERN: &str = r"\[[^\]]+\]\((https?://[^\s)]+)\)";

fn link_regex() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    LINK_RE.get_or_init(|| Regex::new(LINK_PATTERN).expect("link pattern is a valid regex"))
}

// Extracts all unique HTTP/HTTPS link destinations from Markdown text
//
// Parameters:
//   markdown: the markdown text to scan (borrowed as &str)
//
// Returns: Vec<String> of URLs, in the order each one first appears.
// A URL that shows up in three links is returned once.
//
// Example input:
//   "See [Rust](https://www.rust-lang.org) and [again](https://www.rust-lang.org)"
//
// Example output:
//   vec!["https://www.rust-lang.org"]
pub fn extract_markdown_links(markdown: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for caps in link_regex().captures_iter(markdown) {
        // Group 1 always participates when the whole pattern matched
        let Some(url) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };

        // insert() returns false if the URL was already in the set
        if seen.insert(url) {
            links.push(url.to_string());
        }
    }

    links
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec AND a HashSet?
//    - The HashSet answers "have we seen this URL?" in O(1)
//    - The Vec keeps the order the URLs were found in
//    - Together they give us "unique, in first-seen order"
//
// 2. What is OnceLock?
//    - A cell that is written exactly once, the first time it's needed
//    - Compiling a regex is slow compared to running it, so we only do it once
//
// 3. What is let-else?
//    - let Some(x) = expr else { ... }; binds x or runs the else block
//    - The else block must leave the current scope (continue, return, ...)
// -----------------------------------------------------------------------------
