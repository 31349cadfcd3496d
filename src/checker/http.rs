// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Turns every possible result into a ProbeOutcome: an HTTP status when the
//   server answered, or status 0 plus a short failure label when it didn't
// - Runs all checks at the same time and waits for every one of them
//
// A failed probe is never an Err. One dead host must not stop the other
// checks, so the send step's Result is folded into an outcome right here.
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: The raw send step, before we fold it into an outcome
// - Extensions: hyper stores a non-standard reason phrase on the response
// - join_all: Wait for a whole batch of futures, results in input order
// =============================================================================

use anyhow::{Context, Result};
use futures::future::join_all;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::debug;

/// Sent as the User-Agent header on every probe.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status text used when a failure has no better description.
pub const NETWORK_ERROR_LABEL: &str = "Network Error";

// Knobs for building the prober
//
// No retry or concurrency setting: every link is tried exactly once, and all
// links are tried at the same time.
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// Per-request timeout. None means the HTTP client's default (no timeout).
    pub timeout: Option<Duration>,
}

// What came back from a server that answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    /// Reason phrase from the status line, when it isn't the standard one
    /// for `status`. HTTP/2 has no reason phrase, so this is None there.
    pub reason: Option<String>,
}

// The result of checking a single link
//
// Fields are private so an outcome can't be changed after it's built, and
// so `succeeded` always agrees with `status_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    url: String,
    status_code: u16,
    status_text: String,
    succeeded: bool,
}

impl ProbeOutcome {
    /// Outcome for a link whose server answered with `status` and the
    /// standard reason phrase for it.
    pub fn from_status(url: String, status: StatusCode) -> Self {
        Self::from_reply(url, Reply { status, reason: None })
    }

    /// Outcome for a link whose server answered. The reason phrase the server
    /// sent wins over the canonical one.
    pub fn from_reply(url: String, reply: Reply) -> Self {
        let Reply { status, reason } = reply;
        let status_text = reason
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

        ProbeOutcome {
            url,
            status_code: status.as_u16(),
            status_text,
            succeeded: status.is_success(),
        }
    }

    /// Outcome for a link that never produced a response.
    pub fn unreachable(url: String, label: impl Into<String>) -> Self {
        let mut status_text = label.into();
        if status_text.trim().is_empty() {
            status_text = NETWORK_ERROR_LABEL.to_string();
        }

        ProbeOutcome {
            url,
            status_code: 0,
            status_text,
            succeeded: false,
        }
    }

    // Folds the raw send result into an outcome
    pub fn from_result(url: String, result: Result<Reply, reqwest::Error>) -> Self {
        match result {
            Ok(reply) => Self::from_reply(url, reply),
            Err(e) => {
                let label = failure_label(&e);
                Self::unreachable(url, label)
            }
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The HTTP status code, or 0 when no response was received.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// True exactly when the status code is in 200..=299.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }
}

// Sends HEAD probes and collects the outcomes
//
// Holds a single reqwest Client so all probes share one connection pool.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    // Builds the HTTP client
    //
    // This is the only fallible step of the prober. If it fails we haven't
    // sent anything yet, so the caller treats it as a fatal setup error.
    pub fn new(options: &ProbeOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);

        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Prober { client })
    }

    // Checks a single link
    //
    // Never fails: transport errors come back as an outcome with status 0.
    pub async fn probe(&self, url: String) -> ProbeOutcome {
        let result = send_probe(&self.client, &url).await;
        let outcome = ProbeOutcome::from_result(url, result);

        debug!(
            url = outcome.url(),
            status = outcome.status_code(),
            text = outcome.status_text(),
            "probe finished"
        );

        outcome
    }

    // Checks many links at once
    //
    // Every probe starts before any of them finishes, and we wait for all of
    // them (no early exit on the first broken link). join_all hands back the
    // results in the same order as `urls`, whatever order the network
    // answered in, so result i always belongs to urls[i].
    pub async fn probe_all(&self, urls: Vec<String>) -> Vec<ProbeOutcome> {
        debug!(count = urls.len(), "starting probes");

        let probes = urls.into_iter().map(|url| self.probe(url));
        join_all(probes).await
    }
}

// Sends one HEAD request and returns its status line
//
// hyper only records the reason phrase (as a response extension) when it
// differs from the canonical one for the code; otherwise we get None here.
// The response body (there is none for HEAD) is dropped right away.
async fn send_probe(client: &Client, url: &str) -> Result<Reply, reqwest::Error> {
    let response = client.head(url).send().await?;

    let reason = response
        .extensions()
        .get::<ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());

    Ok(Reply {
        status: response.status(),
        reason,
    })
}

// Turns a reqwest error into a short, human-readable label
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Connection refused or reset
// - TLS certificate issues
// - Too many redirects
// - A URL reqwest refuses to build a request for
fn failure_label(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "timed out".to_string();
    }
    if error.is_redirect() {
        return "too many redirects".to_string();
    }
    if error.is_builder() {
        return "invalid url".to_string();
    }

    // Walk the chain of causes, outermost first, looking for something
    // more specific than "the request failed"
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_lowercase();

        if text.contains("dns error") {
            return "dns error".to_string();
        }
        if text.contains("certificate") || text.contains("tls") {
            return "tls error".to_string();
        }
        if let Some(label) = cause.downcast_ref::<io::Error>().and_then(io_error_label) {
            return label.to_string();
        }

        source = cause.source();
    }

    if error.is_connect() {
        "connection failed".to_string()
    } else {
        NETWORK_ERROR_LABEL.to_string()
    }
}

fn io_error_label(error: &io::Error) -> Option<&'static str> {
    match error.kind() {
        io::ErrorKind::ConnectionRefused => Some("connection refused"),
        io::ErrorKind::ConnectionReset => Some("connection reset"),
        io::ErrorKind::ConnectionAborted => Some("connection aborted"),
        io::ErrorKind::TimedOut => Some("timed out"),
        io::ErrorKind::AddrNotAvailable => Some("address not available"),
        io::ErrorKind::PermissionDenied => Some("permission denied"),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why fold errors into ProbeOutcome instead of returning Result?
//    - With Result, one dead link would tempt us to use ? and bail out
//    - The whole point of the tool is to report broken links, not die on them
//    - So the error is handled right where it happens and becomes data
//
// 2. What is join_all?
//    - Takes many futures and returns one future that finishes when all do
//    - Like Promise.all() in JavaScript, but nothing here can reject
//    - Results come back in the order the futures were given
//
// 3. Why is Client shared?
//    - Client keeps a connection pool internally
//    - Reusing it means links on the same host can share connections
//
// 4. What is error.source()?
//    - Errors in Rust can wrap other errors (a "cause chain")
//    - source() returns the next error down the chain, or None
//    - downcast_ref::<T>() checks if a dyn Error is really a T
// -----------------------------------------------------------------------------
