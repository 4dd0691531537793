//! Failure boundary around remote subtree composition
//!
//! A load or render failure in the library subtree must not take down the
//! container page. The boundary runs the composing future and, on an error
//! or a panic, swaps the subtree for a fixed diagnostic card. Two states,
//! one direction: once a boundary instance has errored it never composes
//! its subtree again; a fresh instance (the next page view) starts clean.

use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
enum BoundaryState {
    Ok,
    Errored(String),
}

/// One-way ok → errored wrapper for a rendered subtree
#[derive(Debug)]
pub struct FailureBoundary {
    state: BoundaryState,
}

impl FailureBoundary {
    pub fn new() -> Self {
        Self {
            state: BoundaryState::Ok,
        }
    }

    /// Run the subtree through the boundary
    ///
    /// Returns the subtree's output, or the diagnostic card if the subtree
    /// fails, panics, or the boundary has already errored. An errored
    /// boundary does not poll the future at all.
    pub async fn compose<F, E>(&mut self, subtree: F) -> String
    where
        F: Future<Output = Result<String, E>>,
        E: fmt::Display,
    {
        if let BoundaryState::Errored(failure) = &self.state {
            return diagnostic_card(failure);
        }
        match AssertUnwindSafe(subtree).catch_unwind().await {
            Ok(Ok(html)) => html,
            Ok(Err(e)) => self.fail(e.to_string()),
            Err(panic) => self.fail(panic_message(panic)),
        }
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.state, BoundaryState::Errored(_))
    }

    /// The recorded failure, once errored
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            BoundaryState::Ok => None,
            BoundaryState::Errored(failure) => Some(failure),
        }
    }

    fn fail(&mut self, failure: String) -> String {
        warn!(%failure, "Library subtree failed; boundary is now errored");
        let card = diagnostic_card(&failure);
        self.state = BoundaryState::Errored(failure);
        card
    }
}

impl Default for FailureBoundary {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed view an errored boundary renders instead of its subtree
fn diagnostic_card(failure: &str) -> String {
    format!(
        concat!(
            "<div class=\"card error-card\">\n",
            "<h3>Micro frontend failed to load</h3>\n",
            "<pre>{}</pre>\n",
            "<p class=\"muted\">Check that the library module is running ",
            "and its remote entry URL is reachable, then reload.</p>\n",
            "</div>\n",
        ),
        escape(failure)
    )
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "subtree panicked".to_string()
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
