//! CLI subcommand implementations.

pub mod attempts;
pub mod courses;
pub mod lectures;
pub mod quizzes;

use classroom_lib::{FetchError, FetchOutcome};

/// Prints the page banner and any correction the fetcher made.
pub(crate) fn report_page<I>(outcome: &FetchOutcome<I>, noun: &str) {
    for line in page_banner(outcome, noun) {
        eprintln!("{}", line);
    }
}

fn page_banner<I>(outcome: &FetchOutcome<I>, noun: &str) -> Vec<String> {
    let view = &outcome.view;
    let mut lines = Vec::new();
    if let Some(from) = outcome.recovered_from {
        lines.push(format!("Page {} no longer exists, showing page 1", from));
    } else if outcome.was_clamped() {
        lines.push(format!(
            "Page {} is past the end, showing page {}",
            outcome.requested_page, view.current_page
        ));
    }
    lines.push(format!(
        "Page {}/{} ({} total {})",
        view.current_page, view.total_pages, view.total_count, noun
    ));
    lines
}

/// Converts a fetch failure, telling the user how to log in again on 401.
pub(crate) fn fetch_failed(err: FetchError) -> anyhow::Error {
    if matches!(err, FetchError::Unauthorized(_)) {
        eprintln!("Not logged in or session expired: set CLASSROOM_ACCESS_TOKEN to a valid token.");
    }
    err.into()
}
