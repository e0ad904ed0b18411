//! Client-side classification of issues and pull requests against a [Window].

use crate::domain::Window;
use crate::github::{Issue, PullRequest};

/// Where a record from the open-issues listing ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenIssueClass {
    /// Created inside the window
    Opened,
    /// Created before the window but still open and recently touched
    Updated,
    /// The record is a pull request
    PullRequest,
    /// Created after the run started
    FutureDated,
}

/// Classify a single record from the open-issues listing.
pub fn classify_open_issue(issue: &Issue, window: &Window) -> OpenIssueClass {
    if issue.is_pull_request() {
        OpenIssueClass::PullRequest
    } else if issue.created_at > window.last_date {
        OpenIssueClass::FutureDated
    } else if issue.created_at > window.previous_date {
        OpenIssueClass::Opened
    } else {
        OpenIssueClass::Updated
    }
}

/// Split open issues into `(opened, updated)`, keeping listing order.
pub fn split_open_issues(issues: Vec<Issue>, window: &Window) -> (Vec<Issue>, Vec<Issue>) {
    let mut opened = Vec::new();
    let mut updated = Vec::new();

    for issue in issues {
        match classify_open_issue(&issue, window) {
            OpenIssueClass::Opened => opened.push(issue),
            OpenIssueClass::Updated => updated.push(issue),
            OpenIssueClass::PullRequest | OpenIssueClass::FutureDated => {}
        }
    }

    (opened, updated)
}

/// Pull requests closed at or after the window's lower bound, in listing order.
///
/// Records without a `closed_at` were never closed and are dropped.
pub fn finished_pull_requests(pulls: Vec<PullRequest>, window: &Window) -> Vec<PullRequest> {
    pulls
        .into_iter()
        .filter(|pull| {
            pull.closed_at
                .is_some_and(|closed_at| closed_at >= window.previous_date)
        })
        .collect()
}

/// Issues closed inside the window, most recently closed first.
///
/// Records without `closed_at` are dropped, the rest are sorted by
/// `closed_at` descending and handed to [scan_closed_issues].
pub fn closed_issues(issues: Vec<Issue>, window: &Window) -> Vec<Issue> {
    let mut sorted: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| issue.closed_at.is_some())
        .collect();
    sorted.sort_by(|a, b| b.closed_at.cmp(&a.closed_at));

    scan_closed_issues(sorted, window)
}

/// Scan closed issues that are already ordered newest-closed first.
///
/// Pull requests and future-dated records are skipped. The scan stops at the
/// first record closed before `previous_date`; nothing after it is examined.
pub fn scan_closed_issues<I>(sorted: I, window: &Window) -> Vec<Issue>
where
    I: IntoIterator<Item = Issue>,
{
    let mut closed = Vec::new();
    for issue in sorted {
        if issue.is_pull_request() {
            continue;
        }
        if issue.created_at > window.last_date {
            continue;
        }
        if issue
            .closed_at
            .is_some_and(|closed_at| closed_at < window.previous_date)
        {
            break;
        }
        closed.push(issue);
    }

    closed
}
