use crate::domain::Window;
use crate::github::{Issue, PullRequest};

/// Everything that goes into one release-notes report
#[derive(Debug, Clone, PartialEq)]
pub struct Changelog {
    pub organization: String,
    pub repository: String,
    pub window: Window,
    pub finished_prs: Vec<PullRequest>,
    pub closed_issues: Vec<Issue>,
    pub opened_issues: Vec<Issue>,
    pub updated_issues: Vec<Issue>,
}

impl Changelog {
    /// Closed, opened, and updated issues combined
    pub fn issue_count(&self) -> usize {
        self.closed_issues.len() + self.opened_issues.len() + self.updated_issues.len()
    }

    /// No merged pull requests and no issue activity in the window
    pub fn is_empty(&self) -> bool {
        self.finished_prs.is_empty() && self.issue_count() == 0
    }
}
