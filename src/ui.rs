//! Terminal output for the CLI.

use console::style;

use crate::domain::Changelog;
use crate::error::ErrorKind;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the failure line, its underlying cause and, for credential problems, a hint.
pub fn display_failure(message: &str, kind: ErrorKind, detail: Option<&str>) {
    display_error(&format!("Error generating changelog: {}", message));
    if let Some(detail) = detail {
        eprintln!("  Caused by: {}", detail);
    }
    if kind == ErrorKind::CredentialMissing {
        eprintln!(
            "  Set {} in the environment or in a local .env file.",
            style("AUTH_TOKEN").cyan()
        );
    }
}

/// One-line description of what a changelog contains.
pub fn format_summary(changelog: &Changelog) -> String {
    let range = match changelog.window.compare_range() {
        Some((previous, current)) => format!("{}...{}", previous, current),
        None => format!("since {}", changelog.window.previous_date.format("%Y-%m-%d")),
    };

    if changelog.is_empty() {
        return format!(
            "{}/{} ({}): no merged PRs or issue activity",
            changelog.organization, changelog.repository, range
        );
    }

    format!(
        "{}/{} ({}): {} merged PRs, {} closed, {} opened, {} updated issues",
        changelog.organization,
        changelog.repository,
        range,
        changelog.finished_prs.len(),
        changelog.closed_issues.len(),
        changelog.opened_issues.len(),
        changelog.updated_issues.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Window;
    use crate::github::PullRequest;
    use chrono::{TimeZone, Utc};

    fn changelog(previous_tag: Option<&str>) -> Changelog {
        Changelog {
            organization: "acme".to_string(),
            repository: "widgets".to_string(),
            window: Window {
                previous_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                last_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                previous_tag: previous_tag.map(str::to_string),
                current_tag: Some("v1.1".to_string()),
            },
            finished_prs: Vec::new(),
            closed_issues: Vec::new(),
            opened_issues: Vec::new(),
            updated_issues: Vec::new(),
        }
    }

    #[test]
    fn test_summary_with_tag_range() {
        let mut changelog = changelog(Some("v1.0"));
        changelog
            .finished_prs
            .push(PullRequest::new("Fix bug", "https://x/pr/1", None));

        assert_eq!(
            format_summary(&changelog),
            "acme/widgets (v1.0...v1.1): 1 merged PRs, 0 closed, 0 opened, 0 updated issues"
        );
    }

    #[test]
    fn test_summary_for_empty_changelog() {
        let summary = format_summary(&changelog(Some("v1.0")));
        assert_eq!(
            summary,
            "acme/widgets (v1.0...v1.1): no merged PRs or issue activity"
        );
    }

    #[test]
    fn test_summary_without_previous_tag_uses_date() {
        let summary = format_summary(&changelog(None));
        assert!(summary.contains("(since 2024-01-01)"), "got: {}", summary);
    }

    #[test]
    fn test_display_functions_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_failure("AUTH_TOKEN environment variable not set.", ErrorKind::CredentialMissing, None);
        display_failure(
            "Repository not found for acme/widgets",
            ErrorKind::RepositoryNotFound,
            Some("Request failed: connection refused"),
        );
    }
}
