//! Plain-text rendering of a [Changelog].
//!
//! The output is Markdown-flavoured and meant to be pasted into a release
//! body. Both top-level sections are always present; empty sections carry a
//! fallback line instead of bullets.

use crate::domain::Changelog;

pub const NO_PRS: &str = "No merged PRs";
pub const NO_ISSUES: &str = "No issue changes";

/// `**Full Changelog**` line linking the two tags, when both are known
pub fn compare_link(changelog: &Changelog, web_url: &str) -> Option<String> {
    let (previous, current) = changelog.window.compare_range()?;
    Some(format!(
        "**Full Changelog**: {}/{}/{}/compare/{}...{}",
        web_url.trim_end_matches('/'),
        changelog.organization,
        changelog.repository,
        previous,
        current
    ))
}

fn bullet(title: &str, url: &str) -> String {
    format!("- [{}]({})\n", title, url)
}

/// Render the full report.
///
/// # Arguments
/// * `changelog` - Classified pull requests and issues
/// * `web_url` - Base URL of the hosting site, used for the compare link
pub fn render(changelog: &Changelog, web_url: &str) -> String {
    let mut out = String::new();

    if let Some(link) = compare_link(changelog, web_url) {
        out.push_str(&link);
        out.push_str("\n\n");
    }

    if changelog.finished_prs.is_empty() {
        out.push_str(&format!("# PRs\n\n{}\n\n", NO_PRS));
    } else {
        out.push_str("# PRs\n\n");
        for pr in &changelog.finished_prs {
            out.push_str(&bullet(&pr.title, &pr.html_url));
        }
        out.push_str("\n\n");
    }

    if changelog.issue_count() == 0 {
        out.push_str(&format!("# Issues\n\n{}\n", NO_ISSUES));
        return out;
    }

    out.push_str("# Issues\n\n");
    let groups = [
        ("", "Closed", &changelog.closed_issues),
        ("\n", "Opened", &changelog.opened_issues),
        ("\n", "Updated", &changelog.updated_issues),
    ];
    for (lead, label, issues) in groups {
        if issues.is_empty() {
            continue;
        }
        out.push_str(&format!("{}## {} Issues ({})\n", lead, label, issues.len()));
        for issue in issues.iter() {
            out.push_str(&bullet(&issue.title, &issue.html_url));
        }
    }

    out
}
