//! The changelog generator: resolve, fetch, classify, render, write.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{self, Changelog, Window};
use crate::error::{ReleaseNotesError, Result};
use crate::github::{HostingClient, IssueQuery, IssueState, PullQuery, RepositoryInfo};
use crate::report;

/// Resolve `organization/repo_name`, mapping every failure to `RepositoryNotFound`.
///
/// Failures other than the repository lookup's own not-found are carried
/// along as the error's cause.
pub fn resolve_repository<C: HostingClient + ?Sized>(
    client: &C,
    organization: &str,
    repo_name: &str,
) -> Result<RepositoryInfo> {
    client
        .organization(organization)
        .and_then(|_| client.repository(organization, repo_name))
        .map_err(|e| {
            debug!(error = %e, "repository resolution failed");
            let not_found = ReleaseNotesError::repository_not_found(organization, repo_name);
            match e {
                ReleaseNotesError::RepositoryNotFound { cause: None, .. } => not_found,
                ReleaseNotesError::RepositoryNotFound {
                    cause: Some(cause), ..
                } => not_found.with_cause(cause),
                other => not_found.with_cause(other),
            }
        })
}

/// Gather and classify everything between the latest release and `last_date`.
///
/// # Arguments
/// * `client` - Hosting platform access
/// * `config` - Supplies the base branch pull requests must target
/// * `organization`, `repo_name` - Repository to report on
/// * `last_date` - Upper bound of the window, normally the current time
pub fn collect<C: HostingClient + ?Sized>(
    client: &C,
    config: &Config,
    organization: &str,
    repo_name: &str,
    last_date: DateTime<Utc>,
) -> Result<Changelog> {
    let repo = resolve_repository(client, organization, repo_name)?;

    let releases = client.releases(&repo)?;
    let tags = client.tags(&repo)?;
    let window = Window::determine(&repo, releases, &tags, last_date);
    info!(
        repository = %repo.full_name,
        previous_date = %window.previous_date,
        previous_tag = ?window.previous_tag,
        current_tag = ?window.current_tag,
        "window determined"
    );

    let open = client.issues(
        &repo,
        &IssueQuery::new(IssueState::Open).since(window.previous_date),
    )?;
    let (opened_issues, updated_issues) = domain::split_open_issues(open, &window);

    let pulls = client.pulls(
        &repo,
        &PullQuery::new(IssueState::Closed).base(config.changelog.base_branch.as_str()),
    )?;
    let finished_prs = domain::finished_pull_requests(pulls, &window);

    let closed = client.issues(&repo, &IssueQuery::new(IssueState::Closed))?;
    let closed_issues = domain::closed_issues(closed, &window);

    debug!(
        prs = finished_prs.len(),
        closed = closed_issues.len(),
        opened = opened_issues.len(),
        updated = updated_issues.len(),
        "classification complete"
    );

    Ok(Changelog {
        organization: organization.to_string(),
        repository: repo_name.to_string(),
        window,
        finished_prs,
        closed_issues,
        opened_issues,
        updated_issues,
    })
}

/// Write rendered text to `path`, replacing any existing content.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| ReleaseNotesError::write(path, e))?;
    file.write_all(text.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| ReleaseNotesError::write(path, e))
}

/// Generate the release notes for `organization/repo_name` into `output_path`.
///
/// The window closes at the current UTC time. The report is rendered in
/// memory first, so a failed fetch leaves any existing file untouched.
///
/// # Returns
/// * `Ok(Changelog)` - The classified data that was written
/// * `Err(RepositoryNotFound)` - If the repository cannot be resolved
/// * `Err` - On any request or write failure
pub fn generate<C: HostingClient + ?Sized>(
    client: &C,
    config: &Config,
    organization: &str,
    repo_name: &str,
    output_path: &Path,
) -> Result<Changelog> {
    let last_date = Utc::now();
    let changelog = collect(client, config, organization, repo_name, last_date)?;

    let text = report::render(&changelog, &config.github.web_url);
    write_report(output_path, &text)?;
    info!(path = %output_path.display(), bytes = text.len(), "changelog written");

    Ok(changelog)
}
