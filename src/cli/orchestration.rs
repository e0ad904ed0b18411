//! Main workflow orchestration logic
//!
//! Separates CLI argument parsing from the work itself so the workflow can be
//! driven programmatically without depending on clap.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::Changelog;
use crate::error::Result;
use crate::generator;
use crate::github::{GitHubClient, HostingClient};

/// Arguments for the changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogWorkflowArgs {
    /// Organization that owns the repository
    pub organization: String,

    /// Repository name inside the organization
    pub repo_name: String,

    /// Output file; falls back to `changelog.file_name` from the config
    pub file_name: Option<String>,
}

impl ChangelogWorkflowArgs {
    /// The file the report will be written to
    pub fn output_path(&self, config: &Config) -> PathBuf {
        PathBuf::from(
            self.file_name
                .as_deref()
                .unwrap_or(config.changelog.file_name.as_str()),
        )
    }
}

/// Result of a successful changelog workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Where the report was written
    pub output_path: PathBuf,

    /// The classified data behind the report
    pub changelog: Changelog,
}

/// Run the workflow against an already-built client
pub fn run_with_client<C: HostingClient + ?Sized>(
    client: &C,
    args: &ChangelogWorkflowArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let output_path = args.output_path(config);
    let changelog = generator::generate(
        client,
        config,
        &args.organization,
        &args.repo_name,
        &output_path,
    )?;

    Ok(WorkflowResult {
        output_path,
        changelog,
    })
}

/// Main changelog workflow
///
/// 1. Build an authenticated GitHub client from `token` and `config.github`
/// 2. Generate the report for `organization/repo_name`
/// 3. Write it to the requested output file
pub fn run_changelog_workflow(
    args: &ChangelogWorkflowArgs,
    config: &Config,
    token: &str,
) -> Result<WorkflowResult> {
    let client = GitHubClient::new(token, &config.github)?;
    run_with_client(&client, args, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file_name: Option<&str>) -> ChangelogWorkflowArgs {
        ChangelogWorkflowArgs {
            organization: "acme".to_string(),
            repo_name: "widgets".to_string(),
            file_name: file_name.map(str::to_string),
        }
    }

    #[test]
    fn test_output_path_defaults_to_config() {
        let config = Config::default();
        assert_eq!(args(None).output_path(&config), PathBuf::from("body.txt"));
    }

    #[test]
    fn test_output_path_flag_overrides_config() {
        let mut config = Config::default();
        config.changelog.file_name = "notes.md".to_string();
        assert_eq!(
            args(Some("release.txt")).output_path(&config),
            PathBuf::from("release.txt")
        );
        assert_eq!(args(None).output_path(&config), PathBuf::from("notes.md"));
    }
}
