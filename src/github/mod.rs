//! Hosting platform access layer
//!
//! This module provides a trait-based abstraction over the read-only
//! GitHub REST queries that release-notes needs, allowing the changelog
//! generator to run against the real API or an in-memory mock.
//!
//! # Overview
//!
//! The primary abstraction is the [HostingClient] trait. The concrete
//! implementations are:
//!
//! - [client::GitHubClient]: blocking REST client built on `reqwest`
//! - [mock::MockHostingClient]: in-memory implementation for testing
//!
//! ```rust
//! # use release_notes::github::{HostingClient, IssueQuery, IssueState};
//! # fn example<C: HostingClient>(client: &C) -> release_notes::Result<()> {
//! let repo = client.repository("rust-lang", "rust")?;
//! let open = client.issues(&repo, &IssueQuery::new(IssueState::Open))?;
//! println!("{} has {} open issues", repo.full_name, open.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::{MockHostingClient, MockListing};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Result;

/// An organization account on the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub login: String,
}

/// A resolved repository handle
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryInfo {
    /// `owner/name`, used to address every other endpoint
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl RepositoryInfo {
    pub fn new(full_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        RepositoryInfo {
            full_name: full_name.into(),
            created_at,
        }
    }
}

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
}

impl Release {
    pub fn new(tag_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Release {
            tag_name: tag_name.into(),
            created_at,
        }
    }
}

/// A git tag as listed by the tags endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }
}

/// Present on issue records that are really pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequestMarker {
    #[serde(default)]
    pub html_url: Option<String>,
}

/// An issue record. The issues endpoint also returns pull requests,
/// distinguished by the `pull_request` marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub title: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pull_request: Option<PullRequestMarker>,
}

impl Issue {
    /// Create an open issue with no update timestamp
    pub fn new(
        title: impl Into<String>,
        html_url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Issue {
            title: title.into(),
            html_url: html_url.into(),
            created_at,
            updated_at: None,
            closed_at: None,
            pull_request: None,
        }
    }

    pub fn closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Mark this record as a pull request returned through the issues endpoint
    pub fn as_pull_request(mut self) -> Self {
        self.pull_request = Some(PullRequestMarker {
            html_url: Some(self.html_url.clone()),
        });
        self
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// A pull request record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn new(
        title: impl Into<String>,
        html_url: impl Into<String>,
        closed_at: Option<DateTime<Utc>>,
    ) -> Self {
        PullRequest {
            title: title.into(),
            html_url: html_url.into(),
            closed_at,
        }
    }
}

/// State filter accepted by the issues and pulls endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }

    /// Whether a record with the given `closed_at` passes this filter
    pub fn admits(self, closed_at: Option<DateTime<Utc>>) -> bool {
        match self {
            IssueState::Open => closed_at.is_none(),
            IssueState::Closed => closed_at.is_some(),
        }
    }
}

/// Parameters for listing issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    pub state: IssueState,
    /// Only issues updated at or after this instant (server-side hint)
    pub since: Option<DateTime<Utc>>,
}

impl IssueQuery {
    pub fn new(state: IssueState) -> Self {
        IssueQuery { state, since: None }
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}

/// Parameters for listing pull requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullQuery {
    pub state: IssueState,
    pub base: Option<String>,
}

impl PullQuery {
    pub fn new(state: IssueState) -> Self {
        PullQuery { state, base: None }
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

/// Read-only hosting platform operations
///
/// All implementors must be `Send + Sync`. Every listing returns the
/// complete result set (all pages) in the order the platform provides.
///
/// ## Implementations
///
/// - [GitHubClient](client::GitHubClient): GitHub REST API over blocking HTTP
/// - [MockHostingClient](mock::MockHostingClient): in-memory records for tests
pub trait HostingClient: Send + Sync {
    /// Look up an organization by login
    fn organization(&self, login: &str) -> Result<Organization>;

    /// Resolve a repository inside an organization
    ///
    /// # Returns
    /// * `Ok(RepositoryInfo)` - The repository handle
    /// * `Err(RepositoryNotFound)` - If the platform reports no such repository
    /// * `Err` - For any other request failure
    fn repository(&self, organization: &str, name: &str) -> Result<RepositoryInfo>;

    /// List releases, newest first as provided by the platform
    fn releases(&self, repo: &RepositoryInfo) -> Result<Vec<Release>>;

    /// List tags, newest first as provided by the platform
    fn tags(&self, repo: &RepositoryInfo) -> Result<Vec<Tag>>;

    /// List issues (including pull requests) matching the query
    fn issues(&self, repo: &RepositoryInfo, query: &IssueQuery) -> Result<Vec<Issue>>;

    /// List pull requests matching the query
    fn pulls(&self, repo: &RepositoryInfo, query: &PullQuery) -> Result<Vec<PullRequest>>;
}
