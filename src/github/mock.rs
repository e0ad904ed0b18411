use std::sync::Mutex;

use crate::error::{ReleaseNotesError, Result};
use crate::github::{
    HostingClient, Issue, IssueQuery, IssueState, Organization, PullQuery, PullRequest, Release,
    RepositoryInfo, Tag,
};

/// A listing call the mock can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockListing {
    Releases,
    Tags,
    OpenIssues,
    ClosedIssues,
    Pulls,
}

/// Mock hosting client for testing without network access
///
/// Holds a single organization and repository. Listings apply the same
/// state, `since`, and base-branch filters the real API applies and return
/// records in insertion order.
pub struct MockHostingClient {
    organization: String,
    repository: RepositoryInfo,
    releases: Vec<Release>,
    tags: Vec<Tag>,
    issues: Vec<Issue>,
    pulls: Vec<(String, PullRequest)>,
    issue_queries: Mutex<Vec<IssueQuery>>,
    failures: Vec<(MockListing, u16)>,
}

impl MockHostingClient {
    /// Create a mock serving `organization/name`
    pub fn new(organization: impl Into<String>, repository: RepositoryInfo) -> Self {
        MockHostingClient {
            organization: organization.into(),
            repository,
            releases: Vec::new(),
            tags: Vec::new(),
            issues: Vec::new(),
            pulls: Vec::new(),
            issue_queries: Mutex::new(Vec::new()),
            failures: Vec::new(),
        }
    }

    pub fn add_release(&mut self, release: Release) {
        self.releases.push(release);
    }

    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(Tag::new(name));
    }

    /// Add an issue; its state follows from `closed_at`
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Add a pull request targeting `base`
    pub fn add_pull(&mut self, base: impl Into<String>, pull: PullRequest) {
        self.pulls.push((base.into(), pull));
    }

    /// Issue queries received so far, in call order
    pub fn issue_queries(&self) -> Vec<IssueQuery> {
        self.issue_queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    /// Make `listing` answer with an API error carrying `status`
    pub fn fail_listing(&mut self, listing: MockListing, status: u16) {
        self.failures.push((listing, status));
    }

    fn check_failure(&self, listing: MockListing, endpoint: &str) -> Result<()> {
        match self.failures.iter().find(|(l, _)| *l == listing) {
            Some((_, status)) => Err(ReleaseNotesError::Api {
                status: *status,
                url: format!("mock://repos/{}/{}", self.repository.full_name, endpoint),
                message: "Injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn repository_name(&self) -> &str {
        self.repository
            .full_name
            .rsplit('/')
            .next()
            .unwrap_or(&self.repository.full_name)
    }
}

impl HostingClient for MockHostingClient {
    fn organization(&self, login: &str) -> Result<Organization> {
        if login == self.organization {
            Ok(Organization {
                login: login.to_string(),
            })
        } else {
            Err(ReleaseNotesError::Api {
                status: 404,
                url: format!("mock://orgs/{}", login),
                message: "Not Found".to_string(),
            })
        }
    }

    fn repository(&self, organization: &str, name: &str) -> Result<RepositoryInfo> {
        if organization == self.organization && name == self.repository_name() {
            Ok(self.repository.clone())
        } else {
            Err(ReleaseNotesError::repository_not_found(organization, name))
        }
    }

    fn releases(&self, _repo: &RepositoryInfo) -> Result<Vec<Release>> {
        self.check_failure(MockListing::Releases, "releases")?;
        Ok(self.releases.clone())
    }

    fn tags(&self, _repo: &RepositoryInfo) -> Result<Vec<Tag>> {
        self.check_failure(MockListing::Tags, "tags")?;
        Ok(self.tags.clone())
    }

    fn issues(&self, _repo: &RepositoryInfo, query: &IssueQuery) -> Result<Vec<Issue>> {
        if let Ok(mut queries) = self.issue_queries.lock() {
            queries.push(query.clone());
        }
        let listing = match query.state {
            IssueState::Open => MockListing::OpenIssues,
            IssueState::Closed => MockListing::ClosedIssues,
        };
        self.check_failure(listing, "issues")?;

        Ok(self
            .issues
            .iter()
            .filter(|issue| query.state.admits(issue.closed_at))
            .filter(|issue| match (query.since, issue.updated_at) {
                (Some(since), Some(updated)) => updated >= since,
                _ => true,
            })
            .cloned()
            .collect())
    }

    fn pulls(&self, _repo: &RepositoryInfo, query: &PullQuery) -> Result<Vec<PullRequest>> {
        self.check_failure(MockListing::Pulls, "pulls")?;
        Ok(self
            .pulls
            .iter()
            .filter(|(_, pull)| query.state.admits(pull.closed_at))
            .filter(|(base, _)| query.base.as_ref().map_or(true, |b| b == base))
            .map(|(_, pull)| pull.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn repo() -> RepositoryInfo {
        RepositoryInfo::new("acme/widgets", Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_mock_resolves_only_its_repository() {
        let client = MockHostingClient::new("acme", repo());

        assert!(client.organization("acme").is_ok());
        assert!(client.organization("other").is_err());
        assert_eq!(client.repository("acme", "widgets").unwrap(), repo());
        assert!(matches!(
            client.repository("acme", "gadgets"),
            Err(ReleaseNotesError::RepositoryNotFound { .. })
        ));
    }

    #[test]
    fn test_mock_issue_state_and_since_filters() {
        let mut client = MockHostingClient::new("acme", repo());
        let jan = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();

        client.add_issue(Issue::new("open recent", "u1", jan(2)).updated_at(jan(9)));
        client.add_issue(Issue::new("open stale", "u2", jan(1)).updated_at(jan(3)));
        client.add_issue(Issue::new("closed", "u3", jan(1)).closed_at(jan(4)));

        let open = client
            .issues(&repo(), &IssueQuery::new(IssueState::Open).since(jan(5)))
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "open recent");

        let closed = client
            .issues(&repo(), &IssueQuery::new(IssueState::Closed))
            .unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(client.issue_queries().len(), 2);
    }

    #[test]
    fn test_mock_pull_base_filter() {
        let mut client = MockHostingClient::new("acme", repo());
        let closed = Some(Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());

        client.add_pull("main", PullRequest::new("into main", "p1", closed));
        client.add_pull("develop", PullRequest::new("into develop", "p2", closed));
        client.add_pull("main", PullRequest::new("still open", "p3", None));

        let pulls = client
            .pulls(&repo(), &PullQuery::new(IssueState::Closed).base("main"))
            .unwrap();
        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].title, "into main");
    }

    #[test]
    fn test_mock_injected_failure_hits_only_that_listing() {
        let mut client = MockHostingClient::new("acme", repo());
        client.fail_listing(MockListing::ClosedIssues, 502);

        assert!(client.releases(&repo()).is_ok());
        assert!(client
            .issues(&repo(), &IssueQuery::new(IssueState::Open))
            .is_ok());
        match client.issues(&repo(), &IssueQuery::new(IssueState::Closed)) {
            Err(ReleaseNotesError::Api { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
