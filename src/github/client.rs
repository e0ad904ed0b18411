use std::sync::OnceLock;

use chrono::SecondsFormat;
use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::GitHubConfig;
use crate::error::{ReleaseNotesError, Result};
use crate::github::{
    HostingClient, Issue, IssueQuery, Organization, PullQuery, PullRequest, Release,
    RepositoryInfo, Tag,
};

const API_VERSION: &str = "2022-11-28";
const MAX_PER_PAGE: u32 = 100;

/// Error body returned by the GitHub API
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Blocking GitHub REST client implementing [HostingClient]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    per_page: u32,
}

impl GitHubClient {
    /// Build an authenticated client
    ///
    /// # Arguments
    /// * `token` - Personal access or installation token sent as a bearer token
    /// * `config` - API base URL and page size
    ///
    /// # Returns
    /// * `Ok(GitHubClient)` - Ready to issue requests
    /// * `Err(Config)` - If the token cannot be used as a header value
    /// * `Err(Network)` - If the HTTP client cannot be constructed
    pub fn new(token: &str, config: &GitHubConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ReleaseNotesError::config("AUTH_TOKEN contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(concat!("release-notes/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Send a request and turn non-success statuses into [ReleaseNotesError::Api]
    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        Err(ReleaseNotesError::Api {
            status: status.as_u16(),
            url,
            message,
        })
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().to_string();
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| ReleaseNotesError::Decode {
            url,
            message: e.to_string(),
        })
    }

    fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url))?;
        Self::decode(response)
    }

    /// Fetch every page of a list endpoint, following `Link: rel="next"`
    fn get_all<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = self.endpoint(path);
        let mut params: Vec<(&str, String)> = query.to_vec();
        params.push(("per_page", self.per_page.to_string()));

        debug!(%url, ?params, "GET (paginated)");
        let mut response = self.send(self.http.get(&url).query(&params))?;
        let mut items = Vec::new();
        let mut pages = 1;

        loop {
            let next = response
                .headers()
                .get(header::LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_link);

            let page: Vec<T> = Self::decode(response)?;
            items.extend(page);

            match next {
                Some(next_url) => {
                    debug!(url = %next_url, "GET (next page)");
                    response = self.send(self.http.get(&next_url))?;
                    pages += 1;
                }
                None => break,
            }
        }

        debug!(%url, pages, count = items.len(), "listing complete");
        Ok(items)
    }
}

/// Extract the `rel="next"` target from a `Link` header value
pub fn next_link(link_header: &str) -> Option<String> {
    static NEXT: OnceLock<Option<Regex>> = OnceLock::new();
    let re = NEXT
        .get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="next""#).ok())
        .as_ref()?;

    link_header
        .split(',')
        .find_map(|part| re.captures(part.trim()))
        .map(|caps| caps[1].to_string())
}

impl HostingClient for GitHubClient {
    fn organization(&self, login: &str) -> Result<Organization> {
        self.get_one(&format!("orgs/{}", login))
    }

    fn repository(&self, organization: &str, name: &str) -> Result<RepositoryInfo> {
        match self.get_one(&format!("repos/{}/{}", organization, name)) {
            Err(ReleaseNotesError::Api { status: 404, .. }) => {
                Err(ReleaseNotesError::repository_not_found(organization, name))
            }
            other => other,
        }
    }

    fn releases(&self, repo: &RepositoryInfo) -> Result<Vec<Release>> {
        self.get_all(&format!("repos/{}/releases", repo.full_name), &[])
    }

    fn tags(&self, repo: &RepositoryInfo) -> Result<Vec<Tag>> {
        self.get_all(&format!("repos/{}/tags", repo.full_name), &[])
    }

    fn issues(&self, repo: &RepositoryInfo, query: &IssueQuery) -> Result<Vec<Issue>> {
        let mut params = vec![("state", query.state.as_str().to_string())];
        if let Some(since) = query.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        self.get_all(&format!("repos/{}/issues", repo.full_name), &params)
    }

    fn pulls(&self, repo: &RepositoryInfo, query: &PullQuery) -> Result<Vec<PullRequest>> {
        let mut params = vec![("state", query.state.as_str().to_string())];
        if let Some(base) = &query.base {
            params.push(("base", base.clone()));
        }
        self.get_all(&format!("repos/{}/pulls", repo.full_name), &params)
    }
}
