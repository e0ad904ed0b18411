use chrono::{DateTime, Utc};

use crate::github::{Release, RepositoryInfo, Tag};

/// The time range a changelog covers
///
/// `previous_date` is the creation time of the latest release (or of the
/// repository itself when nothing has been released yet). `last_date` is the
/// instant the run started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub previous_date: DateTime<Utc>,
    pub last_date: DateTime<Utc>,
    pub previous_tag: Option<String>,
    pub current_tag: Option<String>,
}

impl Window {
    /// Build the window from the repository's releases and tags.
    ///
    /// Releases are ordered by `created_at` descending before the latest one
    /// is picked. Tags carry no timestamp, so the first tag as listed is the
    /// current one.
    pub fn determine(
        repo: &RepositoryInfo,
        releases: Vec<Release>,
        tags: &[Tag],
        last_date: DateTime<Utc>,
    ) -> Self {
        let (previous_date, previous_tag) = match latest_release(releases) {
            Some(release) => (release.created_at, Some(release.tag_name)),
            None => (repo.created_at, None),
        };

        Window {
            previous_date,
            last_date,
            previous_tag,
            current_tag: tags.first().map(|tag| tag.name.clone()),
        }
    }

    /// `(previous_tag, current_tag)` when both are known
    pub fn compare_range(&self) -> Option<(&str, &str)> {
        match (&self.previous_tag, &self.current_tag) {
            (Some(previous), Some(current)) => Some((previous.as_str(), current.as_str())),
            _ => None,
        }
    }
}

/// The most recently created release. Ties keep the platform's order.
pub fn latest_release(mut releases: Vec<Release>) -> Option<Release> {
    releases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    releases.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn repo() -> RepositoryInfo {
        RepositoryInfo::new("acme/widgets", at(2019, 6, 1))
    }

    #[test]
    fn test_no_releases_uses_repository_creation() {
        let window = Window::determine(&repo(), Vec::new(), &[Tag::new("v0.1")], at(2024, 2, 1));

        assert_eq!(window.previous_date, at(2019, 6, 1));
        assert_eq!(window.previous_tag, None);
        assert_eq!(window.current_tag.as_deref(), Some("v0.1"));
        assert_eq!(window.compare_range(), None);
    }

    #[test]
    fn test_latest_release_sets_lower_bound() {
        let releases = vec![Release::new("v1.0", at(2024, 1, 1))];
        let tags = vec![Tag::new("v1.1"), Tag::new("v1.0")];
        let window = Window::determine(&repo(), releases, &tags, at(2024, 2, 1));

        assert_eq!(window.previous_date, at(2024, 1, 1));
        assert_eq!(window.last_date, at(2024, 2, 1));
        assert_eq!(window.compare_range(), Some(("v1.0", "v1.1")));
    }

    #[test]
    fn test_releases_are_sorted_not_trusted() {
        let releases = vec![
            Release::new("v1.0", at(2023, 5, 1)),
            Release::new("v1.2", at(2024, 1, 1)),
            Release::new("v1.1", at(2023, 9, 1)),
        ];

        let latest = latest_release(releases).unwrap();
        assert_eq!(latest.tag_name, "v1.2");
    }

    #[test]
    fn test_no_tags_leaves_current_tag_absent() {
        let releases = vec![Release::new("v1.0", at(2024, 1, 1))];
        let window = Window::determine(&repo(), releases, &[], at(2024, 2, 1));

        assert_eq!(window.previous_tag.as_deref(), Some("v1.0"));
        assert_eq!(window.current_tag, None);
        assert_eq!(window.compare_range(), None);
    }
}
