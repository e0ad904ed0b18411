//! Domain logic - pure changelog rules independent of the hosting API

pub mod changelog;
pub mod classify;
pub mod window;

pub use changelog::Changelog;
pub use classify::{
    classify_open_issue, closed_issues, finished_pull_requests, scan_closed_issues,
    split_open_issues, OpenIssueClass,
};
pub use window::{latest_release, Window};
