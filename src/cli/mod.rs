//! Command-line workflow plumbing

pub mod orchestration;

pub use orchestration::{run_changelog_workflow, ChangelogWorkflowArgs, WorkflowResult};
