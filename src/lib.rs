pub mod cli;
pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod generator;
pub mod github;
pub mod report;
pub mod ui;

pub use error::{ErrorKind, ReleaseNotesError, Result};
pub use generator::generate;
