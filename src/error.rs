use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-notes operations
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("AUTH_TOKEN environment variable not set.")]
    MissingCredential,

    #[error("Repository not found for {organization}/{repository}")]
    RepositoryNotFound {
        organization: String,
        repository: String,
        /// The failure that made resolution give up, if it was not a plain 404
        cause: Option<String>,
    },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {url}: {message}")]
    Api {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

/// Coarse classification of fatal errors, ordered by the stage that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorKind {
    Config,
    CredentialMissing,
    RepositoryNotFound,
    NetworkFailure,
    WriteFailure,
}

impl ErrorKind {
    /// Process exit status reported for this kind of failure
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Config => 1,
            ErrorKind::CredentialMissing => 2,
            ErrorKind::RepositoryNotFound => 3,
            ErrorKind::NetworkFailure => 4,
            ErrorKind::WriteFailure => 5,
        }
    }
}

impl ReleaseNotesError {
    /// Create a repository-not-found error for an organization/repository pair
    pub fn repository_not_found(organization: impl Into<String>, repository: impl Into<String>) -> Self {
        ReleaseNotesError::RepositoryNotFound {
            organization: organization.into(),
            repository: repository.into(),
            cause: None,
        }
    }

    /// Attach the underlying failure to a repository-not-found error
    pub fn with_cause(self, cause: impl ToString) -> Self {
        match self {
            ReleaseNotesError::RepositoryNotFound {
                organization,
                repository,
                ..
            } => ReleaseNotesError::RepositoryNotFound {
                organization,
                repository,
                cause: Some(cause.to_string()),
            },
            other => other,
        }
    }

    /// Extra context worth showing below the main message
    pub fn detail(&self) -> Option<&str> {
        match self {
            ReleaseNotesError::RepositoryNotFound { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }

    /// Create a write error for the given output path
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReleaseNotesError::Write {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ReleaseNotesError::MissingCredential => ErrorKind::CredentialMissing,
            ReleaseNotesError::RepositoryNotFound { .. } => ErrorKind::RepositoryNotFound,
            ReleaseNotesError::Network(_)
            | ReleaseNotesError::Api { .. }
            | ReleaseNotesError::Decode { .. } => ErrorKind::NetworkFailure,
            ReleaseNotesError::Write { .. } => ErrorKind::WriteFailure,
            ReleaseNotesError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
