//! Credential and environment loading.

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ReleaseNotesError, Result};

pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";
pub const GITHUB_ACTIONS_VAR: &str = "GITHUB_ACTIONS";

/// True when running inside a GitHub Actions job
pub fn running_in_actions() -> bool {
    env::var(GITHUB_ACTIONS_VAR).is_ok_and(|value| value == "true")
}

/// Load a local `.env` file unless running inside GitHub Actions.
///
/// A missing `.env` is not an error. Returns the file that was loaded.
pub fn load_dotenv_unless_actions() -> Option<PathBuf> {
    if running_in_actions() {
        return None;
    }

    let loaded = dotenvy::dotenv().ok();
    if let Some(path) = &loaded {
        debug!(path = %path.display(), "loaded environment file");
    }
    loaded
}

/// Read the API token from `AUTH_TOKEN`. Unset or blank is an error.
pub fn auth_token() -> Result<String> {
    match env::var(AUTH_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ReleaseNotesError::MissingCredential),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_auth_token_present() {
        env::set_var(AUTH_TOKEN_VAR, "ghp_example\n");
        assert_eq!(auth_token().unwrap(), "ghp_example");
        env::remove_var(AUTH_TOKEN_VAR);
    }

    #[test]
    #[serial]
    fn test_auth_token_missing() {
        env::remove_var(AUTH_TOKEN_VAR);
        assert!(matches!(auth_token(), Err(ReleaseNotesError::MissingCredential)));
    }

    #[test]
    #[serial]
    fn test_auth_token_blank() {
        env::set_var(AUTH_TOKEN_VAR, "   ");
        assert!(matches!(auth_token(), Err(ReleaseNotesError::MissingCredential)));
        env::remove_var(AUTH_TOKEN_VAR);
    }

    #[test]
    #[serial]
    fn test_running_in_actions_requires_literal_true() {
        env::set_var(GITHUB_ACTIONS_VAR, "true");
        assert!(running_in_actions());
        assert_eq!(load_dotenv_unless_actions(), None);

        env::set_var(GITHUB_ACTIONS_VAR, "TRUE");
        assert!(!running_in_actions());

        env::remove_var(GITHUB_ACTIONS_VAR);
        assert!(!running_in_actions());
    }
}
