use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ReleaseNotesError, Result};

/// Name of the project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "releasenotes.toml";

/// Name of the per-user configuration file inside the user config directory.
pub const USER_CONFIG_FILE: &str = ".releasenotes.toml";

/// Represents the complete configuration for release-notes.
///
/// Contains the API endpoints used to talk to the hosting platform and the
/// settings that shape the generated changelog.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_file_name() -> String {
    "body.txt".to_string()
}

/// Endpoints and paging for the GitHub REST API.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL used when building compare links in the report
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Page size requested from list endpoints (the API caps it at 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            web_url: default_web_url(),
            per_page: default_per_page(),
        }
    }
}

/// Settings for the changelog itself.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    /// Pull requests are only collected when merged into this branch
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Output file used when `--file-name` is not given
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            base_branch: default_base_branch(),
            file_name: default_file_name(),
        }
    }
}

/// Locates the configuration file to use, if any.
///
/// Resolution order:
/// 1. Custom path provided as parameter
/// 2. `releasenotes.toml` in current directory
/// 3. `.releasenotes.toml` in the user config directory
fn locate_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = Path::new(".").join(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}

/// Loads configuration from file or returns defaults.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file was found (or named explicitly) but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let Some(path) = locate_config(config_path) else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseNotesError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| ReleaseNotesError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(contents)
}
