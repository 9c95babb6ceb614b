//! Configuration loading
//!
//! Settings come from environment-style keys. A `.env` file in the working
//! directory is read first (via `dotenvy`); values already present in the
//! process environment win.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Env file read when no explicit path is given
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Tracker host, bare hostname without scheme
pub const KEY_HOST: &str = "JIRA_HOST";
/// Login name
pub const KEY_LOGIN: &str = "JIRA_LOGIN";
/// Password
pub const KEY_PASSWORD: &str = "JIRA_PASSWORD";
/// Username the worklogs are recorded for
pub const KEY_USER_NAME: &str = "JIRA_USER_NAME";
/// Display name shown on issue pages
pub const KEY_USER_NAME_HUMAN: &str = "JIRA_USER_NAME_HUMAN";
/// Comma-separated project keys to skip
pub const KEY_EXCLUDE_PROJECTS: &str = "EXCLUDE_PROJECTS";

/// Validated run configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracker hostname, e.g. `jira.example.com`
    pub host: String,
    /// Login name
    pub login: String,
    /// Password
    pub password: String,
    /// API username used as worklog `worker`
    pub user_name: String,
    /// Display name, lower-cased, for matching scraped text
    pub user_name_human: String,
    /// Lower-cased project keys whose rows are skipped
    pub exclude_projects: HashSet<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("login", &self.login)
            .field("password", &"***")
            .field("user_name", &self.user_name)
            .field("user_name_human", &self.user_name_human)
            .field("exclude_projects", &self.exclude_projects)
            .finish()
    }
}

impl Config {
    /// Load `./.env` (if present) or `env_file`, then read the process environment
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let loaded = match env_file {
            Some(path) => dotenvy::from_path(path)
                .map(|()| Some(path.to_path_buf()))
                .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?,
            None => match dotenvy::from_path(DEFAULT_ENV_FILE) {
                Ok(()) => Some(PathBuf::from(DEFAULT_ENV_FILE)),
                Err(e) if e.not_found() => None,
                Err(e) => {
                    return Err(Error::Config(format!(
                        "cannot read {DEFAULT_ENV_FILE}: {e}"
                    )));
                }
            },
        };
        if let Some(path) = loaded {
            debug!(path = %path.display(), "loaded env file");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate a config from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).unwrap_or_default();

        let host = get(KEY_HOST);
        if host.is_empty() || host.starts_with("http://") || host.starts_with("https://") {
            return Err(invalid(KEY_HOST));
        }
        if host.contains('/') || url::Url::parse(&format!("https://{host}")).is_err() {
            return Err(invalid(KEY_HOST));
        }

        let login = required(&get, KEY_LOGIN)?;
        let password = required(&get, KEY_PASSWORD)?;
        let user_name = required(&get, KEY_USER_NAME)?;
        let user_name_human = required(&get, KEY_USER_NAME_HUMAN)?.to_lowercase();

        let exclude_projects = parse_project_list(&get(KEY_EXCLUDE_PROJECTS));

        Ok(Self {
            host,
            login,
            password,
            user_name,
            user_name_human,
            exclude_projects,
        })
    }
}

fn required<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> String,
{
    let value = get(key);
    if value.is_empty() {
        return Err(invalid(key));
    }
    Ok(value)
}

fn invalid(key: &str) -> Error {
    Error::Config(format!("Invalid {key}"))
}

/// Split a comma-separated project list into a lower-cased set
pub fn parse_project_list(value: &str) -> HashSet<String> {
    value
        .split(',')
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}
