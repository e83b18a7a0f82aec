//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json};
use serde::{Deserialize, Serialize};

use tlp_core::RegexMatcher;

/// Application configuration.
///
/// Built once at startup and passed by parameter to whatever needs it;
/// there is no process-wide configuration state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pattern extracting a ticket identifier from an entry note.
    #[serde(alias = "ticketRegex")]
    pub ticket_regex: String,
    /// Tracker base URL.
    #[serde(alias = "jiraUrl")]
    pub jira_url: String,
    /// Token passed verbatim in the `authorization` header.
    #[serde(alias = "authorizationToken")]
    pub authorization_token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ticket_regex", &self.ticket_regex)
            .field("jira_url", &self.jira_url)
            .field("authorization_token", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// The config file is required; a missing file is a fatal startup
    /// error, not a fall-through to defaults. `TLP_`-prefixed environment
    /// variables override file values.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => default_config_path().context("failed to determine home directory")?,
        };

        if !path.exists() {
            bail!("couldn't read configuration file at {}", path.display());
        }

        let config: Self = Figment::from(Json::file(&path))
            .merge(Env::prefixed("TLP_"))
            .extract()
            .with_context(|| format!("couldn't parse configuration file at {}", path.display()))?;
        Ok(config)
    }

    /// Compiles the configured ticket pattern.
    pub fn ticket_matcher(&self) -> Result<RegexMatcher> {
        RegexMatcher::new(&self.ticket_regex)
            .with_context(|| format!("invalid ticket pattern {:?}", self.ticket_regex))
    }
}

/// Default config location: a fixed JSON file in the home directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tlp.config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_accepts_camel_case_keys() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            &temp,
            r#"{"ticketRegex": "ABC-\\d+", "jiraUrl": "https://jira.example.com", "authorizationToken": "Basic abc"}"#,
        );
        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.ticket_regex, "ABC-\\d+");
        assert_eq!(config.jira_url, "https://jira.example.com");
        assert_eq!(config.authorization_token, "Basic abc");
    }

    #[test]
    fn load_accepts_snake_case_keys() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            &temp,
            r#"{"ticket_regex": "ABC-\\d+", "jira_url": "https://jira.example.com", "authorization_token": "Basic abc"}"#,
        );
        assert!(Config::load_from(Some(&path)).is_ok());
    }

    #[test]
    fn missing_file_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let err = Config::load_from(Some(&temp.path().join("absent.json"))).unwrap_err();
        assert!(err.to_string().contains("couldn't read configuration file"));
    }

    #[test]
    fn malformed_file_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(&temp, "{ this is not json");
        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn missing_key_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(&temp, r#"{"ticketRegex": "ABC-\\d+"}"#);
        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn invalid_pattern_fails_matcher_compilation() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_config(
            &temp,
            r#"{"ticketRegex": "ABC-[", "jiraUrl": "https://jira.example.com", "authorizationToken": "Basic abc"}"#,
        );
        let config = Config::load_from(Some(&path)).unwrap();
        assert!(config.ticket_matcher().is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let config = Config {
            ticket_regex: "ABC-\\d+".to_string(),
            jira_url: "https://jira.example.com".to_string(),
            authorization_token: "secret".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn default_config_path_is_in_home() {
        let path = default_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), ".tlp.config.json");
    }
}
