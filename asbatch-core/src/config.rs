use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::client::ConnectParams;
use crate::error::{BatchError, Result};

fn default_workers() -> usize {
    8
}

fn default_repositories() -> Vec<i64> {
    vec![2, 3, 6]
}

fn default_finding_aids_base() -> String {
    "https://findingaids.library.nyu.edu".to_string()
}

fn default_repository_codes() -> BTreeMap<i64, String> {
    BTreeMap::from([
        (2, "tamwag".to_string()),
        (3, "fales".to_string()),
        (6, "archives".to_string()),
    ])
}

fn default_delete_pattern() -> String {
    "electronic records".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

/// Connection settings for one named environment (dev, stage, prod, ...).
#[derive(Clone, Debug, Deserialize)]
pub struct Environment {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Environment {
    pub fn connect_params(&self) -> ConnectParams {
        ConnectParams {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Number of workers, and therefore chunks, per run.
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub default_environment: Option<String>,
    /// Repositories whose records are enumerated, in this order.
    #[serde(default = "default_repositories")]
    pub repositories: Vec<i64>,
    #[serde(default = "default_finding_aids_base")]
    pub finding_aids_base: String,
    /// Repository id → short code used in finding-aid URLs.
    #[serde(default = "default_repository_codes")]
    pub repository_codes: BTreeMap<i64, String>,
    /// Case-insensitive pattern marking top containers for deletion.
    #[serde(default = "default_delete_pattern")]
    pub delete_pattern: String,
    pub environments: BTreeMap<String, Environment>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_yaml(&text)?;
        debug!(path = %path.display(), envs = cfg.environments.len(), "config loaded");
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(BatchError::Config("workers must be at least 1".into()));
        }
        if self.repositories.is_empty() {
            return Err(BatchError::Config("no repositories configured".into()));
        }
        if self.environments.is_empty() {
            return Err(BatchError::Config("no environments configured".into()));
        }
        Ok(())
    }

    /// Resolve an environment by name. Without a name, fall back to
    /// `default_environment`, then to the only environment if there is one.
    pub fn environment(&self, name: Option<&str>) -> Result<&Environment> {
        let Some(name) = name.or(self.default_environment.as_deref()) else {
            let mut envs = self.environments.values();
            return match (envs.next(), envs.next()) {
                (Some(only), None) => Ok(only),
                _ => Err(BatchError::Config(
                    "several environments configured; pass --environment or set default_environment"
                        .into(),
                )),
            };
        };
        self.environments
            .get(name)
            .ok_or_else(|| BatchError::Config(format!("unknown environment: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
workers: 4
default_environment: dev
repositories: [2, 5]
finding_aids_base: https://fa.example.org/
repository_codes: {2: tamwag, 5: nyhs}
delete_pattern: born digital
environments:
  dev:
    url: http://localhost:8089
    username: admin
    password: admin
  prod:
    url: https://aspace.example.org/api
    username: batch
    password: s3cret
    timeout_secs: 60
"#;

    #[test]
    fn parses_all_keys() {
        let c = Config::from_yaml(FULL).unwrap();
        assert_eq!(c.workers, 4);
        assert_eq!(c.repositories, vec![2, 5]);
        assert_eq!(c.repository_codes.get(&5).map(String::as_str), Some("nyhs"));
        assert_eq!(c.delete_pattern, "born digital");
        assert_eq!(c.environment(Some("prod")).unwrap().timeout_secs, 60);
        assert_eq!(c.environment(None).unwrap().url, "http://localhost:8089");
        assert_eq!(c.environment(Some("dev")).unwrap().timeout_secs, 20);
    }

    #[test]
    fn defaults_fill_missing_keys() {
        let c = Config::from_yaml(
            "environments:\n  only:\n    url: http://a\n    username: u\n    password: p\n",
        )
        .unwrap();
        assert_eq!(c.workers, 8);
        assert_eq!(c.repositories, vec![2, 3, 6]);
        assert_eq!(c.delete_pattern, "electronic records");
        assert_eq!(c.repository_codes.len(), 3);
        assert_eq!(c.environment(None).unwrap().url, "http://a");
    }

    #[test]
    fn unknown_environment_is_config_error() {
        let c = Config::from_yaml(FULL).unwrap();
        assert!(matches!(
            c.environment(Some("staging")),
            Err(BatchError::Config(_))
        ));
    }

    #[test]
    fn ambiguous_environment_is_config_error() {
        let mut c = Config::from_yaml(FULL).unwrap();
        c.default_environment = None;
        assert!(matches!(c.environment(None), Err(BatchError::Config(_))));
    }

    #[test]
    fn zero_workers_rejected() {
        let text = FULL.replace("workers: 4", "workers: 0");
        assert!(matches!(
            Config::from_yaml(&text),
            Err(BatchError::Config(_))
        ));
    }

    #[test]
    fn bad_yaml_is_yaml_error() {
        assert!(matches!(
            Config::from_yaml("workers: [unterminated"),
            Err(BatchError::Yaml(_))
        ));
    }
}
