use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_POSTAL_LOOKUP_URL: &str = "https://api.postalpincode.in";

pub const BACKEND_URL_ENV: &str = "REGISTRATION_BACKEND_URL";
pub const POSTAL_LOOKUP_URL_ENV: &str = "POSTAL_LOOKUP_URL";
pub const TIMEOUT_SECS_ENV: &str = "REGISTRATION_TIMEOUT_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Endpoints and transport settings for the three outbound services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub backend_url: String,
    pub postal_lookup_url: String,
    /// No timeout when unset; a hung call then never reports an error.
    pub timeout_secs: Option<u64>,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            postal_lookup_url: DEFAULT_POSTAL_LOOKUP_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl RegistrationConfig {
    /// Defaults overridden by `REGISTRATION_BACKEND_URL`, `POSTAL_LOOKUP_URL`
    /// and `REGISTRATION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded registration config from {}", path.display());
        Ok(config.normalized())
    }

    /// Applies overrides from any key lookup, the environment being the usual one.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV) {
            self.backend_url = url;
        }
        if let Some(url) = lookup(POSTAL_LOOKUP_URL_ENV) {
            self.postal_lookup_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: TIMEOUT_SECS_ENV,
                value: raw.clone(),
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self.normalized())
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self.normalized()
    }

    pub fn with_postal_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.postal_lookup_url = url.into();
        self.normalized()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn normalized(mut self) -> Self {
        self.backend_url = self.backend_url.trim_end_matches('/').to_string();
        self.postal_lookup_url = self.postal_lookup_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegistrationConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.postal_lookup_url, "https://api.postalpincode.in");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_overrides_apply_and_trim_slashes() {
        let config = RegistrationConfig::default()
            .with_overrides(lookup_from(&[
                (BACKEND_URL_ENV, "http://backend.test/"),
                (TIMEOUT_SECS_ENV, "15"),
            ]))
            .unwrap();

        assert_eq!(config.backend_url, "http://backend.test");
        assert_eq!(config.postal_lookup_url, DEFAULT_POSTAL_LOOKUP_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = RegistrationConfig::default()
            .with_overrides(lookup_from(&[(TIMEOUT_SECS_ENV, "soon")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == TIMEOUT_SECS_ENV));
    }

    #[test]
    fn test_yaml_file_with_partial_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend_url: http://yaml.backend:9000/").unwrap();
        writeln!(file, "timeout_secs: 5").unwrap();

        let config = RegistrationConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.backend_url, "http://yaml.backend:9000");
        assert_eq!(config.postal_lookup_url, DEFAULT_POSTAL_LOOKUP_URL);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_missing_yaml_file() {
        let err = RegistrationConfig::from_yaml_file(Path::new("/nonexistent/registration.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
