use std::path::PathBuf;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Bearer token attached to every request, if any.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// JSON file holding user preferences (language).
    pub prefs_path: PathBuf,
}

/// A configuration variable was present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PREFS_PATH: &str = ".stowage-prefs.json";

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default                     |
    /// |--------------------------------|-----------------------------|
    /// | `STOWAGE_API_URL`              | `http://localhost:8000/api` |
    /// | `STOWAGE_API_TOKEN`            | unset                       |
    /// | `STOWAGE_REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `STOWAGE_PREFS_PATH`           | `.stowage-prefs.json`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("STOWAGE_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "STOWAGE_API_URL",
                value: api_url,
                reason: "must start with http:// or https://".into(),
            });
        }

        let api_token = lookup("STOWAGE_API_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let request_timeout_secs = match lookup("STOWAGE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: "STOWAGE_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let prefs_path = lookup("STOWAGE_PREFS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH));

        Ok(Self {
            api_url,
            api_token,
            request_timeout_secs,
            prefs_path,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn trims_trailing_slash_and_blank_token() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("STOWAGE_API_URL", "https://wms.example.com/api/"),
            ("STOWAGE_API_TOKEN", "  "),
            ("STOWAGE_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://wms.example.com/api");
        assert_eq!(config.api_token, None);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn rejects_bad_timeout_and_scheme() {
        let err = ClientConfig::from_lookup(lookup_from(&[(
            "STOWAGE_REQUEST_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("STOWAGE_REQUEST_TIMEOUT_SECS"));

        assert!(
            ClientConfig::from_lookup(lookup_from(&[("STOWAGE_API_URL", "ftp://x")])).is_err()
        );
    }
}
