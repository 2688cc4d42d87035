//! Configuration module
//!
//! Loads the suite settings from a `config.properties` file and validates
//! them before any scenario runs. Settings are constructed once in `main`
//! and passed down to whatever needs them; there is no global state.

#![allow(dead_code)]

mod env;

pub use env::EnvOverrides;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Keys that must resolve to non-empty values before the suite starts.
pub const REQUIRED_KEYS: [&str; 6] = [
    "base.api.url",
    "api.token",
    "project.name",
    "base.url",
    "username",
    "password",
];

const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors. All of these are fatal: they abort the run before
/// any scenario executes.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No config file found (tried --config, $PORTAL_E2E_CONFIG, ./config.properties and the user config dir)")]
    NotFound,

    #[error("Malformed line {line} in config file: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Missing required config key: {0}")]
    MissingKey(String),

    #[error("Required config key '{0}' is empty")]
    EmptyValue(String),

    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Resolved suite settings.
///
/// Required keys are validated at load time, so the typed accessors are
/// infallible. Unrecognized keys stay reachable through [`Settings::get`].
#[derive(Clone, Debug)]
pub struct Settings {
    base_api_url: String,
    api_token: String,
    project_name: String,
    base_url: String,
    username: String,
    password: String,
    wait_timeout: Duration,
    probe_timeout: Duration,
    http_timeout: Duration,
    headless: bool,
    raw: HashMap<String, String>,
}

impl Settings {
    /// Load settings from a properties file, apply environment overrides,
    /// and validate required keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut map = parse_properties(&content)?;

        let overrides = EnvOverrides::load();
        if overrides.has_any() {
            debug!("Applying environment overrides to {}", path.display());
            overrides.apply(&mut map);
        }

        Self::from_map(map)
    }

    /// Build settings from an already-assembled key/value map.
    pub fn from_map(raw: HashMap<String, String>) -> Result<Self, ConfigError> {
        for key in REQUIRED_KEYS {
            match raw.get(key) {
                None => return Err(ConfigError::MissingKey(key.to_string())),
                Some(v) if v.trim().is_empty() => {
                    return Err(ConfigError::EmptyValue(key.to_string()))
                }
                Some(_) => {}
            }
        }

        let wait_timeout =
            Duration::from_secs(parse_secs(&raw, "wait.timeout.secs", DEFAULT_WAIT_TIMEOUT_SECS)?);
        let probe_timeout = Duration::from_secs(parse_secs(
            &raw,
            "probe.timeout.secs",
            DEFAULT_PROBE_TIMEOUT_SECS,
        )?);
        let http_timeout =
            Duration::from_secs(parse_secs(&raw, "http.timeout.secs", DEFAULT_HTTP_TIMEOUT_SECS)?);
        let headless = parse_bool(&raw, "headless", true)?;

        Ok(Self {
            base_api_url: raw["base.api.url"].clone(),
            api_token: raw["api.token"].clone(),
            project_name: raw["project.name"].clone(),
            base_url: raw["base.url"].clone(),
            username: raw["username"].clone(),
            password: raw["password"].clone(),
            wait_timeout,
            probe_timeout,
            http_timeout,
            headless,
            raw,
        })
    }

    /// Locate the config file: explicit flag, then `$PORTAL_E2E_CONFIG`,
    /// then `./config.properties`, then the user config dir.
    pub fn discover(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Ok(path) = std::env::var("PORTAL_E2E_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let local = PathBuf::from("config.properties");
        if local.exists() {
            return Ok(local);
        }

        if let Some(dir) = dirs::config_dir() {
            let candidate = dir.join("portal-e2e").join("config.properties");
            if candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Raw lookup for keys without a typed accessor.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw.get(key).map(String::as_str)
    }

    pub fn base_api_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Bounded explicit wait used by every browser interaction.
    pub fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }

    /// Short bounded wait used only for branch probes.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Override headless mode (the `--headed` flag wins over file and env)
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Key/value view with secrets masked, for `check-config`.
    pub fn masked_summary(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .raw
            .iter()
            .map(|(k, v)| {
                let value = if k == "api.token" || k == "password" {
                    mask(v)
                } else {
                    v.clone()
                };
                (k.clone(), value)
            })
            .collect();
        entries.sort();
        entries
    }
}

fn mask(value: &str) -> String {
    if value.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &value[..4])
    }
}

/// Parse a `key=value` properties file. `#` and `!` start comment lines.
fn parse_properties(content: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut map = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::MalformedLine {
                line: idx + 1,
                content: trimmed.to_string(),
            });
        };

        map.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(map)
}

fn parse_secs(map: &HashMap<String, String>, key: &str, default: u64) -> Result<u64, ConfigError> {
    match map.get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.clone(),
        }),
    }
}

fn parse_bool(map: &HashMap<String, String>, key: &str, default: bool) -> Result<bool, ConfigError> {
    match map.get(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) if v == "true" || v == "1" => Ok(true),
        Some(v) if v == "false" || v == "0" => Ok(false),
        Some(v) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: v,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_map() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("base.api.url".into(), "http://rp.local:8080/api".into());
        map.insert("api.token".into(), "token-123".into());
        map.insert("project.name".into(), "default_personal".into());
        map.insert("base.url".into(), "http://rp.local:8080/ui".into());
        map.insert("username".into(), "default".into());
        map.insert("password".into(), "1q2w3e".into());
        map
    }

    #[test]
    fn test_parse_properties() {
        let content = "\
# comment
base.url = http://rp.local:8080/ui
username=default

! another comment
password=1q2w3e
";
        let map = parse_properties(content).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["base.url"], "http://rp.local:8080/ui");
        assert_eq!(map["username"], "default");
    }

    #[test]
    fn test_parse_properties_malformed_line() {
        let err = parse_properties("base.url http://nope").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn test_from_map_defaults() {
        let settings = Settings::from_map(valid_map()).unwrap();
        assert_eq!(settings.base_api_url(), "http://rp.local:8080/api");
        assert_eq!(settings.wait_timeout(), Duration::from_secs(10));
        assert_eq!(settings.probe_timeout(), Duration::from_secs(3));
        assert!(settings.headless());
    }

    #[test]
    fn test_from_map_missing_key() {
        let mut map = valid_map();
        map.remove("api.token");
        let err = Settings::from_map(map).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey(ref k) if k == "api.token"));
    }

    #[test]
    fn test_from_map_empty_value() {
        let mut map = valid_map();
        map.insert("password".into(), "  ".into());
        let err = Settings::from_map(map).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(ref k) if k == "password"));
    }

    #[test]
    fn test_from_map_invalid_timeout() {
        let mut map = valid_map();
        map.insert("wait.timeout.secs".into(), "soon".into());
        let err = Settings::from_map(map).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "wait.timeout.secs"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base.api.url=http://rp.local:8080/api").unwrap();
        writeln!(file, "api.token=token-123").unwrap();
        writeln!(file, "project.name=default_personal").unwrap();
        writeln!(file, "base.url=http://rp.local:8080/ui").unwrap();
        writeln!(file, "username=default").unwrap();
        writeln!(file, "password=1q2w3e").unwrap();
        writeln!(file, "wait.timeout.secs=20").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.project_name(), "default_personal");
        assert_eq!(settings.wait_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_load_unreadable_file() {
        let err = Settings::load("/nonexistent/config.properties").unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_masked_summary_hides_secrets() {
        let settings = Settings::from_map(valid_map()).unwrap();
        let summary = settings.masked_summary();

        let token = summary.iter().find(|(k, _)| k == "api.token").unwrap();
        assert_eq!(token.1, "toke****");
        let password = summary.iter().find(|(k, _)| k == "password").unwrap();
        assert!(password.1.ends_with("****"));
        let user = summary.iter().find(|(k, _)| k == "username").unwrap();
        assert_eq!(user.1, "default");
    }

    #[test]
    fn test_get_raw_key() {
        let mut map = valid_map();
        map.insert("launch.marker".into(), "#default_personal/launches/all".into());
        let settings = Settings::from_map(map).unwrap();
        assert_eq!(
            settings.get("launch.marker"),
            Some("#default_personal/launches/all")
        );
        assert_eq!(settings.get("unknown"), None);
    }
}
