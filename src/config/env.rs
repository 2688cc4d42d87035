//! Environment variable configuration
//!
//! Provides environment variable overrides for the properties file.

use std::collections::HashMap;
use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "PORTAL_E2E";

/// Overrides read from the environment. Any value set here wins over the
/// corresponding properties-file key.
#[derive(Clone, Debug, Default)]
pub struct EnvOverrides {
    /// API base URL from PORTAL_E2E_API_URL
    pub base_api_url: Option<String>,
    /// UI base URL from PORTAL_E2E_BASE_URL
    pub base_url: Option<String>,
    /// Auth token from PORTAL_E2E_TOKEN
    pub api_token: Option<String>,
    /// Project name from PORTAL_E2E_PROJECT
    pub project_name: Option<String>,
    /// Username from PORTAL_E2E_USERNAME
    pub username: Option<String>,
    /// Password from PORTAL_E2E_PASSWORD
    pub password: Option<String>,
    /// HTTP timeout from PORTAL_E2E_TIMEOUT
    pub http_timeout_secs: Option<u64>,
    /// Headless mode from PORTAL_E2E_HEADLESS
    pub headless: Option<bool>,
}

impl EnvOverrides {
    /// Load overrides from the environment
    pub fn load() -> Self {
        Self {
            base_api_url: get_env("API_URL"),
            base_url: get_env("BASE_URL"),
            api_token: get_env("TOKEN"),
            project_name: get_env("PROJECT"),
            username: get_env("USERNAME"),
            password: get_env("PASSWORD"),
            http_timeout_secs: get_env_parse("TIMEOUT"),
            headless: get_env_bool("HEADLESS"),
        }
    }

    /// Check if any override is set
    pub fn has_any(&self) -> bool {
        self.base_api_url.is_some()
            || self.base_url.is_some()
            || self.api_token.is_some()
            || self.project_name.is_some()
            || self.username.is_some()
            || self.password.is_some()
            || self.http_timeout_secs.is_some()
            || self.headless.is_some()
    }

    /// Fold the overrides into a properties map
    pub fn apply(&self, map: &mut HashMap<String, String>) {
        let pairs = [
            ("base.api.url", &self.base_api_url),
            ("base.url", &self.base_url),
            ("api.token", &self.api_token),
            ("project.name", &self.project_name),
            ("username", &self.username),
            ("password", &self.password),
        ];

        for (key, value) in pairs {
            if let Some(value) = value {
                map.insert(key.to_string(), value.clone());
            }
        }

        if let Some(secs) = self.http_timeout_secs {
            map.insert("http.timeout.secs".to_string(), secs.to_string());
        }
        if let Some(headless) = self.headless {
            map.insert("headless".to_string(), headless.to_string());
        }
    }
}

fn get_env(suffix: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{suffix}")).ok()
}

fn get_env_parse<T: std::str::FromStr>(suffix: &str) -> Option<T> {
    get_env(suffix).and_then(|v| v.parse().ok())
}

fn get_env_bool(suffix: &str) -> Option<bool> {
    get_env(suffix).map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_map_values() {
        let overrides = EnvOverrides {
            api_token: Some("env-token".into()),
            http_timeout_secs: Some(45),
            headless: Some(false),
            ..Default::default()
        };

        let mut map = HashMap::new();
        map.insert("api.token".to_string(), "file-token".to_string());

        assert!(overrides.has_any());
        overrides.apply(&mut map);

        assert_eq!(map["api.token"], "env-token");
        assert_eq!(map["http.timeout.secs"], "45");
        assert_eq!(map["headless"], "false");
    }

    #[test]
    fn test_empty_overrides_leave_map_untouched() {
        let overrides = EnvOverrides::default();
        let mut map = HashMap::new();
        map.insert("username".to_string(), "default".to_string());

        assert!(!overrides.has_any());
        overrides.apply(&mut map);

        assert_eq!(map.len(), 1);
        assert_eq!(map["username"], "default");
    }

    #[test]
    fn test_load_reads_prefixed_vars() {
        env::set_var("PORTAL_E2E_PROJECT", "env_project");
        let overrides = EnvOverrides::load();
        assert_eq!(overrides.project_name.as_deref(), Some("env_project"));
        env::remove_var("PORTAL_E2E_PROJECT");
    }
}
