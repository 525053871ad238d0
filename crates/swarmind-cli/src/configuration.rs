use crate::error::{to_env_var, ConfigError, ENV_PREFIX};
use config::{Config, Environment};
use serde::Deserialize;
use std::time::Duration;
use swarmind::ApiConfig;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub token: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("namespace", default_namespace())?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            match missing_env_var(&err) {
                Some(env_var) => ConfigError::MissingEnvVar { env_var },
                None => ConfigError::Other(err),
            }
        })
    }

    /// Build the client configuration, letting `namespace` override the environment
    pub fn into_api_config(self, namespace: Option<String>) -> ApiConfig {
        let config = ApiConfig::new(
            self.api_url,
            namespace.unwrap_or(self.namespace),
            self.token,
        );
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Name the environment variable behind a missing settings field
fn missing_env_var(err: &config::ConfigError) -> Option<String> {
    if let config::ConfigError::NotFound(field) = err {
        return Some(to_env_var(field));
    }
    err.to_string()
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
        .map(to_env_var)
}

fn default_namespace() -> String {
    "test".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("LIBSWARMIND_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();
        env::set_var("LIBSWARMIND_API_URL", "http://localhost:8080");
        env::set_var("LIBSWARMIND_TOKEN", "test-token");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.api_url, "http://localhost:8080");
        assert_eq!(settings.token, "test-token");
        assert_eq!(settings.namespace, "test");
        assert_eq!(settings.timeout_secs, None);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("LIBSWARMIND_API_URL", "https://store.example.com/api");
        env::set_var("LIBSWARMIND_TOKEN", "test-token");
        env::set_var("LIBSWARMIND_NAMESPACE", "team-a");
        env::set_var("LIBSWARMIND_TIMEOUT_SECS", "15");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.namespace, "team-a");
        assert_eq!(settings.timeout_secs, Some(15));

        let config = settings.into_api_config(None);
        assert_eq!(config.url, "https://store.example.com/api");
        assert_eq!(config.namespace, "team-a");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        clean_env();
    }

    #[test]
    #[serial]
    fn test_missing_token() {
        clean_env();
        env::set_var("LIBSWARMIND_API_URL", "http://localhost:8080");

        match Settings::new() {
            Err(ConfigError::MissingEnvVar { env_var }) => {
                assert_eq!(env_var, "LIBSWARMIND_TOKEN");
            }
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }

        clean_env();
    }

    #[test]
    fn test_missing_env_var_mapping() {
        let err = config::ConfigError::NotFound("api_url".to_string());
        assert_eq!(missing_env_var(&err).as_deref(), Some("LIBSWARMIND_API_URL"));

        let err = config::ConfigError::Message("missing field `token`".to_string());
        assert_eq!(missing_env_var(&err).as_deref(), Some("LIBSWARMIND_TOKEN"));

        let err = config::ConfigError::Message("invalid type: string".to_string());
        assert_eq!(missing_env_var(&err), None);
    }

    #[test]
    fn test_namespace_flag_wins() {
        let settings = Settings {
            api_url: "http://localhost:8080".to_string(),
            token: "t".to_string(),
            namespace: "test".to_string(),
            timeout_secs: None,
        };
        let config = settings.into_api_config(Some("other".to_string()));
        assert_eq!(config.namespace, "other");
        assert_eq!(config.timeout, None);
    }
}
