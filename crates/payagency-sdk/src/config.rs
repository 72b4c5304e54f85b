/*
[INPUT]:  Optional config file (YAML/TOML/JSON) and PAYAGENCY_* environment variables
[OUTPUT]: Validated ClientConfig
[POS]:    Configuration layer - credential loading
[UPDATE]: When adding configuration options
*/

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::http::{ClientConfig, PayAgencyError, Result};

pub const ENV_PREFIX: &str = "PAYAGENCY";

/// Raw settings as read from file and environment
#[derive(Debug, Default, Deserialize)]
struct Settings {
    encryption_key: Option<String>,
    secret_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load from `PAYAGENCY_ENCRYPTION_KEY`, `PAYAGENCY_SECRET_KEY`,
    /// `PAYAGENCY_BASE_URL` and `PAYAGENCY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        load(None, None)
    }

    /// Load from a config file, with environment variables taking precedence
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load(Some(path.as_ref()), None)
    }
}

fn load(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<ClientConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).source(env));

    let settings: Settings = builder
        .build()
        .and_then(|cfg| cfg.try_deserialize())
        .map_err(|e| PayAgencyError::Config(format!("failed to load settings: {e}")))?;

    settings.into_client_config()
}

impl Settings {
    fn into_client_config(self) -> Result<ClientConfig> {
        let encryption_key = self
            .encryption_key
            .ok_or_else(|| missing("encryption_key"))?;
        let secret_key = self.secret_key.ok_or_else(|| missing("secret_key"))?;

        let mut config = ClientConfig::new(encryption_key, secret_key);
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }
}

fn missing(field: &str) -> PayAgencyError {
    PayAgencyError::Config(format!(
        "{field} is required (set {ENV_PREFIX}_{})",
        field.to_uppercase()
    ))
}
