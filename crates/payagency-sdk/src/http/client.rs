/*
[INPUT]:  Client configuration (keys, base URL, timeout) and per-call request envelopes
[OUTPUT]: Decoded JSON responses or normalized errors
[POS]:    HTTP layer - request pipeline (encryption, auth, dispatch, decoding)
[UPDATE]: When changing request encryption, headers or error translation
*/

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::http::encryption::PayloadEncryptor;
use crate::http::{PayAgencyError, Result};
use crate::types::{Environment, RequestEnvelope};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://backend.pay.agency";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const SKIP_ENCRYPTION_PARAM: &str = "Skip-Encryption";

const LOG_BODY_MAX_BYTES: usize = 1024;

/// Credentials and connection settings for a client instance
#[derive(Clone)]
pub struct ClientConfig {
    pub encryption_key: String,
    pub secret_key: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(encryption_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            encryption_key: encryption_key.into(),
            secret_key: secret_key.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Environment implied by the secret key
    pub fn environment(&self) -> Environment {
        Environment::from_secret_key(&self.secret_key)
    }

    /// Base URL forced onto https with no trailing slash
    pub fn resolved_base_url(&self) -> Result<String> {
        match self.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => normalize_base_url(url),
            _ => Ok(DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.encryption_key.is_empty() || self.secret_key.is_empty() {
            return Err(PayAgencyError::Config(
                "both encryption_key and secret_key are required".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(PayAgencyError::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("encryption_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Force `https://` and strip trailing slashes.
///
/// Schemes match case-insensitively; anything other than http/https is rejected,
/// as is a URL without a host.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let rest = match trimmed.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => {
            if !scheme.eq_ignore_ascii_case("https") && !scheme.eq_ignore_ascii_case("http") {
                return Err(PayAgencyError::Config(format!(
                    "unsupported base_url scheme '{scheme}'"
                )));
            }
            rest
        }
        _ => trimmed,
    };

    let normalized = format!("https://{}", rest.trim_end_matches('/'));
    let url = Url::parse(&normalized)
        .map_err(|e| PayAgencyError::Config(format!("invalid base_url '{raw}': {e}")))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(PayAgencyError::Config(format!("base_url '{raw}' has no host")));
    }
    Ok(normalized)
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Transport client shared by all API modules.
///
/// Holds only immutable state, so one instance can serve concurrent calls.
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    environment: Environment,
    encryptor: PayloadEncryptor,
}

impl ApiClient {
    /// Create a client against the configured (or default) base URL
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.resolved_base_url()?;
        Self::with_config_and_base_url(config, &base_url)
    }

    /// Create a client against `base_url` exactly as given, without forcing https.
    ///
    /// Meant for local mock servers.
    #[doc(hidden)]
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        config.validate()?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.secret_key))
            .map_err(|_| {
                PayAgencyError::Config("secret_key contains invalid header characters".to_string())
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, authorization);

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| PayAgencyError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url.trim_end_matches('/'))?,
            environment: config.environment(),
            encryptor: PayloadEncryptor::new(&config.encryption_key),
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Dispatch a request and decode the JSON response.
    ///
    /// Bodies are encrypted unless the envelope opts out, in which case the
    /// `Skip-Encryption=true` query parameter is attached instead.
    pub async fn send<T: DeserializeOwned>(&self, envelope: RequestEnvelope) -> Result<T> {
        let encrypt = envelope.should_encrypt();
        let RequestEnvelope {
            operation,
            method,
            path,
            json_body,
            query_params,
            skip_encryption,
        } = envelope;
        let label = operation.label();

        let body = match json_body {
            Some(body) if encrypt => Some(self.encrypt_body(&body)?),
            other => other,
        };

        let mut query: Vec<(String, String)> = query_params.into_iter().collect();
        if skip_encryption {
            query.push((SKIP_ENCRYPTION_PARAM.to_string(), "true".to_string()));
        }

        let url = self.base_url.join(&path)?;
        let mut builder = self.http_client.request(method.clone(), url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        debug!(
            operation = label,
            method = %method,
            path = %path,
            env = %self.environment,
            encrypted = encrypt,
            "dispatching payagency request"
        );

        let response = builder.send().await.map_err(|err| {
            warn!(operation = label, error = %err, "payagency request failed");
            PayAgencyError::transport(label, err)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            warn!(
                operation = label,
                status = status.as_u16(),
                body = %body
                    .as_deref()
                    .map(|b| truncate_for_log(b, LOG_BODY_MAX_BYTES))
                    .unwrap_or_default(),
                "payagency request rejected"
            );
            return Err(PayAgencyError::rejected(label, status, body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| PayAgencyError::transport(label, err))?;
        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(operation = label, error = %source, "payagency response is not valid json");
            PayAgencyError::ResponseDecode {
                operation: label,
                source,
            }
        })
    }

    /// Replace a plaintext body with `{"payload": "<iv>:<ciphertext>"}`
    pub fn encrypt_body(&self, body: &Value) -> Result<Value> {
        let plaintext = serde_json::to_string(body)?;
        let payload = self.encryptor.encrypt(&plaintext)?;
        Ok(payload.to_request_body())
    }

    #[cfg(test)]
    pub(crate) fn encryptor(&self) -> &PayloadEncryptor {
        &self.encryptor
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}
