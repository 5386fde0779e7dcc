//! Authenticate with a fixed token, typically one handed to a job or carried
//! over from a deployment which predates any richer auth.

use super::{
    config::{AuthConfig, TokenLogging, DEFAULT_HEADER, TOKEN},
    provider::AuthProvider,
};
use crate::error::AuthError;
use base64::{engine::general_purpose::STANDARD as b64, Engine};
use reqwest::header::HeaderName;
use std::{collections::HashMap, fmt};
use tracing::{info, warn};

/// A provider whose single header never changes.
// `headers` always holds exactly one entry, whose value is `token`.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
    headers: HashMap<String, String>,
}

impl StaticTokenProvider {
    /// Use the token verbatim as the value of the `Authorization` header.
    pub fn from_literal<T: ToString>(token: T) -> Self {
        Self::from_literal_with(token, TokenLogging::default())
    }

    /// As [Self::from_literal], logging the token as per `logging`.
    pub fn from_literal_with<T: ToString>(token: T, logging: TokenLogging) -> Self {
        let token = token.to_string();
        log_token("directly passed", &token, logging);

        Self::new(DEFAULT_HEADER.to_owned(), token)
    }

    /// Authenticate with HTTP Basic credentials.
    ///
    /// <https://datatracker.ietf.org/doc/html/rfc7617#section-2>
    pub fn from_basic_credentials(username: &str, password: &str) -> Self {
        Self::from_literal(basic_token(username, password))
    }

    /// Build from config, prepending the configured prefix to the token
    /// unless it's already there.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let raw = config.token.as_deref().ok_or(AuthError::MissingKey(TOKEN))?;

        let header = config.header_name();
        HeaderName::from_bytes(header.as_bytes())
            .map_err(|_| AuthError::InvalidHeaderName(header.to_owned()))?;

        let token = with_prefix(config.prefix(), raw);
        log_token("from config", &token, config.log_token);

        Ok(Self::new(header.to_owned(), token))
    }

    fn new(header: String, token: String) -> Self {
        let headers = HashMap::from([(header, token.clone())]);

        Self { token, headers }
    }

    /// The header name mapped to the token.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Format without the token.
impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("header", &self.headers.keys().next())
            .finish_non_exhaustive()
    }
}

impl AuthProvider for StaticTokenProvider {
    fn request_headers(&self) -> &HashMap<String, String> {
        self.headers()
    }

    fn task_token(&self) -> Option<&str> {
        Some(self.token())
    }
}

/// Prepend `prefix` and a space to `token`, unless `token` already starts with
/// `prefix`.
///
/// ```text
/// with_prefix("Basic", "xyz")       == "Basic xyz"
/// with_prefix("Basic", "Basic xyz") == "Basic xyz"
/// ```
fn with_prefix(prefix: &str, token: &str) -> String {
    if token.starts_with(prefix) {
        token.to_owned()
    } else {
        format!("{} {}", prefix, token)
    }
}

fn basic_token(username: &str, password: &str) -> String {
    format!("Basic {}", b64.encode(format!("{}:{}", username, password)))
}

fn log_token(source: &str, token: &str, logging: TokenLogging) {
    if logging == TokenLogging::Full {
        warn!("Logging auth token verbatim, use redacted logging outside of debugging");
    }

    if let Some(x) = logging.render(token) {
        info!("Auth token {} is {}", source, x);
    }
}
