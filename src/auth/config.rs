//! Typed configuration for static token auth.
//!
//! Configuration usually arrives as loosely typed key/value pairs, either as a
//! map of its own or namespaced within a larger flat set of properties. The
//! recognised keys are:
//!
//! - `header`: the header to authenticate with, defaulting to
//!   [`Authorization`](DEFAULT_HEADER).
//! - `prefix`: the scheme label prepended to the token, defaulting to
//!   [`Basic`](DEFAULT_PREFIX). An empty prefix leaves tokens as they are.
//! - `token`: the secret itself. Required for a provider to authenticate.
//! - `log_token`: how the token appears in logs, see [TokenLogging].

use crate::{auth::redact::redact, error::AuthError};
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{serde_as, DeserializeFromStr, NoneAsEmptyString};
use std::{collections::HashMap, ffi::OsString, str::FromStr};
use tracing::debug;

pub const HEADER: &str = "header";
pub const PREFIX: &str = "prefix";
pub const TOKEN: &str = "token";
pub const LOG_TOKEN: &str = "log_token";

pub const DEFAULT_HEADER: &str = "Authorization";
pub const DEFAULT_PREFIX: &str = "Basic";

/// How a token is logged upon provider construction. Parsed case-insensitively
/// from `off`, `redacted`, or `full`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, DeserializeFromStr)]
pub enum TokenLogging {
    /// Don't mention the token at all.
    Off,
    /// Log a fingerprint which identifies the token without revealing it.
    #[default]
    Redacted,
    /// Log the token verbatim. Only ever appropriate for debugging.
    Full,
}

impl FromStr for TokenLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(TokenLogging::Off),
            "redacted" => Ok(TokenLogging::Redacted),
            "full" => Ok(TokenLogging::Full),
            _ => Err(format!("unknown token logging policy: {}", s)),
        }
    }
}

impl TokenLogging {
    /// The form in which the token should be logged, if at all.
    pub fn render(&self, token: &str) -> Option<String> {
        match self {
            TokenLogging::Off => None,
            TokenLogging::Redacted => Some(redact(token)),
            TokenLogging::Full => Some(token.to_owned()),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default, deserialize_with = "crate::de::scalar_string")]
    pub token: Option<String>,
    #[serde(default)]
    pub log_token: TokenLogging,
}

impl AuthConfig {
    /// Read config from a generic key/value map. Unrecognised keys are
    /// ignored.
    pub fn from_properties(properties: &HashMap<String, Value>) -> Result<Self, AuthError> {
        let obj: Map<String, Value> = properties
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        Ok(serde_json::from_value(Value::Object(obj))?)
    }

    /// Read config from those properties found under `namespace`, for example
    /// `segment.fetcher.auth.token` given the namespace `segment.fetcher.auth`.
    pub fn extract(
        properties: &HashMap<String, Value>,
        namespace: &str,
    ) -> Result<Self, AuthError> {
        let ns = format!("{}.", namespace.trim_end_matches('.'));

        let scoped: HashMap<String, Value> = properties
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&ns).map(|k| (k.to_owned(), v.to_owned())))
            .collect();

        Self::from_properties(&scoped)
    }

    /// Read config from environment variables named after `prefix`, for
    /// example `$FETCHER_AUTH_TOKEN` given the prefix `FETCHER_AUTH`.
    ///
    /// A `.env` file is loaded first if one can be found. Note that this sets
    /// its variables in the process environment, though never overrides those
    /// already set.
    pub fn from_env(prefix: &str) -> Result<Self, AuthError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(_) => debug!("No .env found"),
        }

        Self::from_vars(prefix, std::env::vars_os())
    }

    /// Variables other than our own are skipped without inspection, so needn't
    /// be valid Unicode.
    fn from_vars<I>(prefix: &str, vars: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let var_prefix = format!("{}_", prefix.trim_end_matches('_'));
        let mut properties: HashMap<String, Value> = HashMap::new();

        for (k, v) in vars {
            let Some(name) = k.to_str() else { continue };
            let Some(key) = name.strip_prefix(&var_prefix) else {
                continue;
            };

            let key = key.to_ascii_lowercase();
            if !matches!(key.as_str(), HEADER | PREFIX | TOKEN | LOG_TOKEN) {
                continue;
            }

            let value = v
                .into_string()
                .map_err(|_| AuthError::InvalidConfig(format!("${} is not valid Unicode", name)))?;

            properties.insert(key, Value::String(value));
        }

        Self::from_properties(&properties)
    }

    /// The header to authenticate with.
    pub fn header_name(&self) -> &str {
        self.header.as_deref().unwrap_or(DEFAULT_HEADER)
    }

    /// The scheme label to prepend to the token.
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(v: Value) -> HashMap<String, Value> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_defaults() {
        let c = AuthConfig::from_properties(&props(json!({ "token": "xyz" }))).unwrap();

        assert_eq!(c.header_name(), "Authorization");
        assert_eq!(c.prefix(), "Basic");
        assert_eq!(c.token.as_deref(), Some("xyz"));
        assert_eq!(c.log_token, TokenLogging::Redacted);
    }

    #[test]
    fn test_all_keys() {
        let c = AuthConfig::from_properties(&props(json!({
            "header": "X-Api-Key",
            "prefix": "Bearer",
            "token": "xyz",
            "log_token": "off",
            "unrelated": [1, 2, 3]
        })))
        .unwrap();

        assert_eq!(
            c,
            AuthConfig {
                header: Some("X-Api-Key".to_owned()),
                prefix: Some("Bearer".to_owned()),
                token: Some("xyz".to_owned()),
                log_token: TokenLogging::Off,
            }
        );
    }

    #[test]
    fn test_empty_header_is_default() {
        let c = AuthConfig::from_properties(&props(json!({ "header": "" }))).unwrap();

        assert_eq!(c.header, None);
        assert_eq!(c.header_name(), "Authorization");
    }

    #[test]
    fn test_empty_prefix_is_kept() {
        let c = AuthConfig::from_properties(&props(json!({ "prefix": "" }))).unwrap();

        assert_eq!(c.prefix(), "");
    }

    #[test]
    fn test_non_scalar_token_is_absent() {
        let c = AuthConfig::from_properties(&props(json!({ "token": { "a": 1 } }))).unwrap();

        assert_eq!(c.token, None);
    }

    #[test]
    fn test_bad_log_token() {
        let res = AuthConfig::from_properties(&props(json!({ "log_token": "loud" })));

        assert!(matches!(res, Err(AuthError::InvalidConfig(_))));
    }

    #[test]
    fn test_extract() {
        let p = props(json!({
            "segment.fetcher.auth.token": "xyz",
            "segment.fetcher.auth.prefix": "Bearer",
            "segment.fetcher.timeout": 10,
            "other.auth.token": "abc"
        }));

        let c = AuthConfig::extract(&p, "segment.fetcher.auth").unwrap();
        assert_eq!(c.token.as_deref(), Some("xyz"));
        assert_eq!(c.prefix(), "Bearer");

        let trailing_dot = AuthConfig::extract(&p, "segment.fetcher.auth.").unwrap();
        assert_eq!(trailing_dot, c);

        let missing = AuthConfig::extract(&p, "nothing.here").unwrap();
        assert_eq!(missing, AuthConfig::default());
    }

    #[test]
    fn test_from_vars() {
        let vars = vec![
            ("FETCHER_AUTH_TOKEN".into(), "xyz".into()),
            ("FETCHER_AUTH_HEADER".into(), "X-Api-Key".into()),
            ("FETCHER_AUTH_LOG_TOKEN".into(), "FULL".into()),
            ("FETCHER_AUTH_UNRELATED".into(), "nope".into()),
            ("OTHER_AUTH_TOKEN".into(), "abc".into()),
        ];

        let c = AuthConfig::from_vars("FETCHER_AUTH", vars).unwrap();

        assert_eq!(
            c,
            AuthConfig {
                header: Some("X-Api-Key".to_owned()),
                prefix: None,
                token: Some("xyz".to_owned()),
                log_token: TokenLogging::Full,
            }
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(TokenLogging::Off.render("Basic xyz"), None);
        assert_eq!(
            TokenLogging::Full.render("Basic xyz").as_deref(),
            Some("Basic xyz")
        );

        let redacted = TokenLogging::Redacted.render("Basic xyz").unwrap();
        assert!(redacted.starts_with("Basic <redacted sha256:"));
        assert!(!redacted.contains("xyz"));
    }

    #[test]
    fn test_log_token_any_case() {
        for (raw, expected) in [
            ("off", TokenLogging::Off),
            ("Redacted", TokenLogging::Redacted),
            ("FULL", TokenLogging::Full),
        ] {
            let c = AuthConfig::from_properties(&props(json!({ "log_token": raw }))).unwrap();
            assert_eq!(c.log_token, expected);
        }
    }

    #[cfg(unix)]
    mod non_unicode {
        use super::*;
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        fn garbage() -> OsString {
            OsStr::from_bytes(b"\xff\xfe").to_owned()
        }

        #[test]
        fn test_unrelated_vars_are_skipped() {
            let vars = vec![
                ("UNRELATED".into(), garbage()),
                (garbage(), "xyz".into()),
                ("FETCHER_AUTH_UNRELATED".into(), garbage()),
                ("FETCHER_AUTH_TOKEN".into(), "xyz".into()),
            ];

            let c = AuthConfig::from_vars("FETCHER_AUTH", vars).unwrap();
            assert_eq!(c.token.as_deref(), Some("xyz"));
        }

        #[test]
        fn test_own_var_is_an_error() {
            let vars = vec![("FETCHER_AUTH_TOKEN".into(), garbage())];

            assert_eq!(
                AuthConfig::from_vars("FETCHER_AUTH", vars),
                Err(AuthError::InvalidConfig(
                    "$FETCHER_AUTH_TOKEN is not valid Unicode".to_owned()
                ))
            );
        }

        #[test]
        fn test_from_env_with_non_unicode_environment() {
            std::env::set_var("NON_UNICODE_UNRELATED", garbage());
            std::env::set_var("NON_UNICODE_AUTH_TOKEN", "xyz");

            let c = AuthConfig::from_env("NON_UNICODE_AUTH").unwrap();
            assert_eq!(c.token.as_deref(), Some("xyz"));
        }
    }
}
