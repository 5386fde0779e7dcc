//! Providers of the headers with which outbound requests authenticate.
//!
//! The only provider which actually authenticates is the
//! [static token provider](static_token::StaticTokenProvider). Absent any
//! configured token, [NullAuthProvider] stands in so that callers needn't
//! special-case unauthenticated deployments.

pub mod client;
pub mod config;
pub mod provider;
mod redact;
pub mod static_token;

use self::{config::AuthConfig, provider::*, static_token::StaticTokenProvider};
use crate::error::AuthError;
use tracing::debug;

/// Pick a provider for the given configuration. A token makes for a
/// [StaticTokenProvider]; anything less, including no configuration at all,
/// makes for a [NullAuthProvider].
pub fn make_auth_provider(
    config: Option<&AuthConfig>,
) -> Result<Box<dyn AuthProvider>, AuthError> {
    match config {
        Some(c) if c.token.is_some() => {
            debug!("Using static token auth provider");
            Ok(Box::new(StaticTokenProvider::from_config(c)?))
        }
        _ => {
            debug!("No auth token configured, requests will be unauthenticated");
            Ok(Box::new(NullAuthProvider::default()))
        }
    }
}
