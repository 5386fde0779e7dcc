//! Static token authentication for outbound HTTP requests.
//!
//! A token, given literally or via configuration, is turned into a single
//! header which an HTTP client attaches to every request. There's no
//! negotiation, refresh, or validation against a server; the token is assumed
//! to already be valid.
//!
//! See [auth::StaticTokenProvider] for the core, and [auth::make_auth_provider]
//! for picking a provider from (possibly empty) configuration.

pub mod auth;
mod de;
pub mod error;

pub use auth::{
    client::{authenticate, to_header_map},
    config::{AuthConfig, TokenLogging},
    make_auth_provider,
    provider::{AuthProvider, NullAuthProvider},
    static_token::StaticTokenProvider,
};
pub use error::AuthError;
