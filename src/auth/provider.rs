//! The common interface of auth providers.

use std::collections::HashMap;

/// Anything that can supply the headers an outbound request needs to
/// authenticate. Providers are immutable once built and so may be shared
/// freely between threads.
pub trait AuthProvider: Send + Sync {
    /// Header names mapped to their values, to be merged into every request.
    fn request_headers(&self) -> &HashMap<String, String>;

    /// The raw token, for consumers which pass it along by other means than
    /// headers.
    fn task_token(&self) -> Option<&str>;
}

/// Supplies nothing, leaving requests unauthenticated.
#[derive(Debug, Default)]
pub struct NullAuthProvider {
    headers: HashMap<String, String>,
}

impl AuthProvider for NullAuthProvider {
    fn request_headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn task_token(&self) -> Option<&str> {
        None
    }
}
