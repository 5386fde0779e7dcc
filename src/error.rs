use std::fmt;

/// Sum type representing every possible unexceptional fail state.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// A required configuration key was absent, or its value couldn't be read
    /// as a string.
    MissingKey(&'static str),
    InvalidHeaderName(String),
    /// Carries the header name only; the value is a secret.
    InvalidHeaderValue(String),
    InvalidConfig(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::InvalidConfig(e.to_string())
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            AuthError::MissingKey(k) => format!("Missing auth config key: {}", k),
            AuthError::InvalidHeaderName(h) => format!("Invalid auth header name: {}", h),
            AuthError::InvalidHeaderValue(h) => format!("Invalid value for auth header: {}", h),
            AuthError::InvalidConfig(e) => format!("Invalid auth config: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for AuthError {}
