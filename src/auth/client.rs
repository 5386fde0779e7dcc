//! Attach a provider's headers to outbound [reqwest] requests.

use super::provider::AuthProvider;
use crate::error::AuthError;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    RequestBuilder,
};

/// Convert a provider's headers to a [HeaderMap]. Values are marked sensitive
/// so that they're omitted from `Debug` output.
pub fn to_header_map<P: AuthProvider + ?Sized>(provider: &P) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::with_capacity(provider.request_headers().len());

    for (k, v) in provider.request_headers() {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|_| AuthError::InvalidHeaderName(k.to_owned()))?;

        let mut value =
            HeaderValue::from_str(v).map_err(|_| AuthError::InvalidHeaderValue(k.to_owned()))?;
        value.set_sensitive(true);

        headers.insert(name, value);
    }

    Ok(headers)
}

/// Authenticate a request, overwriting any of the same headers it already
/// has.
pub fn authenticate<P: AuthProvider + ?Sized>(
    builder: RequestBuilder,
    provider: &P,
) -> Result<RequestBuilder, AuthError> {
    Ok(builder.headers(to_header_map(provider)?))
}
