//! Keep tokens out of logs whilst still letting operators tell them apart.

use sha2::{Digest, Sha256};

/// Bytes of the digest shown in a redacted token.
const FINGERPRINT_LEN: usize = 4;

/// Longest word still taken to be a scheme label rather than part of the
/// secret. The registered schemes are all well within this.
const MAX_SCHEME_LEN: usize = 16;

/// Replace a token with a short fingerprint of its SHA-256 digest, keeping its
/// scheme label if it has one, e.g. `Basic <redacted sha256:ba7816bf>`.
pub fn redact(token: &str) -> String {
    let redacted = format!("<redacted sha256:{}>", fingerprint(token));

    match scheme(token) {
        Some(s) => format!("{} {}", s, redacted),
        None => redacted,
    }
}

/// The leading word of a token, if it looks like an auth scheme such as
/// `Basic` or `Bearer` and there's something after it.
///
/// <https://www.iana.org/assignments/http-authschemes/http-authschemes.xhtml>
fn scheme(token: &str) -> Option<&str> {
    let (s, rest) = token.split_once(' ')?;

    let is_scheme = !s.is_empty()
        && s.len() <= MAX_SCHEME_LEN
        && s.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
        && !rest.is_empty();

    is_scheme.then_some(s)
}

fn fingerprint(token: &str) -> String {
    Sha256::digest(token.as_bytes())
        .iter()
        .take(FINGERPRINT_LEN)
        .map(|b| format!("{:02x}", b))
        .collect()
}
