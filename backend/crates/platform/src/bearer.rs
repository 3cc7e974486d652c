//! Bearer Token Extraction
//!
//! Parses `Authorization: Bearer <token>` (RFC 6750) from request headers.

use http::{HeaderMap, header};
use thiserror::Error;

/// Authentication scheme name, matched case-insensitively
const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not a Bearer credential")]
    Malformed,
}

/// Extract the bearer token from the `Authorization` header
///
/// Rejects non-visible-ASCII header values, other schemes, empty tokens and
/// tokens containing whitespace. Multiple `Authorization` headers are
/// ambiguous and rejected as malformed.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();

    let value = values.next().ok_or(BearerError::Missing)?;
    if values.next().is_some() {
        return Err(BearerError::Malformed);
    }

    let value = value.to_str().map_err(|_| BearerError::Malformed)?;
    let (scheme, token) = value.trim().split_once(' ').ok_or(BearerError::Malformed)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::Malformed);
    }

    let token = token.trim_start();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}
