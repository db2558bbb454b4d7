//! Token types for OAuth2 authentication.

use std::fmt;

/// An access token for authenticated task API requests.
///
/// Access tokens are short-lived and used in `Authorization: Bearer` headers.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Create a new access token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A long-lived refresh token for obtaining new access tokens.
///
/// Refresh tokens are issued once by the interactive authorization flow and
/// persisted externally (keyed by account identifier). They are replaced
/// wholesale on re-authorization, never mutated.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct RefreshToken(pub(crate) String);

impl RefreshToken {
    /// Create a refresh token from its stored string form.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests and persistence.
    ///
    /// # Security
    ///
    /// Use only when constructing token refresh requests or writing to
    /// secret storage.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("ya29.a0AfH6SMBx...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("ya29"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn refresh_token_hides_value_in_debug() {
        let token = RefreshToken::new("1//0gRefreshTokenValue");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("1//0g"));
        assert!(debug.contains("[REDACTED]"));
    }
}
