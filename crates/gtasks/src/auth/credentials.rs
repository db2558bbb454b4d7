//! OAuth2 installed-application credentials.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Error};

/// The OAuth2 identity of an installed application.
///
/// Loaded once from a `credentials.json` file (the format Google's developer
/// console produces for installed applications) and immutable afterwards.
///
/// # Security
///
/// The client secret is never exposed in Debug output to prevent accidental
/// logging.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

/// Wire format of the credentials file.
#[derive(Deserialize)]
struct CredentialsFile {
    installed: Option<InstalledSection>,
}

#[derive(Deserialize)]
struct InstalledSection {
    #[serde(default)]
    client_id: Option<String>,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

impl Credentials {
    /// Load credentials from a JSON file.
    ///
    /// The file must contain a top-level `installed` object with `client_id`,
    /// `client_secret`, and a non-empty `redirect_uris` array. The first
    /// redirect URI is used.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is missing, unparsable, or
    /// lacks any of the expected installed-application fields.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        let file: CredentialsFile =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: display.clone(),
                source,
            })?;

        let installed = file.installed.ok_or_else(|| ConfigError::MissingSection {
            path: display.clone(),
        })?;

        let client_id = installed.client_id.ok_or_else(|| ConfigError::MissingField {
            path: display.clone(),
            field: "client_id",
        })?;

        let client_secret = installed
            .client_secret
            .ok_or_else(|| ConfigError::MissingField {
                path: display.clone(),
                field: "client_secret",
            })?;

        let redirect_uri = installed
            .redirect_uris
            .into_iter()
            .next()
            .ok_or(ConfigError::NoRedirectUris { path: display })?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
        })
    }

    /// Create credentials directly, bypassing the file format.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Returns the OAuth2 client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing token requests.
    /// Never log or display this value.
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the redirect URI (first entry of `redirect_uris`).
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

// Intentionally hide the client secret in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_well_formed_file() {
        let file = write_file(
            r#"{
                "installed": {
                    "client_id": "id-123.apps.googleusercontent.com",
                    "client_secret": "s3cret",
                    "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob", "http://localhost"]
                }
            }"#,
        );

        let creds = Credentials::load(file.path()).unwrap();
        assert_eq!(creds.client_id(), "id-123.apps.googleusercontent.com");
        assert_eq!(creds.client_secret(), "s3cret");
        assert_eq!(creds.redirect_uri(), "urn:ietf:wg:oauth:2.0:oob");
    }

    #[test]
    fn load_missing_file() {
        let err = Credentials::load("/nonexistent/credentials.json").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn load_invalid_json() {
        let file = write_file("not json at all");
        let err = Credentials::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_missing_installed_section() {
        let file = write_file(r#"{"web": {"client_id": "x"}}"#);
        let err = Credentials::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingSection { .. })
        ));
    }

    #[test]
    fn load_missing_client_secret() {
        let file = write_file(
            r#"{"installed": {"client_id": "x", "redirect_uris": ["http://localhost"]}}"#,
        );
        let err = Credentials::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "client_secret",
                ..
            })
        ));
    }

    #[test]
    fn load_empty_redirect_uris() {
        let file = write_file(
            r#"{"installed": {"client_id": "x", "client_secret": "y", "redirect_uris": []}}"#,
        );
        let err = Credentials::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::NoRedirectUris { .. })
        ));
    }

    #[test]
    fn credentials_hides_secret_in_debug() {
        let creds = Credentials::new("id-123", "secret456", "http://localhost");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("secret456"));
        assert!(debug.contains("[REDACTED]"));
    }
}
