//! Session management for authenticated Google Tasks operations.

use std::io;

use oauth2::basic::BasicClient;
use oauth2::reqwest::http_client;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::error::{AuthError, ConfigError, Error};
use crate::rest::{Endpoints, RestClient, SCOPE_TASKS, SCOPE_TASKS_READONLY};

use super::credentials::Credentials;
use super::secrets::SecretStore;
use super::tokens::{AccessToken, RefreshToken};

/// Establishes authenticated sessions, either from a stored refresh token or
/// via the interactive authorization-code flow.
///
/// The manager holds the application's OAuth2 identity and endpoint
/// configuration; it is the only component that talks to the token endpoint.
/// A process constructs one manager, obtains one [`Session`], and reuses that
/// session for all subsequent calls.
///
/// # Example
///
/// ```no_run
/// use gtasks::{Credentials, KeyringStore, SecretStore, SessionManager};
///
/// # fn example() -> Result<(), gtasks::Error> {
/// let credentials = Credentials::load("credentials.json")?;
/// let manager = SessionManager::new(credentials);
/// let store = KeyringStore::new();
///
/// let session = match store.get("default")? {
///     Some(token) => manager.restore("default", &token)?,
///     None => manager.authenticate("default", &store, |prompt| {
///         eprintln!("{}", prompt.instructions());
///         let mut code = String::new();
///         std::io::stdin().read_line(&mut code)?;
///         Ok(code)
///     })?,
/// };
/// # let _ = session;
/// # Ok(())
/// # }
/// ```
pub struct SessionManager {
    credentials: Credentials,
    endpoints: Endpoints,
    open_browser: bool,
}

impl SessionManager {
    /// Create a session manager for the given application identity,
    /// targeting the Google Tasks endpoints.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            open_browser: true,
        }
    }

    /// Override the authorization, token, and API base URLs.
    ///
    /// Intended for tests against a local mock server.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Control whether `authenticate` opens the authorization URL in a
    /// browser (default: true).
    pub fn with_browser(mut self, open_browser: bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    /// Restore a session by exchanging a stored refresh token for a fresh
    /// access token.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the server rejects the token
    /// (expired or revoked). This is not retried and there is no automatic
    /// fallback to the interactive flow; that decision belongs to the caller.
    #[instrument(skip(self, token), fields(account = %account))]
    pub fn restore(&self, account: &str, token: &RefreshToken) -> Result<Session, Error> {
        info!("Restoring session from stored refresh token");

        let oauth = self.oauth_client()?;

        let response = oauth
            .exchange_refresh_token(&oauth2::RefreshToken::new(token.as_str().to_string()))
            .request(http_client)
            .map_err(|e| AuthError::RefreshRejected {
                message: e.to_string(),
            })?;

        let access_token = AccessToken::new(response.access_token().secret().clone());

        // Google only rotates the refresh token on re-authorization, but
        // honor a replacement if one is sent.
        let refresh_token = response
            .refresh_token()
            .map(|t| RefreshToken::new(t.secret().clone()))
            .unwrap_or_else(|| token.clone());

        debug!("Session restored successfully");

        Session::build(account, oauth, &self.endpoints, access_token, refresh_token)
    }

    /// Perform the interactive authorization-code flow.
    ///
    /// Builds the authorization URL (task read/write and read-only scopes,
    /// offline access, forced consent so a refresh token is always issued),
    /// optionally opens it in a browser, obtains the pasted authorization
    /// code through `prompt`, and exchanges it at the token endpoint. On
    /// success the new refresh token is persisted through `store` under the
    /// account identifier.
    ///
    /// A browser that fails to launch does not abort the flow; the prompt
    /// then carries manual-copy instructions instead.
    ///
    /// # Errors
    ///
    /// Returns an authentication error on an empty pasted code, a rejected
    /// code exchange, or a token response without a refresh token.
    #[instrument(skip(self, store, prompt), fields(account = %account))]
    pub fn authenticate<F>(
        &self,
        account: &str,
        store: &dyn SecretStore,
        prompt: F,
    ) -> Result<Session, Error>
    where
        F: FnOnce(&AuthorizationPrompt) -> io::Result<String>,
    {
        info!("Starting interactive authorization");

        let oauth = self.oauth_client()?;

        let (authorize_url, _csrf) = oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(SCOPE_TASKS.to_string()))
            .add_scope(Scope::new(SCOPE_TASKS_READONLY.to_string()))
            .add_extra_param("access_type", "offline")
            .add_extra_param("approval_prompt", "force")
            .url();

        let browser_opened = if self.open_browser {
            match webbrowser::open(authorize_url.as_str()) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Failed to open browser, falling back to manual copy");
                    false
                }
            }
        } else {
            false
        };

        let authorization = AuthorizationPrompt {
            url: authorize_url,
            browser_opened,
        };

        let code = prompt(&authorization).map_err(AuthError::Prompt)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::MissingAuthorizationCode.into());
        }

        let response = oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request(http_client)
            .map_err(|e| AuthError::CodeExchangeFailed {
                message: e.to_string(),
            })?;

        let refresh_token = response
            .refresh_token()
            .map(|t| RefreshToken::new(t.secret().clone()))
            .ok_or(AuthError::MissingRefreshToken)?;

        store.put(account, &refresh_token)?;

        let access_token = AccessToken::new(response.access_token().secret().clone());

        info!("Interactive authorization completed");

        Session::build(account, oauth, &self.endpoints, access_token, refresh_token)
    }

    /// Build the OAuth2 client from the credentials and endpoints.
    fn oauth_client(&self) -> Result<BasicClient, Error> {
        let invalid = |url: &str, e: url::ParseError| ConfigError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let auth_url = AuthUrl::new(self.endpoints.auth_url.clone())
            .map_err(|e| invalid(&self.endpoints.auth_url, e))?;
        let token_url = TokenUrl::new(self.endpoints.token_url.clone())
            .map_err(|e| invalid(&self.endpoints.token_url, e))?;
        let redirect_url = RedirectUrl::new(self.credentials.redirect_uri().to_string())
            .map_err(|e| invalid(self.credentials.redirect_uri(), e))?;

        let client = BasicClient::new(
            ClientId::new(self.credentials.client_id().to_string()),
            Some(ClientSecret::new(
                self.credentials.client_secret().to_string(),
            )),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(redirect_url);

        Ok(client)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("endpoints", &self.endpoints)
            .field("open_browser", &self.open_browser)
            .finish()
    }
}

/// Context handed to the authorization-code prompt.
///
/// Carries the authorization URL and whether it was already opened in a
/// browser, so the caller can word its instructions accordingly.
#[derive(Debug)]
pub struct AuthorizationPrompt {
    url: Url,
    browser_opened: bool,
}

impl AuthorizationPrompt {
    /// The authorization URL the user must visit.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the URL was already opened in a web browser.
    pub fn browser_opened(&self) -> bool {
        self.browser_opened
    }

    /// Ready-made instructions for the user.
    pub fn instructions(&self) -> String {
        if self.browser_opened {
            format!(
                "The following URL has been opened in your web browser:\n\n{}\n\nPlease paste the response code below:",
                self.url
            )
        } else {
            format!(
                "Please copy the following URL into your web browser:\n\n{}\n\nPlease paste the response code below:",
                self.url
            )
        }
    }
}

/// An authenticated connection to the Google Tasks API.
///
/// Sessions are obtained from a [`SessionManager`] — there is no way to
/// construct an unauthenticated one. The session holds the current access
/// token and the refresh token used to replace it; [`Session::refresh`]
/// mutates the session in place, so an instance must not be shared across
/// threads.
pub struct Session {
    account: String,
    oauth: BasicClient,
    rest: RestClient,
    access_token: AccessToken,
    refresh_token: RefreshToken,
}

impl Session {
    fn build(
        account: &str,
        oauth: BasicClient,
        endpoints: &Endpoints,
        access_token: AccessToken,
        refresh_token: RefreshToken,
    ) -> Result<Self, Error> {
        let rest = RestClient::new(&endpoints.api_base)?;

        Ok(Self {
            account: account.to_string(),
            oauth,
            rest,
            access_token,
            refresh_token,
        })
    }

    /// Returns the account identifier this session was established for.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Returns the current refresh token, for callers that persist it.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Re-exchange the held refresh token and replace the access token
    /// in place.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the server rejects the refresh
    /// token.
    #[instrument(skip(self), fields(account = %self.account))]
    pub fn refresh(&mut self) -> Result<(), Error> {
        info!("Refreshing session");

        let response = self
            .oauth
            .exchange_refresh_token(&oauth2::RefreshToken::new(
                self.refresh_token.as_str().to_string(),
            ))
            .request(http_client)
            .map_err(|e| AuthError::RefreshRejected {
                message: e.to_string(),
            })?;

        self.access_token = AccessToken::new(response.access_token().secret().clone());
        if let Some(rotated) = response.refresh_token() {
            self.refresh_token = RefreshToken::new(rotated.secret().clone());
        }

        debug!("Session refreshed successfully");
        Ok(())
    }

    /// Issue an authenticated GET against the task API.
    pub(crate) fn get<Q, R>(&self, path: &str, query: &Q) -> Result<R, Error>
    where
        Q: serde::Serialize + std::fmt::Debug,
        R: serde::de::DeserializeOwned,
    {
        self.rest.get_json(path, query, self.access_token.as_str())
    }

    /// Issue an authenticated GET and return the raw decoded JSON.
    pub(crate) fn get_value(&self, path: &str) -> Result<serde_json::Value, Error> {
        self.rest.get_value(path, self.access_token.as_str())
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("account", &self.account)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
