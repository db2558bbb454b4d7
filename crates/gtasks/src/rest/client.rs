//! REST HTTP client implementation.

use reqwest::header::AUTHORIZATION;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, trace};

use crate::error::{ConfigError, Error, StatusError, TransportError};

use super::endpoints::ApiErrorBody;

/// Blocking HTTP client for the task API.
///
/// Holds a validated base URL and issues bearer-authenticated GET requests.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::blocking::Client,
    base: url::Url,
}

impl RestClient {
    /// Create a new REST client for the given API base URL.
    pub fn new(base: &str) -> Result<Self, Error> {
        // Url::join treats a base without a trailing slash as a file path
        // and would drop its last segment.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };

        let base = url::Url::parse(&normalized).map_err(|e| ConfigError::InvalidEndpoint {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("gtasks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client, base })
    }

    /// Make an authenticated GET request and decode the JSON response.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub fn get_json<Q, R>(&self, path: &str, query: &Q, token: &str) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.join(path).map_err(|e| ConfigError::InvalidEndpoint {
            url: path.to_string(),
            reason: e.to_string(),
        })?;

        debug!(path, "API query");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .map_err(TransportError::from)?;

        self.handle_response(response)
    }

    /// Make an authenticated GET request without query parameters and
    /// return the raw decoded JSON.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub fn get_value(&self, path: &str, token: &str) -> Result<serde_json::Value, Error> {
        let url = self.base.join(path).map_err(|e| ConfigError::InvalidEndpoint {
            url: path.to_string(),
            reason: e.to_string(),
        })?;

        debug!(path, "API query");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .map_err(TransportError::from)?;

        self.handle_response(response)
    }

    /// Handle a response, decoding the body or the error payload.
    fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::blocking::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.json::<R>().map_err(TransportError::from)?;
            Ok(body)
        } else {
            Err(Error::Transport(TransportError::Status(
                self.parse_error_response(response),
            )))
        }
    }

    /// Parse an error response body in Google's error format.
    fn parse_error_response(&self, response: reqwest::blocking::Response) -> StatusError {
        let status = response.status().as_u16();

        match response.json::<ApiErrorBody>() {
            Ok(body) => StatusError::new(status, body.error.message),
            Err(_) => StatusError::new(status, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = RestClient::new("https://www.googleapis.com/tasks/v1").unwrap();
        let joined = client.base.join("lists/@default/tasks").unwrap();
        assert_eq!(
            joined.as_str(),
            "https://www.googleapis.com/tasks/v1/lists/@default/tasks"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = RestClient::new("not a url").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
