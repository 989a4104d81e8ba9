//! REST HTTP client.

use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use parish_core::error::{AuthError, Error, StoreError, TransportError};
use parish_core::types::StoreUrl;

/// Error body the database returns on failure.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// HTTP client for one database.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base: StoreUrl,
    token: Option<String>,
}

impl RestClient {
    /// Create a client for the database at `base`, authenticating every
    /// request with `token` when one is given.
    pub fn new(base: StoreUrl, token: Option<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parish/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// Returns the database URL this client is configured for.
    pub fn base(&self) -> &StoreUrl {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.base.node_url(path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.query(&[("auth", token.as_str())]),
            None => builder,
        }
    }

    /// Read the JSON node at `path`. Absent nodes read as `null`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get(&self, path: &str) -> Result<Value, Error> {
        debug!(path, "GET");
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(map_reqwest)?;
        self.handle_response(response).await
    }

    /// Read only the top level of the node at `path`, with children
    /// collapsed to `true`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_shallow(&self, path: &str) -> Result<Value, Error> {
        debug!(path, "GET shallow");
        let response = self
            .request(Method::GET, path)
            .query(&[("shallow", "true")])
            .send()
            .await
            .map_err(map_reqwest)?;
        self.handle_response(response).await
    }

    /// Replace the node at `path`.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn put(&self, path: &str, body: &Value) -> Result<(), Error> {
        debug!(path, "PUT");
        let response = self
            .request(Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;
        self.handle_response(response).await.map(drop)
    }

    /// Merge the children of `body` into the node at `path`.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn patch(&self, path: &str, body: &Value) -> Result<(), Error> {
        debug!(path, "PATCH");
        let response = self
            .request(Method::PATCH, path)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest)?;
        self.handle_response(response).await.map(drop)
    }

    /// Delete the node at `path`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        debug!(path, "DELETE");
        let response = self
            .request(Method::DELETE, path)
            .send()
            .await
            .map_err(map_reqwest)?;
        self.handle_response(response).await.map(drop)
    }

    async fn handle_response(&self, response: Response) -> Result<Value, Error> {
        let status = response.status();
        trace!(status = %status, "REST response");

        if status.is_success() {
            let text = response.text().await.map_err(map_reqwest)?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text)?)
        } else {
            Err(Self::parse_error_response(response).await)
        }
    }

    async fn parse_error_response(response: Response) -> Error {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error);

        if status == 401 || status == 403 {
            return AuthError::Rejected(message.unwrap_or_else(|| format!("status {}", status)))
                .into();
        }
        StoreError::new(status, None, message).into()
    }
}

pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = StoreUrl::new("https://parish-default-rtdb.firebaseio.com").unwrap();
        let client = RestClient::new(base.clone(), None).unwrap();
        assert_eq!(client.base(), &base);
    }
}
