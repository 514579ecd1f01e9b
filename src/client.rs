//! HTTP dispatch for the TeamDynamix Web API.
//!
//! This module provides the `TdxClient` struct: base-URL construction for
//! the sandbox and production environments, bearer authentication, bounded
//! timeouts, and typed request helpers. Every call is a single attempt;
//! retry policy belongs to callers, who can classify failures with
//! [`LanternError::is_communication_failure`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::LanternError;
use crate::models::Person;

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the TeamDynamix Web API.
///
/// Cloning is cheap; clones share the underlying connection pool and the
/// auth token, so a token refresh is visible to every clone at once.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = TdxClient::new(&config)?;
/// client.load_auth_token("tdx.key").await?;
///
/// let me = client.current_user().await?;
/// println!("logged in as {}", me.display_email());
/// ```
#[derive(Clone)]
pub struct TdxClient {
    /// The underlying HTTP client.
    http: Client,

    /// Base URL including the environment segment, without a trailing
    /// slash (e.g. `https://teamdynamix.example.edu/SBTDWebApi/api`).
    base_url: String,

    /// Bearer token, shared across clones so renewal reaches everyone.
    token: Arc<RwLock<Option<String>>>,
}

impl TdxClient {
    /// Creates a client from configuration.
    ///
    /// The base URL is derived from the domain and environment; the
    /// sandbox and production APIs live under different path segments of
    /// the same host.
    ///
    /// # Errors
    ///
    /// Returns `LanternError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(config: &Config) -> Result<Self, LanternError> {
        Ok(Self {
            http: Self::build_http()?,
            base_url: format!(
                "https://{}/{}/api",
                config.domain,
                config.environment.api_root()
            ),
            token: Arc::new(RwLock::new(config.auth_token.clone())),
        })
    }

    /// Creates a client against an explicit base URL.
    ///
    /// [`new`](Self::new) derives the URL from configuration; this
    /// constructor serves tests and nonstandard deployments that front the
    /// API somewhere else.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LanternError> {
        Ok(Self {
            http: Self::build_http()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Builds the underlying HTTP client with the crate's bounded timeout.
    fn build_http() -> Result<Client, LanternError> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(LanternError::HttpClient)
    }

    /// Returns the base URL this client dispatches against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets the bearer token for authenticated calls.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Returns a copy of the current bearer token, if one is set.
    pub async fn auth_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Loads the bearer token from a file.
    ///
    /// # Errors
    ///
    /// A missing or unreadable file is a fatal `LanternError::TokenFile`;
    /// there is no fallback token source.
    pub async fn load_auth_token(&self, path: impl AsRef<Path>) -> Result<(), LanternError> {
        let path = path.as_ref();
        let token = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LanternError::TokenFile {
                path: path.to_path_buf(),
                source,
            })?;
        self.set_auth_token(token.trim().to_string()).await;
        Ok(())
    }

    /// Saves the current bearer token to a file for later use.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidParameter` when no token is set, or
    /// `LanternError::TokenFile` when the file cannot be written.
    pub async fn save_auth_token(&self, path: impl AsRef<Path>) -> Result<(), LanternError> {
        let path = path.as_ref();
        let token = self
            .auth_token()
            .await
            .ok_or_else(|| LanternError::invalid_parameter("no auth token to save"))?;
        tokio::fs::write(path, token)
            .await
            .map_err(|source| LanternError::TokenFile {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Makes a request and returns the raw response for the caller to
    /// interpret.
    ///
    /// The bearer header is attached when a token is present and the call
    /// requires auth. Only GET and POST are dispatched; the remote API
    /// uses nothing else.
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedMethod` before any network activity for
    /// other methods, `Timeout` when the bounded wait elapses, and
    /// `Communication` when the remote cannot be reached at all. Remote
    /// 4xx/5xx statuses are NOT errors here - they come back in the
    /// response.
    pub async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        requires_auth: bool,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, LanternError> {
        if method != Method::GET && method != Method::POST {
            return Err(LanternError::UnsupportedMethod(method.to_string()));
        }

        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(method = %method, endpoint = %endpoint, "dispatching request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Content-Type", "application/json; charset=utf-8");

        if requires_auth {
            if let Some(token) = self.token.read().await.as_deref() {
                request = request.bearer_auth(token);
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                LanternError::timeout(
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    format!("{} {}", method, endpoint),
                )
            } else {
                LanternError::Communication(e)
            }
        })
    }

    /// Makes an authenticated GET request and deserializes the response.
    pub(crate) async fn get_json<T>(&self, endpoint: &str) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
    {
        let response = self.dispatch(Method::GET, endpoint, true, None).await?;
        Self::interpret(response).await
    }

    /// Makes an authenticated POST request and deserializes the response.
    pub(crate) async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = serde_json::to_value(body)?;
        let response = self
            .dispatch(Method::POST, endpoint, true, Some(&body))
            .await?;
        Self::interpret(response).await
    }

    /// Interprets a raw response: classifies the status, then parses JSON.
    async fn interpret<T>(response: Response) -> Result<T, LanternError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LanternError::NotAuthorized);
        }

        let body = response.text().await.map_err(LanternError::Communication)?;
        if !status.is_success() {
            return Err(LanternError::RequestFailed { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Returns the currently authenticated user.
    ///
    /// Useful as a login smoke test: a valid token answers with the
    /// user record, an invalid one fails `NotAuthorized`.
    pub async fn current_user(&self) -> Result<Person, LanternError> {
        self.get_json("auth/getuser").await
    }
}
