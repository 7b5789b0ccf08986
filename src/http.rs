use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{header::HeaderMap, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{ClientOptions, HarnessConfig, ReqresError, Result};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Joins a base URL and a relative API path with exactly one `/` between them.
///
/// Example: `("https://reqres.in/", "/api/users")` → `"https://reqres.in/api/users"`
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Clone)]
/// Thin wrapper over `reqwest` that normalizes every exchange into either a
/// parsed value or a [`ReqresError`].
///
/// Holds no per-call state; clones share the underlying connection pool.
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    bearer: Option<String>,
    options: ClientOptions,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("options", &self.options)
            .finish()
    }
}

impl HttpClient {
    /// Creates a wrapper for `base_url` without an API key.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: None,
            bearer: None,
            options: ClientOptions::default(),
        }
    }

    /// Creates a wrapper from the harness configuration.
    pub fn from_config(config: &HarnessConfig) -> Self {
        let client = Self::new(config.base_url.clone());
        match &config.api_key {
            Some(key) => client.with_api_key(key.clone()),
            None => client,
        }
    }

    /// Sends `key` as the `x-api-key` header on every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Applies client options such as the request timeout.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Returns a copy that also sends `Authorization: Bearer <token>`.
    pub fn with_bearer(&self, token: impl Into<String>) -> Self {
        let mut client = self.clone();
        client.bearer = Some(token.into());
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Starts a request to `path` with the configured headers and timeout.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends `request` and decodes a 2xx body as `T`.
    ///
    /// A non-2xx status becomes [`ReqresError::RequestFailed`] with the raw
    /// body text; an unparseable 2xx body becomes [`ReqresError::Parse`].
    pub async fn handle<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(ReqresError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ReqresError::Transport)?;
        decode(status, body)
    }

    /// Sends `request` and returns the response as-is, whatever its status.
    pub async fn execute(&self, request: RequestBuilder) -> Result<RawResponse> {
        let started = Instant::now();
        let response = request.send().await.map_err(ReqresError::Transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(ReqresError::Transport)?;
        Ok(RawResponse {
            status,
            headers,
            body,
            elapsed: started.elapsed(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.handle(self.request(Method::GET, path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.handle(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.handle(self.request(Method::PUT, path).json(body)).await
    }

    /// `GET path` without status normalization.
    pub async fn get_raw(&self, path: &str) -> Result<RawResponse> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// `POST path` with a JSON body, without status normalization.
    pub async fn post_raw<B>(&self, path: &str, body: &B) -> Result<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.execute(self.request(Method::POST, path).json(body)).await
    }
}

/// One HTTP exchange captured verbatim, with its wall-clock duration.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    /// Time from sending the request until the full body was read.
    pub elapsed: Duration,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Header value as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Applies the same normalization as [`HttpClient::handle`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        decode(self.status, self.body.clone())
    }

    /// Parses the body as untyped JSON regardless of the status code.
    pub fn json_value(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|err| ReqresError::Parse {
            message: err.to_string(),
            body: self.body.clone(),
        })
    }

    /// Converts a non-2xx response into [`ReqresError::RequestFailed`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ReqresError::RequestFailed {
                status: self.status.as_u16(),
                body: self.body,
            })
        }
    }
}

fn decode<T: DeserializeOwned>(status: StatusCode, body: String) -> Result<T> {
    if !status.is_success() {
        return Err(ReqresError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    match serde_json::from_str::<T>(&body) {
        Ok(value) => Ok(value),
        Err(err) => Err(ReqresError::Parse {
            message: err.to_string(),
            body,
        }),
    }
}
