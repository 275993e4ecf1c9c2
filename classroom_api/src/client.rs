//! HTTP client for the classroom REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{query::Query, session::SessionStore, Error};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Path segment the backend mounts its routes under.
pub const DEFAULT_API_ROOT: &str = "api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One outgoing call, before path normalization and token injection.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Replaces the query parameters with the ones produced by `query`.
    pub fn with_query(mut self, query: &impl Query) -> Self {
        self.params = query.to_params();
        self
    }

    /// Serializes `body` as the JSON request body.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| {
            tracing::error!("Failed to encode request body: {}", e);
            Error::Encode(e.to_string())
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// A successful (2xx) response.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decodes the body. An empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str::<T>(text).map_err(|e| {
            let snippet = truncate_body(&self.body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Deserialize {
                message: e.to_string(),
                body: snippet,
            }
        })
    }
}

/// HTTP client for the classroom REST API.
///
/// Every request goes through [`Client::send`], which collapses a doubled
/// API root segment in the path, attaches the session's bearer token, and
/// logs the session out when the server answers 401. Cloning is cheap and
/// clones share the connection pool and the session.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, e.g. `http://localhost:8000/api`.
    base_api_url: Url,
    api_root: String,
    session: Arc<dyn SessionStore>,
}

impl Client {
    /// Creates a client pointing at [`DEFAULT_BASE_URL`].
    pub fn new(session: Arc<dyn SessionStore>) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, session)
    }

    /// Creates a client with a custom base URL.
    pub fn with_base_url(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, Error> {
        let base_api_url = Url::parse(base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", base_url, e);
            Error::InvalidUrl(format!("{}: {}", base_url, e))
        })?;
        Ok(Self {
            http: build_http(REQUEST_TIMEOUT)?,
            base_api_url,
            api_root: DEFAULT_API_ROOT.to_string(),
            session,
        })
    }

    /// Replaces the network timeout applied to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, Error> {
        self.http = build_http(timeout)?;
        Ok(self)
    }

    /// Overrides the API root segment used for path normalization.
    pub fn with_api_root(mut self, api_root: &str) -> Self {
        self.api_root = api_root.trim_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_api_url.as_str()
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn request_url(&self, request: &ApiRequest) -> Result<Url, Error> {
        let path = normalize_path(self.base_api_url.path(), &self.api_root, &request.path);
        let base = self.base_api_url.as_str().trim_end_matches('/');
        let joined = if path.is_empty() || path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        };
        let mut url = Url::parse(&joined).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}: {}", joined, e))
        })?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }
        Ok(url)
    }

    /// Sends one request through the pipeline.
    ///
    /// Non-2xx answers become errors carrying the status and a body snippet.
    /// A 401 logs the session out before the error is returned. Nothing is
    /// retried.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let url = self.request_url(&request)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = self.session.access_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to {} {}: {}", request.method, request.path, e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                "{} {} answered 401, logging the session out",
                request.method,
                request.path
            );
            self.session.logout();
            // An unreadable 401 body is still a 401.
            let body = resp.text().await.unwrap_or_else(|e| {
                tracing::debug!("Failed to read 401 body: {}", e);
                String::new()
            });
            return Err(Error::Unauthorized {
                body: truncate_body(&body),
            });
        }

        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// GETs `path` and decodes the JSON answer.
    pub async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let mut request = ApiRequest::get(path);
        if let Some(query) = query {
            request = request.with_query(query);
        }
        self.send(request).await?.json()
    }

    /// POSTs `body` (or nothing) to `path` and decodes the JSON answer.
    pub async fn post_json<T, B>(&self, path: &str, body: Option<&B>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::post(path);
        if let Some(body) = body {
            request = request.with_body(body)?;
        }
        self.send(request).await?.json()
    }

    /// PATCHes `path` with `body` and decodes the JSON answer.
    pub async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::patch(path).with_body(body)?;
        self.send(request).await?.json()
    }

    /// DELETEs `path`, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(ApiRequest::delete(path)).await?;
        Ok(())
    }
}

fn build_http(timeout: Duration) -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| {
            tracing::error!("Failed to build HTTP client: {}", e);
            Error::RequestFailed
        })
}

/// Strips a leading `/{api_root}` segment from `path` when the base URL path
/// already ends in that segment. Only a whole segment matches, so
/// `/apiextra/...` is left alone, and only one segment is removed.
pub(crate) fn normalize_path<'a>(base_path: &str, api_root: &str, path: &'a str) -> &'a str {
    if api_root.is_empty() {
        return path;
    }
    let prefix = format!("/{}", api_root);
    if !base_path.trim_end_matches('/').ends_with(&prefix) {
        return path;
    }
    match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') => {
            tracing::debug!("Collapsed duplicate /{} prefix in {}", api_root, path);
            rest
        }
        _ => path,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySession;

    fn client(base: &str) -> Client {
        Client::with_base_url(base, Arc::new(MemorySession::new())).unwrap()
    }

    #[test]
    fn normalize_strips_duplicate_api_segment() {
        assert_eq!(normalize_path("/api", "api", "/api/courses/"), "/courses/");
        assert_eq!(normalize_path("/api/", "api", "/api/courses/"), "/courses/");
        assert_eq!(normalize_path("/api", "api", "/api"), "");
    }

    #[test]
    fn normalize_keeps_lookalike_segments() {
        assert_eq!(
            normalize_path("/api", "api", "/apiextra/courses/"),
            "/apiextra/courses/"
        );
    }

    #[test]
    fn normalize_strips_only_once() {
        assert_eq!(normalize_path("/api", "api", "/api/api/courses/"), "/api/courses/");
    }

    #[test]
    fn normalize_requires_base_to_end_in_root() {
        assert_eq!(normalize_path("/", "api", "/api/courses/"), "/api/courses/");
        assert_eq!(normalize_path("/v2", "api", "/api/courses/"), "/api/courses/");
        assert_eq!(normalize_path("/myapi", "api", "/api/courses/"), "/api/courses/");
    }

    #[test]
    fn request_url_joins_base_and_path() {
        let c = client("http://localhost:8000/api");
        let url = c
            .request_url(&ApiRequest::get("/api/courses/courses/"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/courses/courses/");

        let c = client("http://localhost:8000");
        let url = c
            .request_url(&ApiRequest::get("/api/courses/courses/"))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/courses/courses/");
    }

    #[test]
    fn request_url_appends_params() {
        let c = client("http://localhost:8000/api");
        let mut request = ApiRequest::get("/courses/");
        request.params = vec![
            ("page".to_string(), "2".to_string()),
            ("search".to_string(), "math".to_string()),
        ];
        let url = c.request_url(&request).unwrap();
        assert_eq!(url.query(), Some("page=2&search=math"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Client::with_base_url("not a url", Arc::new(MemorySession::new()));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        let resp = ApiResponse {
            status: 204,
            body: String::new(),
        };
        let value: serde_json::Value = resp.json().unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
    }
}
