//! Bearer-injecting test client.
//!
//! Wraps [`axum_test::TestServer`] so every outgoing request picks up the
//! current access token as an `Authorization: Bearer` header. The token lives
//! in a shared [`TokenCell`] that scenarios mutate between requests, which is
//! how 401 (cell cleared) and 403 (cell holds an under-privileged token)
//! paths are exercised without rebuilding the client.
//!
//! Injection is skipped when a request already carries an `Authorization`
//! header, so callers can override the cell per request.

use std::sync::{Arc, RwLock};

use axum_test::{TestResponse, TestServer};
use http::header::AUTHORIZATION;
use http::{HeaderName, HeaderValue, Method};
use serde_json::Value;
use tracing::debug;

/// Shared mutable slot holding the current access token.
///
/// Cheap to clone; all clones observe the same value. The lock is held only
/// for the duration of a get or set, never across an await point.
#[derive(Debug, Clone, Default)]
pub struct TokenCell {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenCell {
    /// Creates a cell holding the given initial token.
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    /// Replaces the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().expect("token cell lock") = Some(token.into());
    }

    /// Clears the current token; subsequent requests go out unauthenticated.
    pub fn clear(&self) {
        *self.inner.write().expect("token cell lock") = None;
    }

    /// Returns a copy of the current token.
    pub fn get(&self) -> Option<String> {
        self.inner.read().expect("token cell lock").clone()
    }
}

/// HTTP test client with per-request bearer injection.
///
/// # Example
///
/// ```rust,ignore
/// use axum_test::TestServer;
/// use restcheck_conformance::{token, ConformanceClient, TokenCell};
///
/// let server = TestServer::new(app).expect("test server");
/// let cell = TokenCell::new(Some(token::default_access_token()));
/// let client = ConformanceClient::new(server, cell);
///
/// let response = client.get("/tasks").await;
/// ```
pub struct ConformanceClient {
    server: TestServer,
    token: TokenCell,
}

impl ConformanceClient {
    /// Creates a client around an existing test server and token cell.
    pub fn new(server: TestServer, token: TokenCell) -> Self {
        Self { server, token }
    }

    /// Returns the token cell shared with this client.
    pub fn token(&self) -> &TokenCell {
        &self.token
    }

    /// Returns the underlying test server for requests the convenience
    /// methods do not cover.
    pub fn server(&self) -> &TestServer {
        &self.server
    }

    /// Sends a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Sends a PUT request with a JSON body.
    pub async fn put(&self, path: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: &Value) -> TestResponse {
        self.send(Method::PATCH, path, Some(body)).await
    }

    /// Sends a request with an arbitrary method and optional JSON body,
    /// injecting the current bearer token.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> TestResponse {
        self.send_with_headers(method, path, body, &[]).await
    }

    /// Sends a request with additional headers.
    ///
    /// The bearer token is injected only when `headers` does not already
    /// contain `Authorization`.
    pub async fn send_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &[(HeaderName, HeaderValue)],
    ) -> TestResponse {
        let mut request = self.server.method(method.clone(), path);

        let mut authorization_set = false;
        for (name, value) in headers {
            if name == AUTHORIZATION {
                authorization_set = true;
            }
            request = request.add_header(name.clone(), value.clone());
        }

        if !authorization_set {
            if let Some(token) = self.token.get() {
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .expect("bearer tokens contain only visible ASCII");
                request = request.add_header(AUTHORIZATION, value);
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, path, "dispatching request");
        request.await
    }
}
