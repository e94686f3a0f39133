//! Authorization gate: a single shared bearer secret.
//!
//! [`require_bearer`] runs as a route layer in front of every resource
//! handler. A request whose `Authorization` header is not exactly
//! `Bearer <secret>` is answered with 401 and never reaches the handler.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// The expected `Authorization` header value.
#[derive(Clone)]
pub struct BearerToken {
    expected: Arc<str>,
}

impl BearerToken {
    /// Builds the expected header value from the shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            expected: Arc::from(format!("Bearer {secret}")),
        }
    }

    /// Returns `true` if `presented` is exactly the expected header value.
    ///
    /// Runs in time independent of where the first mismatch occurs.
    #[must_use]
    pub fn matches(&self, presented: &[u8]) -> bool {
        let expected = self.expected.as_bytes();
        if presented.len() != expected.len() {
            return false;
        }
        presented
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken").finish_non_exhaustive()
    }
}

/// Middleware rejecting requests without the shared bearer credential.
pub async fn require_bearer(
    State(token): State<BearerToken>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| token.matches(value.as_bytes()));

    if !authorized {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request without valid bearer credential"
        );
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
