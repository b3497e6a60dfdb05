use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use serde_json::json;
use tracing::warn;

use crate::navigation::NavigationError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into a JSON error response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<NavigationError> for HTTPError {
    fn from(e: NavigationError) -> Self {
        let status = match &e {
            NavigationError::NotFound(_) => StatusCode::NOT_FOUND,
            NavigationError::AccessorFailed(_) => StatusCode::BAD_GATEWAY,
            NavigationError::Superseded(_) => StatusCode::CONFLICT,
            NavigationError::UnknownRoute(_) | NavigationError::RedirectLoop { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        HTTPError::new(status, e.to_string())
    }
}

/// The caller's session access token, taken from `Authorization: Bearer <token>`.
/// Absent or malformed headers yield `None`.
#[derive(Debug, Clone, Default)]
pub struct AccessToken(pub Option<String>);

impl<S> FromRequestParts<S> for AccessToken
where
    S: Send + Sync,
{
    type Rejection = HTTPError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
        else {
            return Ok(AccessToken(None));
        };

        let mut words = header.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
                Ok(AccessToken(Some(token.to_string())))
            }
            _ => {
                warn!("Authorization header invalid format; ignoring it");
                Ok(AccessToken(None))
            }
        }
    }
}
