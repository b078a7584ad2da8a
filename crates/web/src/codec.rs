//! The `{code, status, data}` envelope and the extractors that decode
//! request bodies and path ids into [`WebError`]s instead of axum rejections.

use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{WebError, WebResult};

/// Uniform response envelope. `data` serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub code: u16,
    pub status: String,
    pub data: Option<T>,
}

impl<T> WebResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, Some(data))
    }

    pub fn with_status(status: StatusCode, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            status: status.canonical_reason().unwrap_or_default().to_string(),
            data,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl WebResponse<()> {
    /// A 200 envelope without payload.
    pub fn empty() -> Self {
        Self::with_status(StatusCode::OK, None)
    }
}

impl<T: Serialize> IntoResponse for WebResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

pub fn decode<T: DeserializeOwned>(body: &[u8]) -> WebResult<T> {
    serde_json::from_slice(body).map_err(|e| WebError::Decode(e.to_string()))
}

pub fn parse_id(raw: &str) -> WebResult<i64> {
    raw.parse()
        .map_err(|e| WebError::MalformedId(format!("{raw:?} is not a valid id: {e}")))
}

/// JSON request body. Unlike `axum::Json`, any failure is a [`WebError::Decode`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| WebError::Decode(e.body_text()))?;

        decode(&body).map(JsonBody)
    }
}

/// The integer `{id}` route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CategoryId
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::MalformedId(e.body_text()))?;

        parse_id(&raw).map(CategoryId)
    }
}
