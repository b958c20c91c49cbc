//! Response wrapper for successful HTTP responses.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Successful response body.
///
/// The payload is serialized at the top level of the body. `content_type` is
/// not part of the body; it becomes the `Content-Type` header.
///
/// # Example
///
/// ```
/// use floorplan_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct PathResponse {
///     line_ids: Vec<String>,
///     cost: f64,
/// }
///
/// let result = PathResponse { line_ids: vec!["line-9".into()], cost: 25.0 };
/// let response = ServiceResponse::new(result);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,

    /// Media type sent in the `Content-Type` header.
    #[serde(skip)]
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(JSON_CONTENT_TYPE));
        ([(header::CONTENT_TYPE, content_type)], Json(self.data)).into_response()
    }
}
