use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

const BAD_REQUEST: &str = "Bad Request - Validation Error";
const NOT_FOUND: &str = "Not Found - Resource Not Found";
const INTERNAL_ERROR: &str = "Internal Server Error";
const INTERNAL_MESSAGE: &str = "An unexpected internal error occurred.";

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// An engine error bound to the request path it happened on.
#[derive(Debug)]
pub struct ApiError {
    pub error: abi::Error,
    pub path: String,
}

impl ApiError {
    pub fn new(error: abi::Error, uri: &Uri) -> Self {
        Self {
            error,
            path: uri.path().to_string(),
        }
    }
}

pub(crate) trait AtPath<T> {
    fn at(self, uri: &Uri) -> Result<T, ApiError>;
}

impl<T> AtPath<T> for Result<T, abi::Error> {
    fn at(self, uri: &Uri) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, uri))
    }
}

// error kind -> (status, error title, message); internal details never leave the server
fn dispatch(e: &abi::Error) -> (StatusCode, &'static str, String) {
    match e {
        abi::Error::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND, e.to_string()),
        e if e.is_validation() => (StatusCode::BAD_REQUEST, BAD_REQUEST, e.to_string()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR,
            INTERNAL_MESSAGE.to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = dispatch(&self.error);
        if status.is_server_error() {
            error!(path = %self.path, error = %self.error, "unexpected error");
        }

        let body = ErrorBody {
            status: status.as_u16(),
            error: title.to_string(),
            message,
            path: self.path,
        };
        (status, Json(body)).into_response()
    }
}
