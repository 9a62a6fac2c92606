use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoconvert_core::error::ErrorKind;
use geoconvert_core::{ConversionError, GeoconvertError};
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, details = ?self.details, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.message, "Request rejected");
        }

        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Malformed or mistyped JSON bodies get the same `{error, details}` shape
/// as every other rejection
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Invalid request body").with_details(rejection.body_text())
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::bad_request("Invalid coordinate").with_details(err.to_string()),
            ErrorKind::Parse => Self::bad_request("Invalid value").with_details(err.to_string()),
            ErrorKind::Projection => Self::unprocessable("Projection failed").with_details(err.to_string()),
        }
    }
}

impl From<GeoconvertError> for ApiError {
    fn from(err: GeoconvertError) -> Self {
        match err {
            GeoconvertError::Conversion(e) => e.into(),
            GeoconvertError::ColumnNotFound { .. } => {
                Self::bad_request("Column not found").with_details(err.to_string())
            }
            GeoconvertError::UnsupportedFormat { .. } => {
                Self::bad_request("Unsupported file format").with_details(err.to_string())
            }
            GeoconvertError::FormatError { .. } => {
                Self::bad_request("Failed to parse file").with_details(err.to_string())
            }
            GeoconvertError::ConfigInvalid { .. } => {
                Self::bad_request("Invalid setting").with_details(err.to_string())
            }
            GeoconvertError::Export { .. } | GeoconvertError::Io(_) => {
                Self::internal("Internal error").with_details(err.to_string())
            }
        }
    }
}
