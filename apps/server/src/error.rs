// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid file format")]
    InvalidFormat,

    #[error("File too large: maximum size is {max_mb} MB")]
    FileTooLarge { max_mb: usize },

    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate segment: {0}")]
    DegenerateSegment(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::InvalidFormat => (StatusCode::BAD_REQUEST, "INVALID_FORMAT"),
            ApiError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::UnsupportedMedia(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA")
            }
            // 413 when the body limit cut the stream short
            ApiError::Multipart(e) => (e.status(), "MULTIPART_ERROR"),
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            ApiError::DegenerateSegment(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_SEGMENT")
            }
            ApiError::DegenerateGeometry(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DEGENERATE_GEOMETRY")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<wallscan_lines::Error> for ApiError {
    fn from(err: wallscan_lines::Error) -> Self {
        use wallscan_lines::Error;
        match err {
            Error::InvalidInput { .. } | Error::InvalidConfig(_) | Error::ExtentOverflow { .. } => {
                ApiError::InvalidInput(err.to_string())
            }
            Error::DegenerateSegment { .. } => ApiError::DegenerateSegment(err.to_string()),
            Error::DegenerateGeometry { .. } => ApiError::DegenerateGeometry(err.to_string()),
            Error::Serialization(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<wallscan_raster::Error> for ApiError {
    fn from(err: wallscan_raster::Error) -> Self {
        use wallscan_raster::Error;
        match err {
            Error::Consolidation(inner) => inner.into(),
            Error::UnsupportedFormat(msg) => ApiError::UnsupportedMedia(msg),
            Error::Decode(_) | Error::EmptyImage => ApiError::InvalidInput(err.to_string()),
            Error::InvalidConfig(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ApiError::MissingFile, StatusCode::BAD_REQUEST),
            (ApiError::InvalidFormat, StatusCode::BAD_REQUEST),
            (
                ApiError::FileTooLarge { max_mb: 1 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                wallscan_raster::Error::UnsupportedFormat("pdf".into()).into(),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                wallscan_lines::Error::DegenerateGeometry {
                    width: 0.0,
                    height: 1.0,
                }
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                wallscan_raster::Error::Consolidation(wallscan_lines::Error::DegenerateSegment {
                    index: 3,
                })
                .into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                wallscan_lines::Error::InvalidConfig("delta_rho".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                wallscan_raster::Error::EmptyImage.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                wallscan_lines::Error::ExtentOverflow {
                    width: f64::INFINITY,
                    height: 1.0,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_degenerate_segment_and_geometry_codes_differ() {
        let segment: ApiError = wallscan_lines::Error::DegenerateSegment { index: 3 }.into();
        assert!(matches!(segment, ApiError::DegenerateSegment(_)));

        let geometry: ApiError = wallscan_lines::Error::DegenerateGeometry {
            width: 0.0,
            height: 1.0,
        }
        .into();
        assert!(matches!(geometry, ApiError::DegenerateGeometry(_)));
    }
}
