// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan upload endpoints.

use crate::error::ApiError;
use crate::services::extract_from_upload;
use crate::types::WallsResponse;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use wallscan_lines::{to_tuples, Consolidation};

/// Accepted upload extensions, compared case-insensitively.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

/// An uploaded `file` field.
struct Upload {
    filename: String,
    data: Vec<u8>,
}

/// Extract the `file` field from a multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?.to_vec();
            tracing::debug!(filename = %filename, size = data.len(), "Extracted file from multipart");
            return Ok(Upload { filename, data });
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

fn check_extension(filename: &str) -> Result<(), ApiError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ApiError::InvalidFormat)?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ApiError::InvalidFormat);
    }
    if ext == "pdf" {
        return Err(ApiError::UnsupportedMedia(
            "PDF input must be rasterized before upload".into(),
        ));
    }
    Ok(())
}

/// Validate an upload and run the extraction on the blocking pool.
async fn process_upload(state: &AppState, mut multipart: Multipart) -> Result<Consolidation, ApiError> {
    let upload = extract_file(&mut multipart).await?;
    check_extension(&upload.filename)?;

    if upload.data.len() > state.config.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    tracing::info!(filename = %upload.filename, size = upload.data.len(), "Processing upload");

    let config = state.config.clone();
    tokio::task::spawn_blocking(move || {
        extract_from_upload(&upload.data, &config.raster, &config.consolidation)
    })
    .await?
}

/// POST /upload - Normalized wall lines as a bare list of 4-arrays.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Vec<[f64; 4]>>, ApiError> {
    let result = process_upload(&state, multipart).await?;
    Ok(Json(to_tuples(&result.lines)))
}

/// POST /api/v1/walls - Wall lines with consolidation statistics.
pub async fn walls(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<WallsResponse>, ApiError> {
    let result = process_upload(&state, multipart).await?;
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_extension() {
        assert!(check_extension("plan.png").is_ok());
        assert!(check_extension("plan.JPG").is_ok());
        assert!(check_extension("scan.v2.jpeg").is_ok());
        assert!(matches!(check_extension("plan.pdf"), Err(ApiError::UnsupportedMedia(_))));
        assert!(matches!(check_extension("plan.txt"), Err(ApiError::InvalidFormat)));
        assert!(matches!(check_extension("plan"), Err(ApiError::InvalidFormat)));
    }
}
