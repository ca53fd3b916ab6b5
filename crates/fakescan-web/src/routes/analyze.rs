//! Media analysis route handler.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    Json,
};
use fakescan_core::{upload::MISSING_FILE, AnalysisResult, Upload};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// The `file` part of a multipart submission.
struct FilePart {
    filename: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let part = read_file_part(multipart?).await?;
    debug!(
        filename = ?part.filename,
        content_type = ?part.content_type,
        bytes = part.data.len(),
        "Received upload"
    );

    let upload = Upload::new(
        part.filename.as_deref(),
        part.content_type.as_deref(),
        &part.data,
    );
    let mut rng = state.rng();
    let result = fakescan_core::analyze_upload(&upload, &mut rng).map_err(|e| {
        warn!(filename = ?part.filename, error = %e, "Rejected upload");
        ApiError::from(e)
    })?;

    info!(
        filename = ?part.filename,
        verdict = %result.result,
        confidence = result.confidence,
        indicators = result.indicators.len(),
        "Analysis complete"
    );
    Ok(Json(result))
}

/// Find the `file` field, skipping any others.
async fn read_file_part(mut multipart: Multipart) -> Result<FilePart, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;
        return Ok(FilePart {
            filename,
            content_type,
            data,
        });
    }

    warn!("Multipart body has no '{}' field", FILE_FIELD);
    Err(ApiError::bad_request(MISSING_FILE))
}
