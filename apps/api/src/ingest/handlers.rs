use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::{run_blocking, AppError};
use crate::ingest::profile::{extract_profile, Profile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResumeResponse {
    pub text: String,
    #[serde(flatten)]
    pub profile: Profile,
}

/// POST /api/extract-resume (multipart field `file`, `.txt` or `.pdf`)
pub async fn handle_extract_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResumeResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        let bytes = field.bytes().await?;

        let extractor = state.extractor.clone();
        let text = run_blocking("resume text extraction", move || {
            Ok(extractor.extract(&filename, &bytes)?)
        })
        .await?;

        let profile = extract_profile(&text);
        return Ok(Json(ExtractResumeResponse { text, profile }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
