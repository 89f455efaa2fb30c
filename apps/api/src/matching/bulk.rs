//! Screening a batch of uploaded résumés against one new job posting.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::service::{create_candidate, create_job};
use crate::errors::{run_blocking, AppError};
use crate::ingest::profile::{extract_profile, name_from_filename};
use crate::ingest::text::ExtractionError;
use crate::matching::service::score_pair;
use crate::models::Job;
use crate::state::AppState;

const CONTACT_NOT_FOUND: &str = "Not found";

#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct BulkMatchRequest {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub files: Vec<UploadedResume>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkCandidate {
    pub candidate_id: i64,
    pub name: String,
    pub contact: String,
    pub score: f64,
    pub skills_match_score: f64,
    pub text_similarity_score: f64,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub all_skills: Vec<String>,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkMatchResponse {
    pub job_id: i64,
    pub job_title: String,
    pub total_candidates: usize,
    pub candidates: Vec<BulkCandidate>,
}

/// Creates the job once, then stores and scores every readable résumé.
///
/// Files that cannot be read (unsupported type, unreadable PDF, no text) are
/// skipped. Results are ordered by score descending, then candidate id.
pub async fn bulk_match(
    state: &AppState,
    req: BulkMatchRequest,
) -> Result<BulkMatchResponse, AppError> {
    if req.title.trim().is_empty() || req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description are required".to_string(),
        ));
    }
    validate_file_count(req.files.len(), state.config.max_bulk_files)?;

    let job = create_job(
        state.jobs.as_ref(),
        req.title,
        req.description,
        req.required_skills,
    )
    .await?;
    let job = Arc::new(job);
    let submitted = req.files.len();

    let mut candidates = Vec::with_capacity(submitted);
    for upload in req.files {
        let filename = upload.filename.clone();
        match screen_resume(state, &job, upload).await {
            Ok(Some(candidate)) => candidates.push(candidate),
            Ok(None) => debug!("Skipping {filename}: no text"),
            Err(AppError::Extraction(ExtractionError::UnsupportedType)) => {
                debug!("Skipping {filename}: unsupported file type")
            }
            Err(e) => warn!("Error processing {filename}: {e}"),
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });

    info!(
        "Bulk match for job {}: {} of {} résumés scored",
        job.id,
        candidates.len(),
        submitted
    );

    Ok(BulkMatchResponse {
        job_id: job.id,
        job_title: job.title.clone(),
        total_candidates: candidates.len(),
        candidates,
    })
}

pub fn validate_file_count(count: usize, max: usize) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::Validation("No resume files uploaded".to_string()));
    }
    if count > max {
        return Err(AppError::Validation(format!(
            "Maximum {max} files allowed"
        )));
    }
    Ok(())
}

async fn screen_resume(
    state: &AppState,
    job: &Arc<Job>,
    upload: UploadedResume,
) -> Result<Option<BulkCandidate>, AppError> {
    let extractor = state.extractor.clone();
    let UploadedResume { filename, bytes } = upload;
    let (filename, text) = run_blocking("resume text extraction", move || {
        let text = extractor.extract(&filename, &bytes)?;
        Ok((filename, text))
    })
    .await?;

    if text.is_empty() {
        return Ok(None);
    }

    let profile = extract_profile(&text);
    let name = profile
        .name
        .unwrap_or_else(|| name_from_filename(&filename));
    let contact = profile
        .contact
        .unwrap_or_else(|| CONTACT_NOT_FOUND.to_string());

    let candidate = create_candidate(
        state.candidates.as_ref(),
        Some(name.clone()),
        Some(contact.clone()),
        text,
    )
    .await?;

    let job = Arc::clone(job);
    let (candidate, result) = run_blocking("bulk scoring", move || {
        let result = score_pair(&candidate, &job);
        Ok((candidate, result))
    })
    .await?;

    Ok(Some(BulkCandidate {
        candidate_id: candidate.id,
        name,
        contact,
        score: result.final_score,
        skills_match_score: result.skill_score,
        text_similarity_score: result.text_score,
        overlap_skills: result.overlap,
        missing_skills: result.missing,
        all_skills: candidate.skills.to_vec(),
        filename,
    }))
}
