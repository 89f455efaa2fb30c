use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use resumatch_core::TopK;
use serde::{Deserialize, Serialize};

use crate::catalog::service::split_skill_list;
use crate::errors::AppError;
use crate::matching::bulk::{self, BulkMatchRequest, BulkMatchResponse, UploadedResume};
use crate::matching::service::{
    self, CandidateRecommendation, JobRecommendation, MatchReport,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub candidate_id: Option<i64>,
    pub job_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub candidate_id: Option<i64>,
    pub k: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TopKQuery {
    pub k: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Recommendations<T> {
    pub recommendations: Vec<T>,
}

fn top_k(state: &AppState, k: Option<i64>) -> Result<TopK, AppError> {
    match k {
        Some(k) => Ok(TopK::try_from(k)?),
        None => Ok(state.config.default_top_k),
    }
}

/// GET /api/match?candidate_id=&job_id=
pub async fn handle_match(
    State(state): State<AppState>,
    Query(params): Query<MatchQuery>,
) -> Result<Json<MatchReport>, AppError> {
    let (Some(candidate_id), Some(job_id)) = (params.candidate_id, params.job_id) else {
        return Err(AppError::Validation(
            "candidate_id and job_id are required".to_string(),
        ));
    };
    let report = service::match_candidate_job(
        state.candidates.as_ref(),
        state.jobs.as_ref(),
        candidate_id,
        job_id,
    )
    .await?;
    Ok(Json(report))
}

/// GET /api/recommendations?candidate_id=&k=
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<Recommendations<JobRecommendation>>, AppError> {
    let candidate_id = params
        .candidate_id
        .ok_or_else(|| AppError::Validation("candidate_id is required".to_string()))?;
    let top_k = top_k(&state, params.k)?;
    let recommendations = service::recommend_jobs(
        state.candidates.as_ref(),
        state.jobs.as_ref(),
        candidate_id,
        top_k,
    )
    .await?;
    Ok(Json(Recommendations { recommendations }))
}

/// GET /api/jobs/:id/candidates?k=
pub async fn handle_job_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<i64>,
    Query(params): Query<TopKQuery>,
) -> Result<Json<Recommendations<CandidateRecommendation>>, AppError> {
    let top_k = top_k(&state, params.k)?;
    let recommendations = service::recommend_candidates(
        state.candidates.as_ref(),
        state.jobs.as_ref(),
        job_id,
        top_k,
    )
    .await?;
    Ok(Json(Recommendations { recommendations }))
}

/// POST /api/bulk-match (multipart: title, description, required_skills, resume_files)
pub async fn handle_bulk_match(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BulkMatchResponse>, AppError> {
    let mut req = BulkMatchRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => req.title = field.text().await?.trim().to_string(),
            "description" => req.description = field.text().await?.trim().to_string(),
            "required_skills" => req.required_skills = split_skill_list(&field.text().await?),
            "resume_files" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                bulk::validate_file_count(req.files.len() + 1, state.config.max_bulk_files)?;
                let bytes = field.bytes().await?;
                req.files.push(UploadedResume { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(Json(bulk::bulk_match(&state, req).await?))
}
