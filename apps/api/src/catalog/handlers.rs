use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::service;
use crate::errors::AppError;
use crate::models::Job;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResumeResponse {
    pub candidate_id: i64,
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub job_id: i64,
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<CreateResumeResponse>), AppError> {
    let candidate =
        service::create_candidate(state.candidates.as_ref(), req.name, req.email, req.resume_text)
            .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateResumeResponse {
            candidate_id: candidate.id,
            skills: candidate.skills.to_vec(),
        }),
    ))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let job = service::create_job(
        state.jobs.as_ref(),
        req.title,
        req.description,
        req.required_skills,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(CreateJobResponse { job_id: job.id })))
}

/// GET /api/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(state.jobs.list_jobs().await?))
}
