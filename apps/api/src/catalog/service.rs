use resumatch_core::SkillSet;
use tracing::info;

use crate::errors::{run_blocking, AppError};
use crate::models::{Candidate, Job, NewCandidate, NewJob};
use crate::repository::{CandidateRepository, JobRepository};

/// Extracts skills from the résumé text and stores the candidate.
pub async fn create_candidate(
    repo: &dyn CandidateRepository,
    name: Option<String>,
    email: Option<String>,
    resume_text: String,
) -> Result<Candidate, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }

    let (resume_text, skills) = run_blocking("skill extraction", move || {
        let skills = resumatch_core::extract_skills(&resume_text)?;
        Ok((resume_text, skills))
    })
    .await?;

    let candidate = repo
        .create_candidate(NewCandidate {
            name,
            email,
            resume_text,
            skills,
        })
        .await?;

    info!(
        "Created candidate {} with {} skills",
        candidate.id,
        candidate.skills.len()
    );
    Ok(candidate)
}

/// Stores a job. Required skills are trimmed and lowercased; blank entries are dropped.
pub async fn create_job(
    repo: &dyn JobRepository,
    title: String,
    description: String,
    required_skills: Vec<String>,
) -> Result<Job, AppError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(AppError::Validation(
            "title and description are required".to_string(),
        ));
    }

    let required_skills: SkillSet = required_skills.into_iter().collect();
    let job = repo
        .create_job(NewJob {
            title,
            description,
            required_skills,
        })
        .await?;

    info!(
        "Created job {} ({} required skills)",
        job.id,
        job.required_skills.len()
    );
    Ok(job)
}

/// Splits a comma-separated skill list, as sent by form uploads.
pub fn split_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
