use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{CandidateRepository, JobRepository};
use crate::errors::AppError;
use crate::models::{Candidate, Job, NewCandidate, NewJob};

/// PostgreSQL-backed store. Skill sets live in `TEXT[]` columns and are
/// converted to and from [`resumatch_core::SkillSet`] here.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CandidateRow {
    id: i64,
    name: Option<String>,
    email: Option<String>,
    resume_text: String,
    skills: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        Candidate {
            id: row.id,
            name: row.name,
            email: row.email,
            resume_text: row.resume_text,
            skills: row.skills.into(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: i64,
    title: String,
    description: String,
    required_skills: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            title: row.title,
            description: row.description,
            required_skills: row.required_skills.into(),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CandidateRepository for PgStore {
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, AppError> {
        let row: CandidateRow = sqlx::query_as(
            r#"
            INSERT INTO candidates (name, email, resume_text, skills)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, resume_text, skills, created_at
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.resume_text)
        .bind(new.skills.to_vec())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, AppError> {
        let row: Option<CandidateRow> = sqlx::query_as(
            "SELECT id, name, email, resume_text, skills, created_at FROM candidates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Candidate::from))
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, AppError> {
        let rows: Vec<CandidateRow> = sqlx::query_as(
            "SELECT id, name, email, resume_text, skills, created_at FROM candidates ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Candidate::from).collect())
    }
}

#[async_trait]
impl JobRepository for PgStore {
    async fn create_job(&self, new: NewJob) -> Result<Job, AppError> {
        let row: JobRow = sqlx::query_as(
            r#"
            INSERT INTO jobs (title, description, required_skills)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, required_skills, created_at
            "#,
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.required_skills.to_vec())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, AppError> {
        let row: Option<JobRow> = sqlx::query_as(
            "SELECT id, title, description, required_skills, created_at FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Job::from))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, AppError> {
        let rows: Vec<JobRow> = sqlx::query_as(
            "SELECT id, title, description, required_skills, created_at FROM jobs ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }
}
