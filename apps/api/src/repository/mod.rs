//! Candidate and job storage.
//!
//! Handlers only see the traits; `main` picks [`MemoryStore`] or [`PgStore`]
//! depending on whether a database is configured.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{Candidate, Job, NewCandidate, NewJob};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, AppError>;

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, AppError>;

    /// All candidates, oldest first.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, AppError>;
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create_job(&self, new: NewJob) -> Result<Job, AppError>;

    async fn get_job(&self, id: i64) -> Result<Option<Job>, AppError>;

    /// All jobs, newest (highest id) first.
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError>;
}
