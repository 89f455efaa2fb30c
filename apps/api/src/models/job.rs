use chrono::{DateTime, Utc};
use resumatch_core::SkillSet;
use serde::Serialize;

/// A stored job posting.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub required_skills: SkillSet,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub required_skills: SkillSet,
}
