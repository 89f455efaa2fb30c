use chrono::{DateTime, Utc};
use resumatch_core::SkillSet;
use serde::Serialize;

/// A stored résumé with its extracted skills.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: i64,
    pub name: Option<String>,
    /// E-mail, or whatever contact line was found in the résumé.
    pub email: Option<String>,
    pub resume_text: String,
    pub skills: SkillSet,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_text: String,
    pub skills: SkillSet,
}
