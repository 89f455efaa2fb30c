//! Candidate/job scoring: skill overlap blended with text similarity.
//!
//! `final = 0.7 * skill + 0.3 * text`, where `skill = |C ∩ J| / |J|`. A job with no
//! required skills counts as fully satisfied by any candidate that has at least one
//! skill, and unsatisfied by a candidate with none.

use serde::{Deserialize, Serialize};

use crate::similarity::TextSimilarity;
use crate::skill_set::SkillSet;

pub const SKILL_WEIGHT: f64 = 0.7;
pub const TEXT_WEIGHT: f64 = 0.3;

/// Outcome of scoring one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub final_score: f64,
    pub skill_score: f64,
    pub text_score: f64,
    /// Required skills the candidate has, ascending.
    pub overlap: Vec<String>,
    /// Required skills the candidate lacks, ascending.
    pub missing: Vec<String>,
}

/// Skill component of a score, before blending.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub skill_score: f64,
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
}

pub fn skill_match(candidate_skills: &SkillSet, job_skills: &SkillSet) -> SkillMatch {
    let overlap: Vec<String> = job_skills.intersection(candidate_skills).cloned().collect();
    let missing: Vec<String> = job_skills.difference(candidate_skills).cloned().collect();

    let skill_score = if !job_skills.is_empty() {
        overlap.len() as f64 / job_skills.len() as f64
    } else if !candidate_skills.is_empty() {
        1.0
    } else {
        0.0
    };

    SkillMatch {
        skill_score,
        overlap,
        missing,
    }
}

/// Weighted blend of the two components, clamped and rounded to 4 decimals.
pub fn blend(skill_score: f64, text_score: f64) -> f64 {
    round4((SKILL_WEIGHT * skill_score + TEXT_WEIGHT * text_score).clamp(0.0, 1.0))
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Scores a pair whose text similarity is already known.
pub fn score_with_text_similarity(
    candidate_skills: &SkillSet,
    job_skills: &SkillSet,
    text_score: f64,
) -> ScoreResult {
    let skills = skill_match(candidate_skills, job_skills);
    let skill_score = skills.skill_score.clamp(0.0, 1.0);
    let text_score = if text_score.is_finite() {
        text_score.clamp(0.0, 1.0)
    } else {
        0.0
    };

    ScoreResult {
        final_score: blend(skill_score, text_score),
        skill_score: round4(skill_score),
        text_score: round4(text_score),
        overlap: skills.overlap,
        missing: skills.missing,
    }
}

/// Scores a candidate against a job. Pure: equal inputs give equal results.
pub fn score(
    similarity: &TextSimilarity,
    candidate_skills: &SkillSet,
    candidate_text: &str,
    job_skills: &SkillSet,
    job_text: &str,
) -> ScoreResult {
    let text_score = similarity.similarity(candidate_text, job_text);
    score_with_text_similarity(candidate_skills, job_skills, text_score)
}
