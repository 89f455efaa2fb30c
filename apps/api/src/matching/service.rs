use std::collections::HashMap;

use resumatch_core::{QueryRole, RankTarget, RankedEntry, ScoreResult, TopK};
use serde::Serialize;
use tracing::debug;

use crate::errors::{run_blocking, AppError};
use crate::models::{Candidate, Job};
use crate::repository::{CandidateRepository, JobRepository};

// ─────────────────────────────────────────────────────────────────────────────
// Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub candidate_id: i64,
    pub job_id: i64,
    pub score: f64,
    pub skills_match_score: f64,
    pub text_similarity_score: f64,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl MatchReport {
    fn new(candidate_id: i64, job_id: i64, result: ScoreResult) -> Self {
        MatchReport {
            candidate_id,
            job_id,
            score: result.final_score,
            skills_match_score: result.skill_score,
            text_similarity_score: result.text_score,
            overlap_skills: result.overlap,
            missing_skills: result.missing,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobRecommendation {
    pub job_id: i64,
    pub title: String,
    pub score: f64,
    pub skills_match_score: f64,
    pub text_similarity_score: f64,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRecommendation {
    pub candidate_id: i64,
    pub name: Option<String>,
    pub score: f64,
    pub skills_match_score: f64,
    pub text_similarity_score: f64,
    pub overlap_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Scores one candidate's résumé against one job description.
pub fn score_pair(candidate: &Candidate, job: &Job) -> ScoreResult {
    resumatch_core::score(
        &candidate.skills,
        &candidate.resume_text,
        &job.required_skills,
        &job.description,
    )
}

pub async fn match_candidate_job(
    candidates: &dyn CandidateRepository,
    jobs: &dyn JobRepository,
    candidate_id: i64,
    job_id: i64,
) -> Result<MatchReport, AppError> {
    let candidate = candidates.get_candidate(candidate_id).await?;
    let job = jobs.get_job(job_id).await?;
    let (Some(candidate), Some(job)) = (candidate, job) else {
        return Err(AppError::NotFound("candidate or job not found".to_string()));
    };

    run_blocking("match scoring", move || {
        Ok(MatchReport::new(candidate.id, job.id, score_pair(&candidate, &job)))
    })
    .await
}

/// Ranks every stored job for one candidate.
pub async fn recommend_jobs(
    candidates: &dyn CandidateRepository,
    jobs: &dyn JobRepository,
    candidate_id: i64,
    top_k: TopK,
) -> Result<Vec<JobRecommendation>, AppError> {
    let candidate = candidates
        .get_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    let jobs = jobs.list_jobs().await?;

    run_blocking("job recommendation", move || {
        let targets: Vec<RankTarget<'_, i64>> = jobs
            .iter()
            .map(|j| RankTarget {
                id: j.id,
                skills: &j.required_skills,
                text: &j.description,
            })
            .collect();
        let ranked = resumatch_core::rank(
            QueryRole::Candidate,
            &candidate.skills,
            &candidate.resume_text,
            &targets,
            top_k,
        );
        debug!(
            "Recommended {} of {} jobs for candidate {}",
            ranked.len(),
            jobs.len(),
            candidate.id
        );

        let titles: HashMap<i64, &str> = jobs.iter().map(|j| (j.id, j.title.as_str())).collect();
        Ok(ranked
            .into_iter()
            .map(|entry| {
                let title = titles.get(&entry.target_id).copied().unwrap_or_default();
                job_recommendation(title, entry)
            })
            .collect())
    })
    .await
}

/// Ranks every stored candidate for one job.
pub async fn recommend_candidates(
    candidates: &dyn CandidateRepository,
    jobs: &dyn JobRepository,
    job_id: i64,
    top_k: TopK,
) -> Result<Vec<CandidateRecommendation>, AppError> {
    let job = jobs
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let candidates = candidates.list_candidates().await?;

    run_blocking("candidate recommendation", move || {
        let targets: Vec<RankTarget<'_, i64>> = candidates
            .iter()
            .map(|c| RankTarget {
                id: c.id,
                skills: &c.skills,
                text: &c.resume_text,
            })
            .collect();
        let ranked = resumatch_core::rank(
            QueryRole::Job,
            &job.required_skills,
            &job.description,
            &targets,
            top_k,
        );

        let names: HashMap<i64, Option<&str>> = candidates
            .iter()
            .map(|c| (c.id, c.name.as_deref()))
            .collect();
        Ok(ranked
            .into_iter()
            .map(|entry| {
                let name = names.get(&entry.target_id).copied().flatten();
                candidate_recommendation(name, entry)
            })
            .collect())
    })
    .await
}

fn job_recommendation(title: &str, entry: RankedEntry<i64>) -> JobRecommendation {
    JobRecommendation {
        job_id: entry.target_id,
        title: title.to_string(),
        score: entry.final_score,
        skills_match_score: entry.skill_score,
        text_similarity_score: entry.text_score,
        overlap_skills: entry.overlap,
        missing_skills: entry.missing,
    }
}

fn candidate_recommendation(name: Option<&str>, entry: RankedEntry<i64>) -> CandidateRecommendation {
    CandidateRecommendation {
        candidate_id: entry.target_id,
        name: name.map(str::to_string),
        score: entry.final_score,
        skills_match_score: entry.skill_score,
        text_similarity_score: entry.text_score,
        overlap_skills: entry.overlap,
        missing_skills: entry.missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::service::{create_candidate, create_job};
    use crate::repository::MemoryStore;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        create_candidate(
            &store,
            Some("Jane".into()),
            None,
            "Python and SQL developer building data pipelines".into(),
        )
        .await
        .unwrap();
        create_job(
            &store,
            "Data Engineer".into(),
            "Build data pipelines with Python, SQL and AWS".into(),
            vec!["python".into(), "sql".into(), "aws".into()],
        )
        .await
        .unwrap();
        create_job(
            &store,
            "Pastry Chef".into(),
            "Laminated dough and croissants".into(),
            vec!["baking".into()],
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_match_reports_overlap_and_missing() {
        let store = seeded().await;
        let report = match_candidate_job(&store, &store, 1, 1).await.unwrap();
        assert_eq!(report.skills_match_score, 0.6667);
        assert_eq!(report.overlap_skills, vec!["python", "sql"]);
        assert_eq!(report.missing_skills, vec!["aws"]);
        assert!(report.text_similarity_score > 0.0);
        assert!(report.score > 0.4667);
    }

    #[tokio::test]
    async fn test_match_unknown_ids() {
        let store = seeded().await;
        let err = match_candidate_job(&store, &store, 9, 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = match_candidate_job(&store, &store, 1, 9).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_recommend_jobs_best_first() {
        let store = seeded().await;
        let recs = recommend_jobs(&store, &store, 1, TopK::new(5)).await.unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "Data Engineer");
        assert_eq!(recs[1].missing_skills, vec!["baking"]);

        let top = recommend_jobs(&store, &store, 1, TopK::new(1)).await.unwrap();
        assert_eq!(top.len(), 1);
        assert!(recommend_jobs(&store, &store, 1, TopK::new(0))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_recommend_candidates_for_job() {
        let store = seeded().await;
        create_candidate(&store, Some("Bob".into()), None, "Croissant baking".into())
            .await
            .unwrap();

        let recs = recommend_candidates(&store, &store, 1, TopK::new(5)).await.unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].candidate_id, 1);
        assert_eq!(recs[0].name.as_deref(), Some("Jane"));
        assert_eq!(recs[0].missing_skills, vec!["aws"]);
    }
}
