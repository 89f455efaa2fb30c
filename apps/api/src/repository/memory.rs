use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CandidateRepository, JobRepository};
use crate::errors::AppError;
use crate::models::{Candidate, Job, NewCandidate, NewJob};

/// Process-local store used when no database is configured. Ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    last_candidate_id: i64,
    last_job_id: i64,
    candidates: BTreeMap<i64, Candidate>,
    jobs: BTreeMap<i64, Job>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateRepository for MemoryStore {
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_candidate_id += 1;
        let candidate = Candidate {
            id: tables.last_candidate_id,
            name: new.name,
            email: new.email,
            resume_text: new.resume_text,
            skills: new.skills,
            created_at: Utc::now(),
        };
        tables.candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, AppError> {
        Ok(self.tables.read().await.candidates.get(&id).cloned())
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, AppError> {
        Ok(self.tables.read().await.candidates.values().cloned().collect())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn create_job(&self, new: NewJob) -> Result<Job, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_job_id += 1;
        let job = Job {
            id: tables.last_job_id,
            title: new.title,
            description: new.description,
            required_skills: new.required_skills,
            created_at: Utc::now(),
        };
        tables.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: i64) -> Result<Option<Job>, AppError> {
        Ok(self.tables.read().await.jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.tables.read().await.jobs.values().rev().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumatch_core::SkillSet;

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: format!("{title} role"),
            required_skills: ["python"].into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_per_table() {
        let store = MemoryStore::new();
        let first = store.create_job(new_job("a")).await.unwrap();
        let second = store.create_job(new_job("b")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        let cand = store
            .create_candidate(NewCandidate {
                name: None,
                email: None,
                resume_text: "text".into(),
                skills: SkillSet::new(),
            })
            .await
            .unwrap();
        assert_eq!(cand.id, 1);
        assert_eq!(store.get_candidate(1).await.unwrap().unwrap().resume_text, "text");
        assert!(store.get_candidate(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_jobs_list_newest_first() {
        let store = MemoryStore::new();
        for title in ["first", "second", "third"] {
            store.create_job(new_job(title)).await.unwrap();
        }
        let titles: Vec<String> = store
            .list_jobs()
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }
}
