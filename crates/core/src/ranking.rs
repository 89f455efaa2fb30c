//! Recommendation ranking: one query against many targets, best first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MatchError;
use crate::scoring::score_with_text_similarity;
use crate::similarity::TextSimilarity;
use crate::skill_set::SkillSet;

/// Which side of the candidate/job pair the query stands for.
///
/// The skill rule always divides by the *job's* skills, so the ranker needs to know
/// whether those are the query's or each target's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryRole {
    /// A candidate looking for jobs; targets are jobs.
    Candidate,
    /// A job looking for candidates; targets are candidates.
    Job,
}

/// Number of ranked entries to return. Negative counts are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TopK(usize);

impl TopK {
    pub const fn new(k: usize) -> Self {
        Self(k)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for TopK {
    type Error = MatchError;

    fn try_from(k: i64) -> Result<Self, Self::Error> {
        usize::try_from(k)
            .map(TopK)
            .map_err(|_| MatchError::InvalidTopK(k))
    }
}

impl From<TopK> for i64 {
    fn from(k: TopK) -> Self {
        i64::try_from(k.0).unwrap_or(i64::MAX)
    }
}

/// A document to rank against the query.
#[derive(Debug, Clone, Copy)]
pub struct RankTarget<'a, Id> {
    pub id: Id,
    pub skills: &'a SkillSet,
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<Id> {
    pub target_id: Id,
    pub final_score: f64,
    pub skill_score: f64,
    pub text_score: f64,
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores every target against the query and returns the best `top_k`.
///
/// Text similarity is computed in one batch over the query and all targets. Entries
/// are ordered by `final_score` descending, then by target id ascending, so equal
/// inputs always produce the same order.
pub fn rank<Id: Ord + Clone>(
    similarity: &TextSimilarity,
    role: QueryRole,
    query_skills: &SkillSet,
    query_text: &str,
    targets: &[RankTarget<'_, Id>],
    top_k: TopK,
) -> Vec<RankedEntry<Id>> {
    if targets.is_empty() || top_k.get() == 0 {
        return Vec::new();
    }

    let texts: Vec<&str> = targets.iter().map(|t| t.text).collect();
    let text_scores = similarity.batch_similarity(query_text, &texts);

    let mut entries: Vec<RankedEntry<Id>> = targets
        .iter()
        .zip(text_scores)
        .map(|(target, text_score)| {
            let result = match role {
                QueryRole::Candidate => {
                    score_with_text_similarity(query_skills, target.skills, text_score)
                }
                QueryRole::Job => {
                    score_with_text_similarity(target.skills, query_skills, text_score)
                }
            };
            RankedEntry {
                target_id: target.id.clone(),
                final_score: result.final_score,
                skill_score: result.skill_score,
                text_score: result.text_score,
                overlap: result.overlap,
                missing: result.missing,
            }
        })
        .collect();

    entries.sort_by(compare_entries);
    entries.truncate(top_k.get());

    debug!(
        "Ranked {} targets, returning {}",
        targets.len(),
        entries.len()
    );
    entries
}

/// Score descending, then id ascending.
fn compare_entries<Id: Ord>(a: &RankedEntry<Id>, b: &RankedEntry<Id>) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| a.target_id.cmp(&b.target_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> SkillSet {
        items.iter().collect()
    }

    #[test]
    fn test_top_k_rejects_negative() {
        assert!(matches!(TopK::try_from(-1), Err(MatchError::InvalidTopK(-1))));
        assert_eq!(TopK::try_from(0).unwrap().get(), 0);
        assert_eq!(TopK::try_from(5).unwrap().get(), 5);
    }

    #[test]
    fn test_top_k_deserializes_through_validation() {
        let k: TopK = serde_json::from_str("3").unwrap();
        assert_eq!(k, TopK::new(3));
        assert!(serde_json::from_str::<TopK>("-2").is_err());
    }

    #[test]
    fn test_empty_targets() {
        let targets: Vec<RankTarget<'_, i64>> = vec![];
        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &skills(&["python"]),
            "python",
            &targets,
            TopK::new(5),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_orders_by_score_then_id() {
        let python = skills(&["python"]);
        let java = skills(&["java"]);
        let targets = vec![
            RankTarget {
                id: 3,
                skills: &java,
                text: "",
            },
            RankTarget {
                id: 2,
                skills: &python,
                text: "",
            },
            RankTarget {
                id: 1,
                skills: &python,
                text: "",
            },
        ];
        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &python,
            "",
            &targets,
            TopK::new(10),
        );
        let ids: Vec<i32> = ranked.iter().map(|e| e.target_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(ranked[0].final_score, 0.7);
        assert_eq!(ranked[2].final_score, 0.0);
        assert_eq!(ranked[2].missing, vec!["java"]);
    }

    #[test]
    fn test_truncates_to_top_k() {
        let s = skills(&["sql"]);
        let targets: Vec<RankTarget<'_, u32>> = (0..5)
            .map(|id| RankTarget {
                id,
                skills: &s,
                text: "sql reporting",
            })
            .collect();
        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &s,
            "sql",
            &targets,
            TopK::new(2),
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].target_id, 0);
        assert_eq!(ranked[1].target_id, 1);
    }

    #[test]
    fn test_zero_top_k_returns_nothing() {
        let s = skills(&["sql"]);
        let targets = vec![RankTarget {
            id: 1,
            skills: &s,
            text: "sql",
        }];
        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &s,
            "sql",
            &targets,
            TopK::new(0),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_job_role_uses_query_skills_as_requirements() {
        let job = skills(&["python", "sql", "aws"]);
        let partial = skills(&["python", "sql", "go"]);
        let targets = vec![RankTarget {
            id: "cand-1",
            skills: &partial,
            text: "",
        }];

        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Job,
            &job,
            "",
            &targets,
            TopK::new(1),
        );
        assert_eq!(ranked[0].skill_score, 0.6667);
        assert_eq!(ranked[0].overlap, vec!["python", "sql"]);
        assert_eq!(ranked[0].missing, vec!["aws"]);

        let as_candidate = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &job,
            "",
            &targets,
            TopK::new(1),
        );
        assert_eq!(as_candidate[0].missing, vec!["go"]);
    }

    #[test]
    fn test_text_similarity_breaks_skill_ties() {
        let s = skills(&["rust"]);
        let targets = vec![
            RankTarget {
                id: 1,
                skills: &s,
                text: "gardening and cooking",
            },
            RankTarget {
                id: 2,
                skills: &s,
                text: "rust systems programming compilers",
            },
        ];
        let ranked = rank(
            &TextSimilarity::default(),
            QueryRole::Candidate,
            &s,
            "rust compilers",
            &targets,
            TopK::new(2),
        );
        assert_eq!(ranked[0].target_id, 2);
        assert!(ranked[0].text_score > 0.0);
        assert_eq!(ranked[1].text_score, 0.0);
    }
}
