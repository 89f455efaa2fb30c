//! Résumé/job matching core.
//!
//! Blends two signals: overlap between canonical skill sets, and lexical TF-IDF
//! similarity between the free-text documents. Everything here is synchronous and
//! free of I/O except the one-time load of the shared resources in [`resources`].
//!
//! ```
//! use resumatch_core::{rank, score, QueryRole, RankTarget, SkillSet, TopK};
//!
//! let job: SkillSet = ["python", "sql", "aws"].into_iter().collect();
//! let cand: SkillSet = ["python", "sql"].into_iter().collect();
//! let result = score(&cand, "python and sql analyst", &job, "python sql aws engineer");
//! assert_eq!(result.missing, vec!["aws"]);
//!
//! let targets = [RankTarget {
//!     id: 7,
//!     skills: &job,
//!     text: "python sql aws engineer",
//! }];
//! let ranked = rank(QueryRole::Candidate, &cand, "python analyst", &targets, TopK::new(5));
//! assert_eq!(ranked[0].target_id, 7);
//! ```

pub mod error;
pub mod extractor;
pub mod nlp;
pub mod ranking;
pub mod resources;
pub mod scoring;
pub mod similarity;
pub mod skill_set;
pub mod vocabulary;

pub use error::{MatchError, Result};
pub use extractor::SkillExtractor;
pub use ranking::{QueryRole, RankTarget, RankedEntry, TopK};
pub use resources::{init, ResourceConfig};
pub use scoring::{ScoreResult, SKILL_WEIGHT, TEXT_WEIGHT};
pub use similarity::{TextSimilarity, VectorizerConfig};
pub use skill_set::SkillSet;
pub use vocabulary::SkillVocabulary;

/// Extracts canonical skills from free text using the shared pipeline and vocabulary.
///
/// Fails only if the shared resources cannot be loaded.
pub fn extract_skills(text: &str) -> Result<SkillSet> {
    let pipeline = resources::pipeline()?;
    let vocabulary = resources::vocabulary()?;
    Ok(SkillExtractor::new(pipeline, vocabulary).extract(text))
}

/// Scores one candidate against one job with the default vectorizer.
pub fn score(
    candidate_skills: &SkillSet,
    candidate_text: &str,
    job_skills: &SkillSet,
    job_text: &str,
) -> ScoreResult {
    scoring::score(
        &TextSimilarity::default(),
        candidate_skills,
        candidate_text,
        job_skills,
        job_text,
    )
}

/// Ranks `targets` against a query with the default vectorizer.
pub fn rank<Id: Ord + Clone>(
    role: QueryRole,
    query_skills: &SkillSet,
    query_text: &str,
    targets: &[RankTarget<'_, Id>],
    top_k: TopK,
) -> Vec<RankedEntry<Id>> {
    ranking::rank(
        &TextSimilarity::default(),
        role,
        query_skills,
        query_text,
        targets,
        top_k,
    )
}
