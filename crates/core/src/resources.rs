//! Process-wide shared resources: the skill vocabulary and the linguistic pipeline.
//!
//! Both load at most once. Call [`init`] during startup to load them eagerly (and to
//! pick a vocabulary file); otherwise the embedded defaults load on first use.
//! Concurrent first use blocks on a single loader, so a resource is never built twice.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::Result;
use crate::nlp::LinguisticPipeline;
use crate::vocabulary::SkillVocabulary;

static VOCABULARY: OnceCell<SkillVocabulary> = OnceCell::new();
static PIPELINE: OnceCell<LinguisticPipeline> = OnceCell::new();

/// Where the shared resources come from.
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// Skill vocabulary CSV. `None` uses the vocabulary embedded in the crate.
    pub skills_path: Option<PathBuf>,
}

/// Loads both resources. Fails if either is missing or corrupt.
///
/// If a resource was already loaded (by an earlier `init` or by lazy first use),
/// the loaded instance is kept and `config` is not consulted for it.
pub fn init(config: &ResourceConfig) -> Result<()> {
    let vocabulary = VOCABULARY.get_or_try_init(|| match &config.skills_path {
        Some(path) => SkillVocabulary::from_path(path),
        None => SkillVocabulary::embedded(),
    })?;
    let _ = pipeline()?;
    info!(
        "Matching resources initialized ({} skills in vocabulary)",
        vocabulary.len()
    );
    Ok(())
}

pub fn vocabulary() -> Result<&'static SkillVocabulary> {
    VOCABULARY.get_or_try_init(SkillVocabulary::embedded)
}

pub fn pipeline() -> Result<&'static LinguisticPipeline> {
    PIPELINE.get_or_try_init(LinguisticPipeline::load)
}
