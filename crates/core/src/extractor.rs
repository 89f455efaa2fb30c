//! Skill extraction: raw text to a canonical [`SkillSet`].

use std::collections::HashSet;

use crate::nlp::LinguisticPipeline;
use crate::skill_set::SkillSet;
use crate::vocabulary::SkillVocabulary;

/// Compound tokens (`Python/Django`, `Python-based`) also contribute their parts.
const COMPOUND_SEPARATORS: [char; 2] = ['-', '/'];

/// Maps free text onto vocabulary skills.
///
/// Candidate terms are token lemmas, lowercase surface forms and noun-phrase spans.
/// A compound token is tried whole (`ci/cd`) and split on `-` and `/`.
/// A term matches if it is in the vocabulary as written or with its spaces replaced
/// by hyphens (`machine learning` → `machine-learning`).
#[derive(Debug, Clone, Copy)]
pub struct SkillExtractor<'a> {
    pipeline: &'a LinguisticPipeline,
    vocabulary: &'a SkillVocabulary,
}

impl<'a> SkillExtractor<'a> {
    pub fn new(pipeline: &'a LinguisticPipeline, vocabulary: &'a SkillVocabulary) -> Self {
        Self {
            pipeline,
            vocabulary,
        }
    }

    pub fn extract(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::new();
        if text.trim().is_empty() {
            return skills;
        }

        let doc = self.pipeline.process(text);

        let mut parts: Vec<String> = Vec::new();
        for token in doc.tokens.iter().filter(|t| !t.is_punct) {
            if token.lower.contains(COMPOUND_SEPARATORS) {
                for part in token.lower.split(COMPOUND_SEPARATORS).filter(|p| !p.is_empty()) {
                    parts.push(self.pipeline.lemma(part));
                    parts.push(part.to_string());
                }
            }
        }

        let mut candidates: HashSet<&str> = HashSet::new();
        for token in doc.tokens.iter().filter(|t| !t.is_punct) {
            candidates.insert(token.lemma.as_str());
            candidates.insert(token.lower.as_str());
        }
        candidates.extend(parts.iter().map(String::as_str));
        candidates.extend(doc.noun_chunks.iter().map(String::as_str));

        for candidate in candidates {
            let term = candidate.trim().to_lowercase();
            if term.is_empty() || self.pipeline.is_stopword(&term) {
                continue;
            }
            if self.vocabulary.contains(&term) {
                skills.insert(&term);
            }
            let hyphenated = term.replace(' ', "-");
            if self.vocabulary.contains(&hyphenated) {
                skills.insert(&hyphenated);
            }
        }

        skills
    }
}
