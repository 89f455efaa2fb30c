//! The closed set of canonical skills the extractor recognizes.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{MatchError, Result};
use crate::skill_set::normalize_skill;

/// Vocabulary compiled into the crate, used when no external CSV is configured.
const EMBEDDED_SKILLS_CSV: &str = include_str!("../data/skills.csv");

const RESOURCE: &str = "skill vocabulary";

/// Immutable set of canonical (lowercase, trimmed) skill names.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: HashSet<String>,
}

impl SkillVocabulary {
    /// Loads the vocabulary bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_csv(EMBEDDED_SKILLS_CSV)
    }

    /// Loads a vocabulary CSV from disk. A missing or unreadable file is fatal.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MatchError::init(RESOURCE, format!("{}: {e}", path.display())))?;
        let vocabulary = Self::from_csv(&contents)?;
        info!(
            "Loaded {} skills from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    /// Parses CSV text where the first column of each row is a skill name.
    ///
    /// Quoted first columns (`"ci, cd",tooling`) are unquoted; rows with a blank
    /// first column are skipped. An empty result is rejected.
    pub fn from_csv(contents: &str) -> Result<Self> {
        let skills: HashSet<String> = contents
            .lines()
            .filter_map(first_csv_field)
            .filter_map(|field| normalize_skill(&field))
            .collect();

        if skills.is_empty() {
            return Err(MatchError::init(RESOURCE, "no skills found"));
        }

        debug!("Parsed skill vocabulary with {} entries", skills.len());
        Ok(Self { skills })
    }

    pub fn contains(&self, term: &str) -> bool {
        self.skills.contains(term)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillVocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            skills: iter
                .into_iter()
                .filter_map(|s| normalize_skill(s.as_ref()))
                .collect(),
        }
    }
}

fn first_csv_field(line: &str) -> Option<String> {
    let line = line.trim_start();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix('"') {
        let mut field = String::new();
        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    break;
                }
            } else {
                field.push(c);
            }
        }
        return Some(field);
    }

    Some(line.split(',').next().unwrap_or_default().to_string())
}
