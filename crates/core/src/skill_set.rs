use std::collections::btree_set;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of canonical skills attached to a candidate or a job.
///
/// Every element is trimmed and lowercased on the way in, so two sets built from
/// `"Python "` and `"python"` compare equal. Iteration is in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a skill after normalizing it. Blank input is ignored.
    /// Returns `true` if the set did not already hold the skill.
    pub fn insert(&mut self, skill: impl AsRef<str>) -> bool {
        match normalize_skill(skill.as_ref()) {
            Some(s) => self.0.insert(s),
            None => false,
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        match normalize_skill(skill) {
            Some(s) => self.0.contains(&s),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Skills present in both sets, ascending.
    pub fn intersection<'a>(&'a self, other: &'a SkillSet) -> impl Iterator<Item = &'a String> {
        self.0.intersection(&other.0)
    }

    /// Skills in `self` that `other` lacks, ascending.
    pub fn difference<'a>(&'a self, other: &'a SkillSet) -> impl Iterator<Item = &'a String> {
        self.0.difference(&other.0)
    }

    /// Sorted, owned copy for persistence layers that store skills as a list.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Trims and lowercases a skill name; `None` when nothing is left.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for SkillSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for skill in iter {
            self.insert(skill);
        }
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_normalizes_case_and_whitespace() {
        let set: SkillSet = ["  Python", "SQL ", "python"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("python"));
        assert!(set.contains(" Sql"));
    }

    #[test]
    fn test_blank_skills_are_dropped() {
        let set: SkillSet = ["", "   ", "\t"].into_iter().collect();
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set: SkillSet = ["sql", "aws", "python"].into_iter().collect();
        assert_eq!(set.to_vec(), vec!["aws", "python", "sql"]);
    }

    #[test]
    fn test_serializes_as_sorted_list() {
        let set: SkillSet = ["Rust", "go"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["go","rust"]"#);

        let back: SkillSet = serde_json::from_str(r#"[" Go","RUST","rust"]"#).unwrap();
        assert_eq!(back, set);
    }
}
