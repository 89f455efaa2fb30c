use std::collections::HashMap;

use crate::error::{MatchError, Result};

const RESOURCE: &str = "lemma exception table";

/// Dictionary-plus-suffix-rule English lemmatizer.
///
/// Irregular forms come from an exception table; everything else goes through
/// plural and verb-inflection rules. Input is expected lowercase.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
}

impl Lemmatizer {
    /// Parses a tab-separated `form<TAB>lemma` table. `#` starts a comment line.
    pub fn from_table(table: &str) -> Result<Self> {
        let mut exceptions = HashMap::new();

        for (lineno, line) in table.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t').map(str::trim);
            match (fields.next(), fields.next(), fields.next()) {
                (Some(form), Some(lemma), None) if !form.is_empty() && !lemma.is_empty() => {
                    exceptions.insert(form.to_lowercase(), lemma.to_lowercase());
                }
                _ => {
                    return Err(MatchError::init(
                        RESOURCE,
                        format!("line {}: expected `form<TAB>lemma`, got {line:?}", lineno + 1),
                    ));
                }
            }
        }

        Ok(Self { exceptions })
    }

    pub fn lemma(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }
        if word.len() <= 3 || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return word.to_string();
        }

        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = word.strip_suffix("sses") {
            return format!("{stem}ss");
        }
        for suffix in ["xes", "ches", "shes", "zzes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }
        if word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
            return word[..word.len() - 1].to_string();
        }

        if let Some(stem) = word.strip_suffix("ing") {
            if has_vowel(stem) && stem.len() >= 2 {
                return restore_stem(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ied") {
            return format!("{stem}y");
        }
        if word.ends_with("eed") {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if has_vowel(stem) && stem.len() >= 2 {
                return restore_stem(stem);
            }
        }

        word.to_string()
    }
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(|b| is_vowel(b) || b == b'y')
}

/// Undoes consonant doubling (`logging` → `log`) and restores a silent `e`
/// (`managing` → `manage`) on a stem left by stripping `-ing`/`-ed`.
fn restore_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();
    let last = b[n - 1];
    let prev = b[n - 2];

    if last == prev && !is_vowel(last) && !matches!(last, b'l' | b's' | b'z') {
        return stem[..n - 1].to_string();
    }

    if needs_silent_e(b) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn needs_silent_e(b: &[u8]) -> bool {
    let n = b.len();
    let last = b[n - 1];
    let prev = b[n - 2];

    if is_vowel(last) || matches!(last, b'w' | b'x' | b'y') {
        return false;
    }

    // Short consonant-vowel-consonant stems: cod(e), mak(e), writ(e), us(e).
    if n <= 4 && is_vowel(prev) && (n == 2 || !is_vowel(b[n - 3])) {
        return true;
    }

    match last {
        b'c' | b'v' | b'z' => true,
        b'g' => is_vowel(prev),
        b's' => is_vowel(prev) && n >= 3 && !is_vowel(b[n - 3]),
        b't' => prev == b'a' || prev == b'u',
        b'r' => prev == b'u',
        b'd' => prev == b'i' || prev == b'o',
        b'n' => prev == b'i' && n >= 3 && !is_vowel(b[n - 3]),
        _ => false,
    }
}
