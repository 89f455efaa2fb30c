//! Text similarity over an ad hoc TF-IDF vector space.
//!
//! Every call builds its own space from exactly the documents it was given (the
//! query plus its targets). Nothing is cached between calls, so a result depends
//! only on the call's inputs.
//!
//! Weighting follows the usual smoothed scheme:
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, `w = count × idf`, then L2 normalization.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::nlp::stopwords::VECTORIZER_STOPWORDS;

static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| VECTORIZER_STOPWORDS.iter().copied().collect());

/// Vectorizer settings. The defaults are the production configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Smallest and largest n-gram size, inclusive.
    pub ngram_range: (usize, usize),
    /// Keep only this many terms, by total corpus count. `None` keeps all.
    pub max_features: Option<usize>,
    pub remove_stopwords: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(20_000),
            remove_stopwords: true,
        }
    }
}

/// Cosine similarity between documents in a per-call TF-IDF space.
#[derive(Debug, Clone, Default)]
pub struct TextSimilarity {
    config: VectorizerConfig,
}

type TermCounts = HashMap<String, u32>;

/// Sparse L2-normalized vector, sorted by term index.
type SparseVector = Vec<(usize, f64)>;

impl TextSimilarity {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Similarity of two documents in `[0, 1]`. `0.0` when either has no terms.
    pub fn similarity(&self, query: &str, doc: &str) -> f64 {
        self.batch_similarity(query, &[doc])
            .first()
            .copied()
            .unwrap_or(0.0)
    }

    /// Similarity of `query` to each of `docs`, in the order of `docs`.
    ///
    /// One vector space is fitted over the query and all documents together, so the
    /// idf weights reflect the whole batch.
    pub fn batch_similarity<S: AsRef<str>>(&self, query: &str, docs: &[S]) -> Vec<f64> {
        if docs.is_empty() {
            return Vec::new();
        }

        let corpus: Vec<TermCounts> = std::iter::once(query)
            .chain(docs.iter().map(AsRef::as_ref))
            .map(|text| self.count_terms(text))
            .collect();

        let space = TermSpace::fit(&corpus, self.config.max_features);
        let vectors: Vec<SparseVector> = corpus.iter().map(|c| space.transform(c)).collect();

        let Some((query_vec, doc_vecs)) = vectors.split_first() else {
            return vec![0.0; docs.len()];
        };
        doc_vecs
            .iter()
            .map(|doc_vec| cosine(query_vec, doc_vec))
            .collect()
    }

    /// Lowercased word tokens (two or more word characters), minus stopwords.
    fn tokens(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .map(str::to_lowercase)
            .filter(|t| !self.config.remove_stopwords || !STOPWORDS.contains(t.as_str()))
            .collect()
    }

    fn count_terms(&self, text: &str) -> TermCounts {
        let tokens = self.tokens(text);
        let (min_n, max_n) = self.config.ngram_range;
        let mut counts = TermCounts::new();

        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                *counts.entry(window.join(" ")).or_insert(0) += 1;
            }
        }

        counts
    }
}

/// Term index and idf weights fitted over one corpus.
struct TermSpace {
    index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TermSpace {
    fn fit(corpus: &[TermCounts], max_features: Option<usize>) -> Self {
        let mut totals: HashMap<&str, (u64, u32)> = HashMap::new();
        for counts in corpus {
            for (term, &count) in counts {
                let entry = totals.entry(term.as_str()).or_insert((0, 0));
                entry.0 += u64::from(count);
                entry.1 += 1;
            }
        }

        let mut terms: Vec<(&str, u64, u32)> = totals
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();

        if let Some(limit) = max_features {
            if terms.len() > limit {
                terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                terms.truncate(limit);
            }
        }
        terms.sort_by(|a, b| a.0.cmp(b.0));

        let n_docs = corpus.len() as f64;
        let mut index = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (i, (term, _, df)) in terms.into_iter().enumerate() {
            index.insert(term.to_string(), i);
            idf.push(((1.0 + n_docs) / (1.0 + f64::from(df))).ln() + 1.0);
        }

        Self { index, idf }
    }

    fn transform(&self, counts: &TermCounts) -> SparseVector {
        let mut vector: SparseVector = counts
            .iter()
            .filter_map(|(term, &count)| {
                self.index
                    .get(term)
                    .map(|&i| (i, f64::from(count) * self.idf[i]))
            })
            .collect();
        vector.sort_by_key(|&(i, _)| i);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }
}

/// Dot product of two normalized sparse vectors, clamped to `[0, 1]`.
fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    if dot.is_finite() {
        dot.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TextSimilarity {
        TextSimilarity::default()
    }

    #[test]
    fn test_identical_documents_score_one() {
        let text = "Rust engineer building distributed storage engines";
        let sim = engine().similarity(text, text);
        assert!((sim - 1.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn test_disjoint_documents_score_zero() {
        let sim = engine().similarity("python django postgres", "welding forklift warehouse");
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_empty_or_stopword_only_text_scores_zero() {
        assert_eq!(engine().similarity("", "python developer"), 0.0);
        assert_eq!(engine().similarity("python developer", ""), 0.0);
        assert_eq!(engine().similarity("", ""), 0.0);
        assert_eq!(engine().similarity("the and of", "python developer"), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        let a = engine().similarity("PYTHON Developer", "python developer");
        assert!((a - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap_is_between_zero_and_one() {
        let sim = engine().similarity(
            "senior python developer with aws experience",
            "python developer needed for data pipelines",
        );
        assert!(sim > 0.0 && sim < 1.0, "got {sim}");
    }

    #[test]
    fn test_bigrams_reward_word_order() {
        let query = "machine learning engineer";
        let ordered = engine().similarity(query, "machine learning engineer role");
        let shuffled = engine().similarity(query, "learning machine role engineer");
        assert!(ordered > shuffled);
    }

    #[test]
    fn test_batch_matches_order_of_docs() {
        let docs = ["rust systems", "cooking recipes", "rust compilers and systems"];
        let scores = engine().batch_similarity("rust systems programming", &docs);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[1], 0.0);
        assert!(scores[0] > 0.0);
        assert!(scores[2] > 0.0);
    }

    #[test]
    fn test_batch_of_nothing() {
        let docs: [&str; 0] = [];
        assert!(engine().batch_similarity("anything", &docs).is_empty());
    }

    #[test]
    fn test_batch_is_reproducible() {
        let docs = vec!["kafka streaming".to_string(), "spark batch jobs".to_string()];
        let e = engine();
        assert_eq!(
            e.batch_similarity("kafka and spark", &docs),
            e.batch_similarity("kafka and spark", &docs)
        );
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let e = TextSimilarity::new(VectorizerConfig {
            ngram_range: (1, 1),
            max_features: Some(1),
            remove_stopwords: true,
        });
        // "rust" is the most frequent term; only it survives the cap.
        let sim = e.similarity("rust rust python", "rust go");
        assert!((sim - 1.0).abs() < 1e-9, "got {sim}");
    }

    #[test]
    fn test_idf_downweights_terms_shared_by_all_documents() {
        let counts: Vec<TermCounts> = vec![
            [("shared".to_string(), 1), ("rare".to_string(), 1)].into_iter().collect(),
            [("shared".to_string(), 1)].into_iter().collect(),
        ];
        let space = TermSpace::fit(&counts, None);
        let shared = space.idf[space.index["shared"]];
        let rare = space.idf[space.index["rare"]];
        assert!((shared - 1.0).abs() < 1e-12);
        assert!(rare > shared);
    }
}
