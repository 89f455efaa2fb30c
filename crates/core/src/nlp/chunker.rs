/// Longest phrase (in tokens) emitted from a content-word run.
pub const MAX_PHRASE_TOKENS: usize = 4;

/// Builds noun-phrase candidates from content-word runs.
///
/// `runs` holds maximal sequences of lowercase words uninterrupted by stopwords or
/// punctuation. Every contiguous span of 2..=[`MAX_PHRASE_TOKENS`] words in each run
/// is emitted, so "scalable distributed systems design" yields "distributed systems"
/// alongside the longer spans. Single words are left to the token stream.
pub fn phrase_spans(runs: &[Vec<&str>]) -> Vec<String> {
    let mut phrases = Vec::new();

    for run in runs {
        for len in 2..=MAX_PHRASE_TOKENS.min(run.len()) {
            for window in run.windows(len) {
                phrases.push(window.join(" "));
            }
        }
    }

    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_cover_every_window() {
        let runs = vec![vec!["scalable", "distributed", "systems"]];
        let spans = phrase_spans(&runs);
        assert_eq!(
            spans,
            vec![
                "scalable distributed",
                "distributed systems",
                "scalable distributed systems"
            ]
        );
    }

    #[test]
    fn test_single_word_runs_produce_nothing() {
        let runs = vec![vec!["python"], vec!["sql"]];
        assert!(phrase_spans(&runs).is_empty());
    }

    #[test]
    fn test_span_length_is_capped() {
        let runs = vec![vec!["a1", "b1", "c1", "d1", "e1", "f1"]];
        let spans = phrase_spans(&runs);
        assert!(spans.iter().all(|s| s.split(' ').count() <= MAX_PHRASE_TOKENS));
        // 5 bigrams + 4 trigrams + 3 four-grams
        assert_eq!(spans.len(), 12);
    }
}
