//! Linguistic pipeline: tokenization, lemmatization, phrase chunking and stopwords.
//!
//! The pipeline is deterministic and rule-based. Its tables are embedded in the
//! crate and parsed once; after construction it is read-only and `Sync`, so a single
//! instance is shared process-wide (see [`crate::resources`]).

pub mod chunker;
pub mod lemmatizer;
pub mod stopwords;
pub mod tokenizer;

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use chunker::phrase_spans;
use lemmatizer::Lemmatizer;
use stopwords::PIPELINE_STOPWORDS;
use tokenizer::{tokenize, TokenKind};

const EMBEDDED_LEMMA_TABLE: &str = include_str!("../../data/lemma_exceptions.tsv");

/// One analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appeared in the input.
    pub text: String,
    /// Lowercase surface form.
    pub lower: String,
    pub lemma: String,
    pub is_punct: bool,
    pub is_stop: bool,
}

/// The result of running the pipeline over a text.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    pub tokens: Vec<Token>,
    /// Lowercase noun-phrase candidates, in order of appearance.
    pub noun_chunks: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LinguisticPipeline {
    stopwords: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl LinguisticPipeline {
    /// Builds the pipeline from its embedded tables.
    pub fn load() -> Result<Self> {
        Self::with_lemma_table(EMBEDDED_LEMMA_TABLE)
    }

    pub fn with_lemma_table(table: &str) -> Result<Self> {
        let lemmatizer = Lemmatizer::from_table(table)?;
        let stopwords: HashSet<&'static str> = PIPELINE_STOPWORDS.iter().copied().collect();
        debug!("Linguistic pipeline ready ({} stopwords)", stopwords.len());
        Ok(Self {
            stopwords,
            lemmatizer,
        })
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    pub fn stopwords(&self) -> &HashSet<&'static str> {
        &self.stopwords
    }

    /// Lemma of a single lowercase word.
    pub fn lemma(&self, word: &str) -> String {
        self.lemmatizer.lemma(word)
    }

    pub fn process(&self, text: &str) -> Doc {
        let mut tokens = Vec::new();
        let mut runs: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        let raw = tokenize(text);
        let lowered: Vec<String> = raw.iter().map(|t| t.text.to_lowercase()).collect();

        for (raw_token, lower) in raw.iter().zip(&lowered) {
            let is_punct = raw_token.kind == TokenKind::Punct;
            let is_stop = !is_punct && self.is_stopword(lower);

            if is_punct || is_stop {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            } else {
                current.push(lower.as_str());
            }

            let lemma = if is_punct {
                lower.clone()
            } else {
                self.lemmatizer.lemma(lower)
            };

            tokens.push(Token {
                text: raw_token.text.to_string(),
                lower: lower.clone(),
                lemma,
                is_punct,
                is_stop,
            });
        }
        if !current.is_empty() {
            runs.push(current);
        }

        let noun_chunks = phrase_spans(&runs);
        Doc {
            tokens,
            noun_chunks,
        }
    }
}
