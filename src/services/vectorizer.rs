use std::collections::{BTreeMap, HashMap};

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::EngineError;

use super::stop_words::is_english_stop_word;

/// Two or more word characters, matched after lower-casing
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\w\w+\b").unwrap_or_else(|e| panic!("invalid token pattern: {e}"))
});

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Bag-of-words term counter with a frequency-capped vocabulary
///
/// Vocabulary selection ranks tokens by their total count across all
/// documents. Ties at the cutoff are broken lexicographically so that two
/// fits over the same documents always agree. Columns of the produced
/// matrix follow the selected vocabulary in lexicographic order.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: Option<usize>,
    stop_words: bool,
    vocabulary: BTreeMap<String, usize>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: None,
            stop_words: false,
            vocabulary: BTreeMap::new(),
        }
    }

    /// Keep only the `max_features` most frequent tokens
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Drop English stop words before counting
    #[must_use]
    pub fn with_stop_words_english(mut self) -> Self {
        self.stop_words = true;
        self
    }

    /// Fitted vocabulary, token to column index
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Lower-cases `text` and splits it into tokens, stop words removed if enabled
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words || !is_english_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Learn the vocabulary from `documents`
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<(), EngineError> {
        let mut term_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for token in self.tokenize(doc.as_ref()) {
                *term_freq.entry(token).or_insert(0) += 1;
            }
        }

        if term_freq.is_empty() {
            return Err(EngineError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max_features) = self.max_features {
            ranked.truncate(max_features);
        }

        // BTreeMap iterates in lexicographic order, which fixes column order
        let selected: BTreeMap<String, usize> =
            ranked.into_iter().map(|(term, _)| (term, 0)).collect();
        self.vocabulary = selected
            .into_keys()
            .enumerate()
            .map(|(column, term)| (term, column))
            .collect();

        tracing::debug!(vocabulary = self.vocabulary.len(), "Vocabulary fitted");
        Ok(())
    }

    /// Count vocabulary tokens in each document, one row per document
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Array2<u32> {
        let mut matrix = Array2::<u32>::zeros((documents.len(), self.vocabulary.len()));
        for (row, doc) in documents.iter().enumerate() {
            for token in self.tokenize(doc.as_ref()) {
                if let Some(&column) = self.vocabulary.get(&token) {
                    matrix[[row, column]] += 1;
                }
            }
        }
        matrix
    }

    pub fn fit_transform<S: AsRef<str>>(
        &mut self,
        documents: &[S],
    ) -> Result<Array2<u32>, EngineError> {
        self.fit(documents)?;
        Ok(self.transform(documents))
    }
}
