use std::collections::HashMap;
use std::time::Instant;

use ndarray::Array2;

use crate::{
    error::EngineError,
    models::{Catalog, Movie},
};

use super::{
    similarity::cosine_similarity,
    vectorizer::{CountVectorizer, DEFAULT_MAX_FEATURES},
};

/// Default number of recommendations per query
pub const DEFAULT_TOP_N: usize = 5;

/// Build options for [`Engine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Vocabulary cap
    pub max_features: usize,
    /// Recommendations returned per query
    pub top_n: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Read-only similarity engine over a fixed catalog
///
/// Built once at startup. Catalog order, vector rows and similarity
/// rows/columns share the same indexing and never change afterwards.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    vectorizer: CountVectorizer,
    vectors: Array2<u32>,
    similarity: Array2<f64>,
    /// First row index for every title
    title_index: HashMap<String, usize>,
    top_n: usize,
}

impl Engine {
    /// Vectorizes the catalog tags and computes the similarity matrix
    pub fn build(catalog: Catalog, options: EngineOptions) -> Result<Self, EngineError> {
        if catalog.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        if options.max_features == 0 {
            return Err(EngineError::InvalidOption(
                "max_features must be greater than zero".to_string(),
            ));
        }
        if options.top_n == 0 {
            return Err(EngineError::InvalidOption(
                "top_n must be greater than zero".to_string(),
            ));
        }

        let start = Instant::now();
        let documents: Vec<&str> = catalog.tags().collect();

        let mut vectorizer = CountVectorizer::new()
            .with_stop_words_english()
            .with_max_features(options.max_features);
        let vectors = vectorizer.fit_transform(&documents)?;
        let similarity = cosine_similarity(&vectors);

        let mut title_index = HashMap::with_capacity(catalog.len());
        for (index, title) in catalog.titles().enumerate() {
            title_index.entry(title.to_string()).or_insert(index);
        }

        let empty_rows = vectors
            .rows()
            .into_iter()
            .filter(|row| row.iter().all(|&c| c == 0))
            .count();

        tracing::info!(
            movies = catalog.len(),
            vocabulary = vectorizer.vocabulary_size(),
            empty_rows,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Similarity engine built"
        );

        Ok(Self {
            catalog,
            vectorizer,
            vectors,
            similarity,
            title_index,
            top_n: options.top_n,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn movie(&self, index: usize) -> Option<&Movie> {
        self.catalog.get(index)
    }

    /// Term-count matrix, one row per movie
    pub fn vectors(&self) -> &Array2<u32> {
        &self.vectors
    }

    /// Square cosine similarity matrix in catalog order
    pub fn similarity(&self) -> &Array2<f64> {
        &self.similarity
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn vectorizer(&self) -> &CountVectorizer {
        &self.vectorizer
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Row index of the first movie whose title matches exactly
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }
}
