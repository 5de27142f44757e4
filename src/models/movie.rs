/// A single catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    /// Identifier carried over from the source file
    pub id: i64,
    /// Trimmed display title, used as the lookup key
    pub title: String,
    /// Space-joined bag of descriptive tokens (genres, cast, keywords, overview)
    pub tags: String,
}

impl Movie {
    /// Creates a new movie, trimming the title
    pub fn new(id: i64, title: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into().trim().to_string(),
            tags: tags.into(),
        }
    }
}

/// Ordered, immutable sequence of movies.
///
/// Position in the sequence is the row index used by the vector and
/// similarity matrices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Tag documents in catalog order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.tags.as_str())
    }
}

impl FromIterator<Movie> for Catalog {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
