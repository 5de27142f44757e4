use serde::Serialize;

/// Message returned in place of results when the queried title is unknown
pub const NOT_FOUND_MESSAGE: &str = "Movie not found in database";

/// A movie ranked against a query movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredMovie {
    /// Row index in the catalog
    pub index: usize,
    pub id: i64,
    pub title: String,
    /// Cosine similarity against the queried movie
    pub score: f64,
}

/// Outcome of a recommendation query
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendations {
    /// Titles ordered by descending similarity
    Found { titles: Vec<String> },
    /// The title did not match any catalog entry
    NotFound { message: String },
}

impl Recommendations {
    pub fn not_found() -> Self {
        Recommendations::NotFound {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Recommendations::Found { .. })
    }

    /// Flattens the result into display lines, the sentinel message included
    pub fn into_titles(self) -> Vec<String> {
        match self {
            Recommendations::Found { titles } => titles,
            Recommendations::NotFound { message } => vec![message],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_single_sentinel() {
        let result = Recommendations::not_found();
        assert!(!result.is_found());
        assert_eq!(result.into_titles(), vec![NOT_FOUND_MESSAGE.to_string()]);
    }

    #[test]
    fn test_status_serialization() {
        let found = Recommendations::Found {
            titles: vec!["Alien".to_string()],
        };
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["status"], "found");
        assert_eq!(json["titles"][0], "Alien");

        let json = serde_json::to_value(Recommendations::not_found()).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["message"], NOT_FOUND_MESSAGE);
    }
}
