use crate::models::{Recommendations, ScoredMovie};

use super::engine::Engine;

/// Ranks every other movie against the movie at `index`
///
/// Scores are sorted in descending order. The sort is stable, so equal
/// scores keep catalog order. At most `k` movies are returned and the
/// queried movie itself is never among them.
pub fn similar_movies(engine: &Engine, index: usize, k: usize) -> Vec<ScoredMovie> {
    let similarity = engine.similarity();
    if index >= similarity.nrows() {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f64)> = similarity
        .row(index)
        .iter()
        .copied()
        .enumerate()
        .filter(|(other, _)| *other != index)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .take(k)
        .filter_map(|(other, score)| {
            engine.movie(other).map(|movie| ScoredMovie {
                index: other,
                id: movie.id,
                title: movie.title.clone(),
                score,
            })
        })
        .collect()
}

/// Scored recommendations for an exact title, or `None` if the title is unknown
pub fn recommend_scored(engine: &Engine, title: &str) -> Option<Vec<ScoredMovie>> {
    let index = engine.index_of(title)?;
    Some(similar_movies(engine, index, engine.top_n()))
}

/// Recommends titles similar to `title`
///
/// An unknown title is an expected outcome and yields the not-found sentinel
/// rather than an error.
pub fn recommend(engine: &Engine, title: &str) -> Recommendations {
    let result = match recommend_scored(engine, title) {
        Some(movies) => Recommendations::Found {
            titles: movies.into_iter().map(|m| m.title).collect(),
        },
        None => Recommendations::not_found(),
    };

    tracing::info!(
        title = %title,
        found = result.is_found(),
        "Recommendation query"
    );

    result
}
