use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, ScoredMovie, NOT_FOUND_MESSAGE},
    services::recommendations,
    ui::QueryRequested,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub index: usize,
    pub id: i64,
    pub title: String,
}

impl MovieResponse {
    fn new(index: usize, movie: &Movie) -> Self {
        Self {
            index,
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResponse {
    Found {
        query: String,
        recommendations: Vec<ScoredMovie>,
    },
    NotFound {
        query: String,
        message: String,
    },
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog in order, for populating a title selector
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieResponse>> {
    let movies = state
        .engine
        .catalog()
        .iter()
        .enumerate()
        .map(|(index, movie)| MovieResponse::new(index, movie))
        .collect();
    Json(movies)
}

/// Recommend movies similar to an exact title
///
/// An unknown title is answered with `200` and a `not_found` status.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params
        .title
        .ok_or_else(|| AppError::InvalidInput("missing 'title' query parameter".to_string()))?;

    let response = match recommendations::recommend_scored(&state.engine, &title) {
        Some(movies) => {
            tracing::info!(title = %title, results = movies.len(), "Recommendations served");
            RecommendationResponse::Found {
                query: title,
                recommendations: movies,
            }
        }
        None => {
            tracing::info!(title = %title, "Title not in catalog");
            RecommendationResponse::NotFound {
                query: title,
                message: NOT_FOUND_MESSAGE.to_string(),
            }
        }
    };

    Ok(Json(response))
}

/// Render the recommendation page; a `title` parameter is a query request
pub async fn index_page(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Html<String>> {
    let event = params.title.map(|title| QueryRequested { title });
    let html = state.pages.render(&state.engine, event.as_ref())?;
    Ok(Html(html))
}
