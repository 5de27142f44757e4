//! Server-rendered recommendation page.
//!
//! The page is a thin view over the recommendation query. A
//! [`QueryRequested`] event carries the selected title; [`handle_query`]
//! turns it into a [`ResultsView`], and [`Pages::render`] draws the page.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::Recommendations,
    services::{recommendations, Engine},
};

pub const PAGE_TITLE: &str = "Movie Recommender";

const INDEX_TEMPLATE: &str = "index.html";

/// Raised when the user asks for recommendations for a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequested {
    pub title: String,
}

/// Rendered outcome of a query: a heading and a row of cards
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultsView {
    pub heading: String,
    pub cards: Vec<String>,
    pub found: bool,
}

/// Runs the recommendation query for an event and shapes it for display
pub fn handle_query(engine: &Engine, event: &QueryRequested) -> ResultsView {
    let result = recommendations::recommend(engine, &event.title);
    let found = result.is_found();
    let heading = match &result {
        Recommendations::Found { .. } => {
            format!("Top {} Cinematic Recommendations", engine.top_n())
        }
        Recommendations::NotFound { .. } => "No Recommendations".to_string(),
    };

    ResultsView {
        heading,
        cards: result.into_titles(),
        found,
    }
}

/// Template environment for the HTML pages
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("templates/index.html"))?;
        Ok(Self { env })
    }

    /// Renders the page, with result cards when a query was requested
    pub fn render(&self, engine: &Engine, event: Option<&QueryRequested>) -> AppResult<String> {
        let titles: Vec<&str> = engine.catalog().titles().collect();
        let results = event.map(|event| handle_query(engine, event));
        // only the first row with the title is selectable, as in the query
        let selected_index = event.and_then(|event| engine.index_of(&event.title));

        let html = self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            page_title => PAGE_TITLE,
            movie_count => titles.len(),
            vocabulary_size => engine.vocabulary_size(),
            titles => titles,
            selected_index => selected_index,
            results => results,
        })?;

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Movie, NOT_FOUND_MESSAGE};
    use crate::services::EngineOptions;

    fn engine() -> Engine {
        let catalog: Catalog = vec![
            Movie::new(1, "Alien", "space horror crew"),
            Movie::new(2, "Aliens", "space horror marines"),
            Movie::new(3, "Notting Hill", "romance london bookshop"),
            Movie::new(4, "<Script> & Co", "space crew"),
        ]
        .into_iter()
        .collect();
        Engine::build(catalog, EngineOptions::default()).unwrap()
    }

    #[test]
    fn test_handle_query_found() {
        let view = handle_query(
            &engine(),
            &QueryRequested {
                title: "Alien".to_string(),
            },
        );
        assert!(view.found);
        assert_eq!(view.heading, "Top 5 Cinematic Recommendations");
        assert_eq!(view.cards.len(), 3);
        assert!(!view.cards.contains(&"Alien".to_string()));
    }

    #[test]
    fn test_handle_query_not_found() {
        let view = handle_query(
            &engine(),
            &QueryRequested {
                title: "Nope".to_string(),
            },
        );
        assert!(!view.found);
        assert_eq!(view.cards, vec![NOT_FOUND_MESSAGE.to_string()]);
    }

    #[test]
    fn test_render_lists_all_titles() {
        let pages = Pages::new().unwrap();
        let html = pages.render(&engine(), None).unwrap();
        assert!(html.contains("Notting Hill"));
        assert!(!html.contains("Cinematic Recommendations"));
    }

    #[test]
    fn test_render_escapes_titles() {
        let pages = Pages::new().unwrap();
        let html = pages.render(&engine(), None).unwrap();
        assert!(!html.contains("<Script>"));
        assert!(html.contains("&lt;Script&gt; &amp; Co"));
    }

    #[test]
    fn test_render_with_results_marks_selection() {
        let pages = Pages::new().unwrap();
        let event = QueryRequested {
            title: "Aliens".to_string(),
        };
        let html = pages.render(&engine(), Some(&event)).unwrap();
        assert!(html.contains("Top 5 Cinematic Recommendations"));
        assert!(html.contains(r#"<option value="Aliens" selected>"#));
    }

    #[test]
    fn test_render_selects_only_first_duplicate_title() {
        let catalog: Catalog = vec![
            Movie::new(1, "Dup", "space crew"),
            Movie::new(2, "Other", "space robot"),
            Movie::new(3, "Dup", "space crew"),
        ]
        .into_iter()
        .collect();
        let engine = Engine::build(catalog, EngineOptions::default()).unwrap();
        let event = QueryRequested {
            title: "Dup".to_string(),
        };

        let html = Pages::new().unwrap().render(&engine, Some(&event)).unwrap();
        assert_eq!(html.matches(" selected>").count(), 1);
        assert_eq!(html.matches(r#"<option value="Dup">"#).count(), 1);
    }
}
