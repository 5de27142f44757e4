pub mod catalog;
pub mod engine;
pub mod recommendations;
pub mod similarity;
pub mod stop_words;
pub mod vectorizer;

pub use catalog::load_catalog;
pub use engine::{Engine, EngineOptions};
