use std::path::PathBuf;

use cinematch::models::Recommendations;
use cinematch::services::{load_catalog, recommendations, Engine, EngineOptions};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/movies_dict.json")
}

fn sample_engine() -> Engine {
    let catalog = load_catalog(sample_path()).unwrap();
    Engine::build(catalog, EngineOptions::default()).unwrap()
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = load_catalog(sample_path()).unwrap();
    assert_eq!(catalog.len(), 12);
    assert_eq!(catalog.get(0).unwrap().title, "Avatar");
    assert_eq!(catalog.get(0).unwrap().id, 19995);
}

#[test]
fn test_similarity_diagonal_and_symmetry() {
    let engine = sample_engine();
    let sim = engine.similarity();
    let n = engine.catalog().len();

    for i in 0..n {
        let row_is_zero = engine.vectors().row(i).iter().all(|&c| c == 0);
        let expected = if row_is_zero { 0.0 } else { 1.0 };
        assert_eq!(sim[[i, i]], expected);
        for j in 0..n {
            assert_eq!(sim[[i, j]], sim[[j, i]]);
            assert!((0.0..=1.0).contains(&sim[[i, j]]));
        }
    }
}

#[test]
fn test_rebuild_is_deterministic() {
    let a = sample_engine();
    let b = sample_engine();
    assert_eq!(a.vectors(), b.vectors());
    assert_eq!(a.similarity(), b.similarity());
    assert_eq!(a.vectorizer().vocabulary(), b.vectorizer().vocabulary());
}

#[test]
fn test_every_title_gets_five_others() {
    let engine = sample_engine();
    for movie in engine.catalog().iter() {
        match recommendations::recommend(&engine, &movie.title) {
            Recommendations::Found { titles } => {
                assert_eq!(titles.len(), 5);
                assert!(!titles.contains(&movie.title));
            }
            Recommendations::NotFound { .. } => panic!("{} should be found", movie.title),
        }
    }
}

#[test]
fn test_superhero_neighbours() {
    let engine = sample_engine();
    let titles = recommendations::recommend(&engine, "Batman v Superman: Dawn of Justice")
        .into_titles();
    assert!(titles.contains(&"Superman Returns".to_string()));
    assert!(!titles.contains(&"Notting Hill".to_string()));
}

#[test]
fn test_vocabulary_cap_applies() {
    let catalog = load_catalog(sample_path()).unwrap();
    let options = EngineOptions {
        max_features: 10,
        top_n: 5,
    };
    let engine = Engine::build(catalog, options).unwrap();
    assert_eq!(engine.vocabulary_size(), 10);
    assert_eq!(engine.vectors().ncols(), 10);
}
