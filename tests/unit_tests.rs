// Unit tests for Haven Algo

use std::collections::HashMap;

use haven_algo::core::{
    cosine_similarity, LeadScorer, MessageGenerator, RecommendationEngine, Scenario,
    SimilarityIndex, TemplateError, TfidfVectorizer, VectorizerError,
};
use haven_algo::models::{LeadSignals, PropertyRecord, PropertyView};
use haven_algo::services::extract_match_score;
use serde_json::{json, Map, Value};

fn property(id: &str, title: &str, location: &str, description: &str) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        price: 300_000.0,
        location: location.to_string(),
        property_type: "condo".to_string(),
        bedrooms: 2,
        bathrooms: 1,
        square_feet: 900,
        features: vec!["modern".to_string()],
        available: true,
    }
}

fn preferences(location: &str, price_range: &str, features: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("location".to_string(), json!(location));
    map.insert("price_range".to_string(), json!(price_range));
    map.insert("features".to_string(), json!(features));
    map
}

#[test]
fn test_transform_requires_fit() {
    let vectorizer = TfidfVectorizer::new();
    assert!(matches!(
        vectorizer.transform("anything"),
        Err(VectorizerError::Unfitted)
    ));
}

#[test]
fn test_out_of_vocabulary_text_has_zero_similarity_everywhere() {
    let corpus = vec![
        "modern condo downtown".to_string(),
        "spacious family home garden".to_string(),
    ];
    let mut vectorizer = TfidfVectorizer::new();
    vectorizer.fit(&corpus);

    let vectors: Vec<_> = corpus
        .iter()
        .map(|doc| vectorizer.transform(doc).unwrap())
        .collect();
    let query = vectorizer.transform("chateau riverside penthouse").unwrap();

    for vector in &vectors {
        assert_eq!(cosine_similarity(&query, vector), 0.0);
    }
}

#[test]
fn test_index_query_sorted_and_stable() {
    let index = SimilarityIndex::new(vec![
        vec![1.0, 0.0],
        vec![0.5, 0.5],
        vec![1.0, 0.0],
    ]);

    let results = index.query(&vec![1.0, 0.0], 3);

    for window in results.windows(2) {
        assert!(window[0].1 >= window[1].1);
    }
    // The two identical vectors tie; insertion order decides
    assert_eq!(results[0].0, 0);
    assert_eq!(results[1].0, 2);
}

#[test]
fn test_recommend_on_empty_catalog_never_raises() {
    let engine = RecommendationEngine::new();
    assert!(engine.recommend(&preferences("SF", "300000", "modern"), 5).is_empty());
}

#[test]
fn test_recommend_single_catalog_entry() {
    // Catalog with exactly one listing: that listing is the only result
    let engine = RecommendationEngine::new();
    engine.update_catalog(vec![property("1", "Loft A", "SF", "modern")]);

    let results = engine.recommend(&preferences("SF", "250000-350000", "modern"), 5);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Loft A");
}

#[test]
fn test_zero_signal_lead_scores_exactly_half() {
    let scorer = LeadScorer::with_default_weights();
    let result = scorer.score("lead", &LeadSignals::default());

    assert!((result.score - 0.5).abs() < 1e-9);
}

#[test]
fn test_budget_zero_does_not_divide_by_zero() {
    let scorer = LeadScorer::with_default_weights();
    let signals = LeadSignals {
        budget: 0.0,
        viewed_properties: vec![PropertyView {
            property_id: "1".to_string(),
            price: 500_000.0,
            view_time: 60.0,
        }],
        ..Default::default()
    };

    let result = scorer.score("lead", &signals);
    assert_eq!(result.breakdown.budget_alignment, 0.5);
}

#[test]
fn test_known_scenario_always_produces_text() {
    let generator = MessageGenerator::with_seed(5);
    let mut context = HashMap::new();
    context.insert("name".to_string(), "John".to_string());
    context.insert("property_type".to_string(), "condo".to_string());

    for _ in 0..10 {
        let message = generator.generate(Scenario::FollowUp, &context).unwrap();
        assert!(!message.is_empty());
    }
}

#[test]
fn test_unknown_scenario_raises_template_error() {
    let generator = MessageGenerator::with_seed(5);
    let result = generator.generate_named("spam_blast", &HashMap::new());

    assert!(matches!(result, Err(TemplateError::UnknownScenario(_))));
}

#[test]
fn test_match_score_extraction_fallback() {
    assert_eq!(extract_match_score("Match score: 92"), 92);
    assert_eq!(extract_match_score("no digits here"), 50);
    assert_eq!(extract_match_score("999 out of range"), 100);
}
