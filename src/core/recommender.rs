use std::sync::{Arc, RwLock};

use serde_json::{Map, Value};

use crate::core::index::SimilarityIndex;
use crate::core::vectorizer::TfidfVectorizer;
use crate::models::PropertyRecord;

/// Immutable catalog snapshot: the properties, the vocabulary fitted on
/// them, and the similarity index over their vectors
///
/// Snapshots are replaced wholesale, never patched in place, so a query
/// vector is always compared against the vocabulary that produced it.
#[derive(Debug, Default)]
struct CatalogSnapshot {
    properties: Vec<PropertyRecord>,
    vectorizer: TfidfVectorizer,
    index: SimilarityIndex,
}

impl CatalogSnapshot {
    fn build(properties: Vec<PropertyRecord>) -> Self {
        let corpus: Vec<String> = properties.iter().map(property_document).collect();

        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus);

        let vectors = corpus
            .iter()
            .map(|doc| vectorizer.transform(doc).expect("vectorizer fitted above"))
            .collect();

        Self {
            properties,
            vectorizer,
            index: SimilarityIndex::new(vectors),
        }
    }
}

/// Text document a property contributes to the corpus
fn property_document(property: &PropertyRecord) -> String {
    format!(
        "{} {} {} {} {}",
        property.title,
        property.description,
        property.property_type,
        property.location,
        property.features.join(" ")
    )
}

/// Coerce a free-form preference value into text
///
/// Missing keys and non-text values contribute an empty string so that a
/// malformed preference degrades the match instead of failing it.
pub fn preference_text(preferences: &Map<String, Value>, key: &str) -> String {
    match preferences.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        _ => String::new(),
    }
}

/// Content-based property recommender
///
/// Exclusively owns the catalog and its derived vectors. Updates build a
/// fresh snapshot and swap it under a write lock, so concurrent `recommend`
/// calls observe either the previous or the fully rebuilt catalog, never a
/// partially rebuilt one.
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: RwLock<Arc<CatalogSnapshot>>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Arc::new(CatalogSnapshot::default())),
        }
    }

    /// Replace the entire tracked catalog
    ///
    /// This is a full replace, not a merge: callers supplying partial
    /// updates must pass the complete desired catalog. The vocabulary is
    /// re-fitted, so recommendation results from before the update are
    /// stale and must be re-queried.
    pub fn update_catalog(&self, properties: Vec<PropertyRecord>) {
        let count = properties.len();
        let snapshot = Arc::new(CatalogSnapshot::build(properties));

        let mut guard = self.catalog.write().expect("catalog lock poisoned");
        *guard = snapshot;
        drop(guard);

        tracing::info!("Catalog rebuilt with {} properties", count);
    }

    /// Append one property and rebuild
    ///
    /// The write lock is held across the read-modify-write so concurrent
    /// appends cannot lose each other's updates.
    pub fn add_property(&self, property: PropertyRecord) {
        let mut guard = self.catalog.write().expect("catalog lock poisoned");
        let mut properties = guard.properties.clone();
        properties.push(property);
        *guard = Arc::new(CatalogSnapshot::build(properties));
    }

    /// Top-k properties for a lead's stated preferences
    ///
    /// Builds a pseudo-document from the `location`, `price_range` and
    /// `features` preference fields. An unpopulated catalog (cold start)
    /// yields an empty list rather than an error.
    pub fn recommend(&self, preferences: &Map<String, Value>, k: usize) -> Vec<PropertyRecord> {
        let snapshot = {
            self.catalog
                .read()
                .expect("catalog lock poisoned")
                .clone()
        };

        if snapshot.index.is_empty() {
            return Vec::new();
        }

        let pseudo_document = format!(
            "{} {} {}",
            preference_text(preferences, "location"),
            preference_text(preferences, "price_range"),
            preference_text(preferences, "features")
        );

        let query = match snapshot.vectorizer.transform(&pseudo_document) {
            Ok(vector) => vector,
            Err(e) => {
                tracing::error!("Preference vectorization failed: {}", e);
                return Vec::new();
            }
        };

        snapshot
            .index
            .query(&query, k)
            .into_iter()
            .map(|(idx, _)| snapshot.properties[idx].clone())
            .collect()
    }

    pub fn catalog_size(&self) -> usize {
        self.catalog
            .read()
            .expect("catalog lock poisoned")
            .properties
            .len()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
