use crate::core::vectorizer::FeatureVector;

/// Cosine similarity between two vectors
///
/// A zero vector (for example, preferences with no recognized vocabulary
/// terms) compares as 0 against anything instead of dividing by zero.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// In-memory similarity index over the vectorized catalog
///
/// Vectors are positionally aligned 1:1 with the catalog entries they were
/// derived from; queries return catalog positions.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vectors: Vec<FeatureVector>,
}

impl SimilarityIndex {
    pub fn new(vectors: Vec<FeatureVector>) -> Self {
        Self { vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Top-k catalog positions by descending cosine similarity
    ///
    /// Ties keep catalog insertion order. `k` larger than the index is
    /// clamped; `k = 0` and an empty index both yield an empty result.
    pub fn query(&self, query: &FeatureVector, k: usize) -> Vec<(usize, f64)> {
        if k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, vector)| (idx, cosine_similarity(query, vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1
                .partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k.min(self.vectors.len()));

        scored
    }
}
