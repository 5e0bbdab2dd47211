use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Dense numeric representation of a text under a fitted vocabulary
///
/// Dimension equals the vocabulary size at the last fit. Vectors produced by
/// different fits are not comparable.
pub type FeatureVector = Vec<f64>;

/// Errors raised by the vectorizer
#[derive(Debug, Error)]
pub enum VectorizerError {
    #[error("vectorizer has not been fitted with a corpus")]
    Unfitted,
}

/// Term-frequency / inverse-document-frequency text vectorizer
///
/// `fit` learns a vocabulary and per-term idf weights from a corpus;
/// `transform` maps a text onto that vocabulary. Re-fitting replaces the
/// vocabulary entirely and invalidates every previously produced vector, so
/// callers must re-transform their queries after a re-fit.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    fitted: bool,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary and idf weights from a corpus
    ///
    /// Uses the smoothed formulation `ln((1 + n) / (1 + df)) + 1` so that a
    /// term present in every document still carries a positive weight.
    pub fn fit(&mut self, corpus: &[String]) {
        let n_docs = corpus.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in corpus {
            let mut seen: HashSet<String> = HashSet::new();
            for term in tokenize(doc) {
                if seen.insert(term.clone()) {
                    *doc_freq.entry(term).or_insert(0) += 1;
                }
            }
        }

        // Sort terms so the same corpus always yields the same vector layout
        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        self.idf = terms
            .iter()
            .map(|(_, df)| ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0)
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();
        self.fitted = true;
    }

    /// Map a text onto the fitted vocabulary
    ///
    /// Terms outside the vocabulary contribute nothing. Calling this before
    /// any `fit` is a programmer error and fails with `Unfitted`.
    pub fn transform(&self, text: &str) -> Result<FeatureVector, VectorizerError> {
        if !self.fitted {
            return Err(VectorizerError::Unfitted);
        }

        let mut vector = vec![0.0; self.vocabulary.len()];
        for term in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] += 1.0;
            }
        }
        for (idx, value) in vector.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        Ok(vector)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Lowercased alphanumeric tokens
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = TfidfVectorizer::new();
        let result = vectorizer.transform("modern condo");

        assert!(matches!(result, Err(VectorizerError::Unfitted)));
    }

    #[test]
    fn test_fit_builds_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus(&["modern condo downtown", "spacious family home"]));

        assert!(vectorizer.is_fitted());
        assert_eq!(vectorizer.vocabulary_size(), 6);
    }

    #[test]
    fn test_unknown_terms_contribute_nothing() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus(&["modern condo"]));

        let vector = vectorizer.transform("victorian mansion").unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus(&[
            "condo downtown",
            "condo suburb",
            "condo garden",
        ]));

        // Vocabulary is sorted: condo=0, downtown=1, garden=2, suburb=3
        let vector = vectorizer.transform("condo downtown").unwrap();

        // "downtown" appears in one document, "condo" in all three
        assert!(vector[1] > vector[0]);
        assert!(vector[0] > 0.0);
    }

    #[test]
    fn test_refit_replaces_vocabulary() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit(&corpus(&["one two three"]));
        assert_eq!(vectorizer.vocabulary_size(), 3);

        vectorizer.fit(&corpus(&["four five"]));
        assert_eq!(vectorizer.vocabulary_size(), 2);

        let vector = vectorizer.transform("one two three").unwrap();
        assert!(vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tokens = tokenize("3 bedrooms, modern kitchen!");
        assert_eq!(tokens, vec!["3", "bedrooms", "modern", "kitchen"]);
    }
}
