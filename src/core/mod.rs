// Core algorithm exports
pub mod index;
pub mod pipeline;
pub mod recommender;
pub mod scoring;
pub mod templates;
pub mod vectorizer;

pub use index::{cosine_similarity, SimilarityIndex};
pub use pipeline::{LeadOutcome, NewLead, Pipeline, PipelineOptions, PropertyOutcome, ShowingOutcome};
pub use recommender::RecommendationEngine;
pub use scoring::LeadScorer;
pub use templates::{MessageGenerator, Scenario, TemplateError};
pub use vectorizer::{FeatureVector, TfidfVectorizer, VectorizerError};
