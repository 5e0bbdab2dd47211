//! Haven Algo - High-performance lead matching service for the Haven
//! real-estate platform
//!
//! This library turns a lead's stated preferences and a catalog of
//! properties into ranked recommendations, turns behavioral signals into a
//! priority score, and turns matches into templated outreach handed to
//! external notification and scheduling collaborators.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    LeadScorer, MessageGenerator, Pipeline, PipelineOptions, RecommendationEngine, Scenario,
    SimilarityIndex, TfidfVectorizer,
};
pub use crate::models::{LeadRecord, LeadScore, LeadSignals, LeadStatus, MatchAnalysis, PropertyRecord};
