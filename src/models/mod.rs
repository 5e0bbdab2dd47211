// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AppointmentRequest, LeadActivity, LeadRecord, LeadScore, LeadSignals, LeadStatus,
    MatchAnalysis, PropertyRecord, PropertyView, ScoreBreakdown, ScoringWeights,
};
pub use requests::{CreateLeadRequest, CreatePropertyRequest, PreviewMessageRequest, UpdateLeadStatusRequest};
pub use responses::{CatalogUpdateResponse, ErrorResponse, HealthResponse, PreviewMessageResponse};
