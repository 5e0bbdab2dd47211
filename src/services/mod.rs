// External collaborator boundary
//
// Each collaborator is a narrow async trait with a reqwest-backed client
// behind it. All of them are best-effort from the pipeline's point of view:
// failures are logged and degraded at the call site, never propagated as
// pipeline-fatal errors.
pub mod assistant;
pub mod calendly;
pub mod followup;

pub use assistant::{extract_match_score, AssistantError, CompletionClient};
pub use calendly::{CalendlyClient, ScheduleError};
pub use followup::{FollowUpClient, NotifyError};

use async_trait::async_trait;

use crate::models::{AppointmentRequest, LeadRecord, MatchAnalysis, PropertyRecord};

/// Text-completion collaborator
///
/// Used for description enhancement, personalized message drafting and
/// match analysis narrative.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Rewrite a listing description into marketing copy
    async fn enhance_property_description(
        &self,
        property: &PropertyRecord,
    ) -> Result<String, AssistantError>;

    /// Draft a personalized reply for a lead, optionally about a property
    async fn generate_lead_response(
        &self,
        lead: &LeadRecord,
        property: Option<&PropertyRecord>,
    ) -> Result<String, AssistantError>;

    /// Judge how well a property fits a lead's preferences (0-100)
    async fn analyze_property_match(
        &self,
        lead: &LeadRecord,
        property: &PropertyRecord,
    ) -> Result<MatchAnalysis, AssistantError>;
}

/// Outbound notification collaborator (CRM messaging)
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, lead: &LeadRecord, message: &str) -> Result<(), NotifyError>;
}

/// Appointment scheduling collaborator
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn schedule_appointment(
        &self,
        appointment: &AppointmentRequest,
    ) -> Result<(), ScheduleError>;
}
