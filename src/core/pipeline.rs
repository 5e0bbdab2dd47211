use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::recommender::RecommendationEngine;
use crate::core::scoring::LeadScorer;
use crate::core::templates::{MessageGenerator, Scenario, TemplateError};
use crate::models::{
    AppointmentRequest, LeadRecord, LeadScore, LeadSignals, LeadStatus, MatchAnalysis,
    PropertyRecord,
};
use crate::services::{Assistant, Notifier, Scheduler};

/// Fallback text when the assistant cannot draft a personalized reply
const GENERIC_REPLY: &str =
    "Thank you for your interest. I'll be in touch shortly to help you find your perfect property.";

/// Orchestrator tuning knobs
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Minimum analysis score for a lead to be notified about a property
    pub match_threshold: u8,
    /// Concurrency cap for the scan-all-leads analysis fan-out
    pub analysis_concurrency: usize,
    /// Default recommendation count for new leads
    pub default_recommendations: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            match_threshold: 70,
            analysis_concurrency: 4,
            default_recommendations: 5,
        }
    }
}

/// New-lead intake parameters
#[derive(Debug, Clone, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferences: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub signals: LeadSignals,
    #[serde(rename = "scheduleConsultation", alias = "schedule_consultation", default)]
    pub schedule_consultation: bool,
}

/// Result of the new-property workflow
#[derive(Debug, Clone, Serialize)]
pub struct PropertyOutcome {
    #[serde(rename = "propertyId")]
    pub property_id: String,
    /// Whether the description enhancement succeeded
    pub enhanced: bool,
    /// Leads whose match score met the threshold and were notified
    #[serde(rename = "notifiedLeads")]
    pub notified_leads: Vec<String>,
    /// Leads whose notification failed; not retried
    #[serde(rename = "failedNotifications")]
    pub failed_notifications: Vec<String>,
}

/// Result of the new-lead workflow
#[derive(Debug, Clone, Serialize)]
pub struct LeadOutcome {
    #[serde(rename = "leadId")]
    pub lead_id: String,
    pub status: LeadStatus,
    #[serde(rename = "welcomeMessage")]
    pub welcome_message: String,
    pub recommendations: Vec<PropertyRecord>,
    #[serde(rename = "matchAnalysis")]
    pub match_analysis: Vec<MatchAnalysis>,
    pub scheduled: bool,
}

/// Result of the showing-scheduling workflow
#[derive(Debug, Clone, Serialize)]
pub struct ShowingOutcome {
    #[serde(rename = "leadId")]
    pub lead_id: String,
    pub scheduled: bool,
    /// New lead status, present only when the status actually advanced
    pub status: Option<LeadStatus>,
    #[serde(rename = "confirmationMessage")]
    pub confirmation_message: Option<String>,
}

/// Matching pipeline orchestrator
///
/// Sequences the "new property" and "new lead" workflows over the
/// recommendation engine, scorer and message generator, calling out to the
/// external collaborators at each suspension point. Collaborator failures
/// degrade to fallbacks; only template errors escape, since they indicate a
/// packaging defect rather than runtime noise.
pub struct Pipeline {
    engine: Arc<RecommendationEngine>,
    scorer: LeadScorer,
    generator: MessageGenerator,
    assistant: Arc<dyn Assistant>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    leads: RwLock<Vec<LeadRecord>>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        engine: Arc<RecommendationEngine>,
        scorer: LeadScorer,
        generator: MessageGenerator,
        assistant: Arc<dyn Assistant>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            engine,
            scorer,
            generator,
            assistant,
            notifier,
            scheduler,
            leads: RwLock::new(Vec::new()),
            options,
        }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Process a newly listed property
    ///
    /// Enhances the description (best-effort), extends the catalog, fans
    /// out match analysis over every known lead and notifies those at or
    /// above the match threshold. Notification is fire-and-forget: one
    /// lead's failure never affects the others.
    pub async fn process_new_property(
        &self,
        mut property: PropertyRecord,
    ) -> Result<PropertyOutcome, TemplateError> {
        let enhanced = match self.assistant.enhance_property_description(&property).await {
            Ok(text) => {
                property.description = text;
                true
            }
            Err(e) => {
                warn!(
                    "Description enhancement failed for property {}, keeping original: {}",
                    property.id, e
                );
                false
            }
        };

        self.engine.add_property(property.clone());

        let leads: Vec<LeadRecord> = self.leads.read().expect("lead registry poisoned").clone();
        info!(
            "Scanning {} leads for matches against property {}",
            leads.len(),
            property.id
        );

        // Each lead's analysis is independent; bound the fan-out so the
        // analysis collaborator's rate limits are respected
        let analyses: Vec<MatchAnalysis> = stream::iter(leads.iter().cloned())
            .map(|lead| {
                let assistant = Arc::clone(&self.assistant);
                let property = property.clone();
                async move {
                    match assistant.analyze_property_match(&lead, &property).await {
                        Ok(analysis) => Some(analysis),
                        Err(e) => {
                            error!("Match analysis failed for lead {}: {}", lead.id, e);
                            None
                        }
                    }
                }
            })
            .buffer_unordered(self.options.analysis_concurrency.max(1))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        // Notify the strongest matches first, ordered by lead priority
        let priorities: HashMap<&str, f64> = leads
            .iter()
            .map(|lead| {
                (
                    lead.id.as_str(),
                    self.scorer.score(&lead.id, &lead.signals).score,
                )
            })
            .collect();

        let mut selected: Vec<&MatchAnalysis> = analyses
            .iter()
            .filter(|a| a.match_score >= self.options.match_threshold)
            .collect();
        selected.sort_by(|a, b| {
            let score_a = priorities.get(a.lead_id.as_str()).copied().unwrap_or(0.0);
            let score_b = priorities.get(b.lead_id.as_str()).copied().unwrap_or(0.0);
            score_b.partial_cmp(&score_a).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut notified_leads = Vec::new();
        let mut failed_notifications = Vec::new();

        for analysis in selected {
            let Some(lead) = leads.iter().find(|l| l.id == analysis.lead_id) else {
                continue;
            };

            let mut context = HashMap::new();
            context.insert("name".to_string(), lead.name.clone());
            context.insert("property_title".to_string(), property.title.clone());
            let message = self.generator.generate(Scenario::PropertyUpdate, &context)?;

            match self.notifier.send_message(lead, &message).await {
                Ok(()) => {
                    info!(
                        "Notified lead {} about property {} (score {})",
                        lead.id, property.id, analysis.match_score
                    );
                    notified_leads.push(lead.id.clone());
                }
                Err(e) => {
                    error!("Notification failed for lead {}: {}", lead.id, e);
                    failed_notifications.push(lead.id.clone());
                }
            }
        }

        Ok(PropertyOutcome {
            property_id: property.id,
            enhanced,
            notified_leads,
            failed_notifications,
        })
    }

    /// Process a newly arrived lead
    ///
    /// Registers the lead, queries recommendations, re-ranks them by
    /// analysis score and drafts a welcome message. When a consultation was
    /// requested, the lead only advances to scheduled status if the
    /// scheduling collaborator reports success.
    pub async fn process_new_lead(&self, intake: NewLead) -> LeadOutcome {
        let lead = LeadRecord {
            id: Uuid::new_v4().to_string(),
            name: intake.name,
            email: intake.email,
            phone: intake.phone,
            preferences: intake.preferences,
            status: LeadStatus::New,
            created_at: chrono::Utc::now(),
            assigned_agent: None,
            signals: intake.signals,
        };

        self.leads
            .write()
            .expect("lead registry poisoned")
            .push(lead.clone());
        info!("Registered lead {}", lead.id);

        let mut recommendations = self
            .engine
            .recommend(&lead.preferences, self.options.default_recommendations);

        // A failed analysis leaves that property without an entry; it sorts
        // as zero below
        let mut match_analysis: Vec<MatchAnalysis> = Vec::new();
        for property in &recommendations {
            match self.assistant.analyze_property_match(&lead, property).await {
                Ok(analysis) => match_analysis.push(analysis),
                Err(e) => {
                    error!("Match analysis failed for property {}: {}", property.id, e);
                }
            }
        }

        recommendations.sort_by_key(|property| {
            let score = match_analysis
                .iter()
                .find(|a| a.property_id == property.id)
                .map(|a| a.match_score)
                .unwrap_or(0);
            std::cmp::Reverse(score)
        });

        let welcome_message = match self.assistant.generate_lead_response(&lead, None).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Welcome drafting failed for lead {}, using generic reply: {}", lead.id, e);
                GENERIC_REPLY.to_string()
            }
        };

        let mut status = LeadStatus::New;
        let mut scheduled = false;

        if intake.schedule_consultation {
            let appointment = AppointmentRequest {
                lead_id: lead.id.clone(),
                lead_name: lead.name.clone(),
                lead_email: lead.email.clone(),
                scheduled_time: chrono::Utc::now(),
                property_address: "Office Location".to_string(),
                property_title: String::new(),
            };

            match self.scheduler.schedule_appointment(&appointment).await {
                Ok(()) => {
                    scheduled = true;
                    status = LeadStatus::ScheduledShowing;
                    self.update_lead_status(&lead.id, status);
                }
                Err(e) => {
                    // Status stays New; the lead itself is still created
                    error!("Consultation scheduling failed for lead {}: {}", lead.id, e);
                }
            }
        }

        LeadOutcome {
            lead_id: lead.id,
            status,
            welcome_message,
            recommendations,
            match_analysis,
            scheduled,
        }
    }

    /// Schedule a property showing for an existing lead
    ///
    /// The status only advances to scheduled when the collaborator reports
    /// success.
    pub async fn schedule_showing(
        &self,
        appointment: AppointmentRequest,
    ) -> Result<ShowingOutcome, TemplateError> {
        let confirmation_message = if self.lead(&appointment.lead_id).is_some() {
            let mut context = HashMap::new();
            context.insert("name".to_string(), appointment.lead_name.clone());
            context.insert(
                "time".to_string(),
                appointment.scheduled_time.format("%H:%M").to_string(),
            );
            context.insert("address".to_string(), appointment.property_address.clone());
            Some(self.generator.generate(Scenario::AppointmentReminder, &context)?)
        } else {
            None
        };

        match self.scheduler.schedule_appointment(&appointment).await {
            Ok(()) => {
                let advanced =
                    self.update_lead_status(&appointment.lead_id, LeadStatus::ScheduledShowing);
                Ok(ShowingOutcome {
                    lead_id: appointment.lead_id,
                    scheduled: true,
                    status: advanced.then_some(LeadStatus::ScheduledShowing),
                    confirmation_message,
                })
            }
            Err(e) => {
                error!(
                    "Showing scheduling failed for lead {}: {}",
                    appointment.lead_id, e
                );
                Ok(ShowingOutcome {
                    lead_id: appointment.lead_id,
                    scheduled: false,
                    status: None,
                    confirmation_message,
                })
            }
        }
    }

    /// Set a lead's status; any state may move to any other state
    pub fn update_lead_status(&self, lead_id: &str, status: LeadStatus) -> bool {
        let mut leads = self.leads.write().expect("lead registry poisoned");
        match leads.iter_mut().find(|l| l.id == lead_id) {
            Some(lead) => {
                lead.status = status;
                true
            }
            None => false,
        }
    }

    pub fn lead(&self, lead_id: &str) -> Option<LeadRecord> {
        self.leads
            .read()
            .expect("lead registry poisoned")
            .iter()
            .find(|l| l.id == lead_id)
            .cloned()
    }

    pub fn leads(&self) -> Vec<LeadRecord> {
        self.leads.read().expect("lead registry poisoned").clone()
    }

    pub fn lead_count(&self) -> usize {
        self.leads.read().expect("lead registry poisoned").len()
    }

    /// Priority score for one lead
    pub fn lead_score(&self, lead_id: &str) -> Option<LeadScore> {
        self.lead(lead_id)
            .map(|lead| self.scorer.score(&lead.id, &lead.signals))
    }

    /// All leads scored and ordered by descending priority
    pub fn prioritized_leads(&self) -> Vec<LeadScore> {
        let mut scores: Vec<LeadScore> = self
            .leads()
            .iter()
            .map(|lead| self.scorer.score(&lead.id, &lead.signals))
            .collect();

        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scores
    }

    /// Render an outreach message for a named scenario
    ///
    /// Template errors surface to the caller; they indicate a defect in the
    /// request or the template packaging, not runtime data noise.
    pub fn render_message(
        &self,
        scenario: &str,
        context: &HashMap<String, String>,
    ) -> Result<String, TemplateError> {
        self.generator.generate_named(scenario, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AssistantError, NotifyError, ScheduleError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Assistant stub with switchable failure modes
    struct StubAssistant {
        score: u8,
        fail_enhance: bool,
        fail_analysis: bool,
        fail_response: bool,
    }

    impl StubAssistant {
        fn scoring(score: u8) -> Self {
            Self {
                score,
                fail_enhance: false,
                fail_analysis: false,
                fail_response: false,
            }
        }
    }

    #[async_trait]
    impl Assistant for StubAssistant {
        async fn enhance_property_description(
            &self,
            property: &PropertyRecord,
        ) -> Result<String, AssistantError> {
            if self.fail_enhance {
                return Err(AssistantError::ApiError("enhancement down".into()));
            }
            Ok(format!("Stunning: {}", property.description))
        }

        async fn generate_lead_response(
            &self,
            lead: &LeadRecord,
            _property: Option<&PropertyRecord>,
        ) -> Result<String, AssistantError> {
            if self.fail_response {
                return Err(AssistantError::ApiError("drafting down".into()));
            }
            Ok(format!("Welcome, {}!", lead.name))
        }

        async fn analyze_property_match(
            &self,
            lead: &LeadRecord,
            property: &PropertyRecord,
        ) -> Result<MatchAnalysis, AssistantError> {
            if self.fail_analysis {
                return Err(AssistantError::ApiError("analysis down".into()));
            }
            Ok(MatchAnalysis {
                lead_id: lead.id.clone(),
                property_id: property.id.clone(),
                match_score: self.score,
                analysis: format!("Scored {} for {}", self.score, property.title),
            })
        }
    }

    /// Notifier stub that records sends and can fail on demand
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail_all: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_message(&self, lead: &LeadRecord, _message: &str) -> Result<(), NotifyError> {
            if self.fail_all {
                return Err(NotifyError::ApiError("gateway down".into()));
            }
            self.sent.lock().unwrap().push(lead.id.clone());
            Ok(())
        }
    }

    struct StubScheduler {
        succeed: bool,
    }

    #[async_trait]
    impl Scheduler for StubScheduler {
        async fn schedule_appointment(
            &self,
            _appointment: &AppointmentRequest,
        ) -> Result<(), ScheduleError> {
            if self.succeed {
                Ok(())
            } else {
                Err(ScheduleError::ApiError("no slots".into()))
            }
        }
    }

    fn pipeline_with(
        assistant: StubAssistant,
        notifier: RecordingNotifier,
        scheduler: StubScheduler,
    ) -> Pipeline {
        Pipeline::new(
            Arc::new(RecommendationEngine::new()),
            LeadScorer::with_default_weights(),
            MessageGenerator::with_seed(11),
            Arc::new(assistant),
            Arc::new(notifier),
            Arc::new(scheduler),
            PipelineOptions::default(),
        )
    }

    fn property(id: &str, title: &str) -> PropertyRecord {
        PropertyRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: "modern home".to_string(),
            price: 350_000.0,
            location: "San Francisco, CA".to_string(),
            property_type: "condo".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            square_feet: 1500,
            features: vec!["modern kitchen".to_string()],
            available: true,
        }
    }

    fn intake(name: &str, schedule_consultation: bool) -> NewLead {
        let mut preferences = serde_json::Map::new();
        preferences.insert("location".to_string(), json!("San Francisco"));
        preferences.insert("price_range".to_string(), json!("300000-400000"));
        preferences.insert("features".to_string(), json!("modern kitchen"));

        NewLead {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0123".to_string(),
            preferences,
            signals: LeadSignals::default(),
            schedule_consultation,
        }
    }

    #[tokio::test]
    async fn test_new_lead_without_consultation_stays_new() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );
        pipeline.engine().update_catalog(vec![property("1", "Loft A")]);

        let outcome = pipeline.process_new_lead(intake("John", false)).await;

        assert_eq!(outcome.status, LeadStatus::New);
        assert_eq!(pipeline.lead(&outcome.lead_id).unwrap().status, LeadStatus::New);
        assert!(!outcome.welcome_message.is_empty());
        assert_eq!(outcome.recommendations.len(), 1);
        assert!(!outcome.scheduled);
    }

    #[tokio::test]
    async fn test_new_lead_scheduling_failure_keeps_status_new() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: false },
        );

        let outcome = pipeline.process_new_lead(intake("John", true)).await;

        assert!(!outcome.scheduled);
        assert_eq!(outcome.status, LeadStatus::New);
        assert_eq!(pipeline.lead(&outcome.lead_id).unwrap().status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_new_lead_scheduling_success_advances_status() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        let outcome = pipeline.process_new_lead(intake("John", true)).await;

        assert!(outcome.scheduled);
        assert_eq!(outcome.status, LeadStatus::ScheduledShowing);
        assert_eq!(
            pipeline.lead(&outcome.lead_id).unwrap().status,
            LeadStatus::ScheduledShowing
        );
    }

    #[tokio::test]
    async fn test_new_lead_with_empty_catalog_gets_no_recommendations() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        let outcome = pipeline.process_new_lead(intake("John", false)).await;

        assert!(outcome.recommendations.is_empty());
        assert!(outcome.match_analysis.is_empty());
        assert!(!outcome.welcome_message.is_empty());
    }

    #[tokio::test]
    async fn test_new_lead_welcome_falls_back_on_assistant_failure() {
        let assistant = StubAssistant {
            score: 80,
            fail_enhance: false,
            fail_analysis: false,
            fail_response: true,
        };
        let pipeline = pipeline_with(
            assistant,
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        let outcome = pipeline.process_new_lead(intake("John", false)).await;

        assert_eq!(outcome.welcome_message, GENERIC_REPLY);
    }

    #[tokio::test]
    async fn test_new_property_notifies_matching_leads() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(85),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        pipeline.process_new_lead(intake("John", false)).await;
        pipeline.process_new_lead(intake("Ana", false)).await;

        let outcome = pipeline
            .process_new_property(property("p1", "Beautiful 3 Bedroom Home"))
            .await
            .unwrap();

        assert!(outcome.enhanced);
        assert_eq!(outcome.notified_leads.len(), 2);
        assert!(outcome.failed_notifications.is_empty());
        assert_eq!(pipeline.engine().catalog_size(), 1);
    }

    #[tokio::test]
    async fn test_new_property_below_threshold_notifies_nobody() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(40),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        pipeline.process_new_lead(intake("John", false)).await;

        let outcome = pipeline
            .process_new_property(property("p1", "Beautiful 3 Bedroom Home"))
            .await
            .unwrap();

        assert!(outcome.notified_leads.is_empty());
        assert!(outcome.failed_notifications.is_empty());
    }

    #[tokio::test]
    async fn test_new_property_enhancement_failure_keeps_listing() {
        let assistant = StubAssistant {
            score: 85,
            fail_enhance: true,
            fail_analysis: false,
            fail_response: false,
        };
        let pipeline = pipeline_with(
            assistant,
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        let outcome = pipeline
            .process_new_property(property("p1", "Loft A"))
            .await
            .unwrap();

        assert!(!outcome.enhanced);
        assert_eq!(pipeline.engine().catalog_size(), 1);
    }

    #[tokio::test]
    async fn test_new_property_notification_failures_do_not_abort() {
        let notifier = RecordingNotifier {
            sent: Mutex::new(Vec::new()),
            fail_all: true,
        };
        let pipeline = pipeline_with(StubAssistant::scoring(85), notifier, StubScheduler {
            succeed: true,
        });

        pipeline.process_new_lead(intake("John", false)).await;
        pipeline.process_new_lead(intake("Ana", false)).await;

        let outcome = pipeline
            .process_new_property(property("p1", "Loft A"))
            .await
            .unwrap();

        assert!(outcome.notified_leads.is_empty());
        assert_eq!(outcome.failed_notifications.len(), 2);
    }

    #[tokio::test]
    async fn test_new_property_analysis_failure_yields_no_notifications() {
        let assistant = StubAssistant {
            score: 85,
            fail_enhance: false,
            fail_analysis: true,
            fail_response: false,
        };
        let pipeline = pipeline_with(
            assistant,
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        pipeline.process_new_lead(intake("John", false)).await;

        let outcome = pipeline
            .process_new_property(property("p1", "Loft A"))
            .await
            .unwrap();

        // The property still lands in the catalog
        assert!(outcome.notified_leads.is_empty());
        assert_eq!(pipeline.engine().catalog_size(), 1);
    }

    #[tokio::test]
    async fn test_schedule_showing_failure_leaves_status() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: false },
        );

        let lead = pipeline.process_new_lead(intake("John", false)).await;

        let appointment = AppointmentRequest {
            lead_id: lead.lead_id.clone(),
            lead_name: "John".to_string(),
            lead_email: "john@example.com".to_string(),
            scheduled_time: chrono::Utc::now(),
            property_address: "12 Oak St".to_string(),
            property_title: "Loft A".to_string(),
        };

        let outcome = pipeline.schedule_showing(appointment).await.unwrap();

        assert!(!outcome.scheduled);
        assert!(outcome.status.is_none());
        assert!(outcome.confirmation_message.is_some());
        assert_eq!(pipeline.lead(&lead.lead_id).unwrap().status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_update_lead_status_unknown_lead() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        assert!(!pipeline.update_lead_status("missing", LeadStatus::Contacted));
    }

    #[tokio::test]
    async fn test_lead_score_defaults_to_neutral() {
        let pipeline = pipeline_with(
            StubAssistant::scoring(80),
            RecordingNotifier::default(),
            StubScheduler { succeed: true },
        );

        let lead = pipeline.process_new_lead(intake("John", false)).await;
        let score = pipeline.lead_score(&lead.lead_id).unwrap();

        assert!((score.score - 0.5).abs() < 1e-9);
    }
}
