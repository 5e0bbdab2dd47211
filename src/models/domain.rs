use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property listing tracked by the recommendation catalog
///
/// Records are immutable once vectorized; a changed listing must go through
/// a full catalog update so its vector is re-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub location: String,
    #[serde(rename = "propertyType", alias = "property_type", default)]
    pub property_type: String,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(rename = "squareFeet", alias = "square_feet", default)]
    pub square_feet: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool { true }

/// Lead lifecycle status, driven entirely by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Negotiating,
    ScheduledShowing,
    Closed,
    Lost,
}

/// A registered lead with free-form property preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    pub status: LeadStatus,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "assignedAgent", alias = "assigned_agent", default)]
    pub assigned_agent: Option<String>,
    #[serde(default)]
    pub signals: LeadSignals,
}

/// Behavioral signals collected for a lead
///
/// Every field is optional in the wire format; an empty collection means
/// "no signal", which the scorer treats as neutral rather than negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadSignals {
    /// Observed response latencies in seconds
    #[serde(rename = "responseTimes", alias = "response_times", default)]
    pub response_times: Vec<f64>,
    #[serde(default)]
    pub activities: Vec<LeadActivity>,
    #[serde(rename = "viewedProperties", alias = "viewed_properties", default)]
    pub viewed_properties: Vec<PropertyView>,
    #[serde(default)]
    pub budget: f64,
    /// Free-text purchase timeline, scanned for urgency keywords
    #[serde(default)]
    pub timeline: String,
}

/// A single tracked interaction (email open, call, site visit, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadActivity {
    #[serde(rename = "activityType", alias = "activity_type")]
    pub activity_type: String,
    #[serde(rename = "occurredAt", alias = "occurred_at", default)]
    pub occurred_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// A property-detail view with dwell time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyView {
    #[serde(rename = "propertyId", alias = "property_id")]
    pub property_id: String,
    #[serde(default)]
    pub price: f64,
    /// Seconds spent on the listing
    #[serde(rename = "viewTime", alias = "view_time", default)]
    pub view_time: f64,
}

/// Result of analyzing one (lead, property) pairing
///
/// Computed on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    #[serde(rename = "leadId")]
    pub lead_id: String,
    #[serde(rename = "propertyId")]
    pub property_id: String,
    /// 0-100, higher is a stronger match
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    pub analysis: String,
}

/// Priority score for a lead with its per-factor breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadScore {
    #[serde(rename = "leadId")]
    pub lead_id: String,
    /// 0-1, higher means contact sooner
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// The five weighted sub-scores, each in 0-1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "responseTime")]
    pub response_time: f64,
    #[serde(rename = "engagementLevel")]
    pub engagement_level: f64,
    #[serde(rename = "propertyInterest")]
    pub property_interest: f64,
    #[serde(rename = "budgetAlignment")]
    pub budget_alignment: f64,
    pub timeline: f64,
}

/// Scoring weights, expected to sum to 1.0 so all-neutral signals land on 0.5
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub response_time: f64,
    pub engagement: f64,
    pub property_interest: f64,
    pub budget_alignment: f64,
    pub timeline: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            response_time: 0.30,
            engagement: 0.20,
            property_interest: 0.20,
            budget_alignment: 0.15,
            timeline: 0.15,
        }
    }
}

/// Appointment details handed to the scheduling collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(rename = "leadId", alias = "lead_id")]
    pub lead_id: String,
    #[serde(rename = "leadName", alias = "lead_name")]
    pub lead_name: String,
    #[serde(rename = "leadEmail", alias = "lead_email")]
    pub lead_email: String,
    #[serde(rename = "scheduledTime", alias = "scheduled_time")]
    pub scheduled_time: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "propertyAddress", alias = "property_address")]
    pub property_address: String,
    #[serde(rename = "propertyTitle", alias = "property_title", default)]
    pub property_title: String,
}
