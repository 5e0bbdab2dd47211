use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use validator::Validate;

use crate::models::domain::{LeadSignals, LeadStatus};

/// Request to ingest a new property listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    /// Listing identifier; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[validate(length(min = 1))]
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
}

/// Request to ingest a new lead
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub preferences: Map<String, Value>,
    #[serde(default)]
    pub signals: LeadSignals,
    #[serde(rename = "scheduleConsultation", alias = "schedule_consultation", default)]
    pub schedule_consultation: bool,
}

/// Request to move a lead to a new status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

/// Request to render an outreach message from a template scenario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewMessageRequest {
    #[validate(length(min = 1))]
    pub scenario: String,
    #[serde(default)]
    pub context: HashMap<String, String>,
}
