use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::AppointmentRequest;
use crate::services::Scheduler;

/// Errors that can occur when booking appointments
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// Calendar-booking client
///
/// Creates a one-hour scheduling link for a showing or consultation. The
/// pipeline only advances a lead to scheduled status when this reports
/// success.
pub struct CalendlyClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CalendlyClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }
}

#[async_trait]
impl Scheduler for CalendlyClient {
    async fn schedule_appointment(
        &self,
        appointment: &AppointmentRequest,
    ) -> Result<(), ScheduleError> {
        let url = format!("{}/scheduling_links", self.base_url.trim_end_matches('/'));

        let payload = serde_json::json!({
            "start_time": appointment.scheduled_time.to_rfc3339(),
            "end_time": (appointment.scheduled_time + chrono::Duration::hours(1)).to_rfc3339(),
            "event_type": "property_showing",
            "location": appointment.property_address,
            "invitees": [{
                "email": appointment.lead_email,
                "name": appointment.lead_name,
            }],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScheduleError::ApiError(format!(
                "Failed to create scheduling link: {}",
                response.status()
            )));
        }

        tracing::debug!("Scheduled appointment for lead {}", appointment.lead_id);

        Ok(())
    }
}
