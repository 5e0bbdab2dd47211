use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::LeadRecord;
use crate::services::Notifier;

/// Errors that can occur when sending CRM notifications
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// CRM messaging client
///
/// Posts automated outreach messages to the follow-up CRM. The pipeline
/// treats delivery as fire-and-forget: a failed send is logged and recorded
/// but never retried.
pub struct FollowUpClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl FollowUpClient {
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
impl Notifier for FollowUpClient {
    async fn send_message(&self, lead: &LeadRecord, message: &str) -> Result<(), NotifyError> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));

        let payload = serde_json::json!({
            "lead_id": lead.id,
            "message": message,
            "type": "email",
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::ApiError(format!(
                "Failed to send message: {}",
                response.status()
            )));
        }

        tracing::debug!("Sent notification to lead {}", lead.id);

        Ok(())
    }
}
