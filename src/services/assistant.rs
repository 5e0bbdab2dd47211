use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::{LeadRecord, MatchAnalysis, PropertyRecord};
use crate::services::Assistant;

/// Errors that can occur when calling the text-completion API
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Chat-completion API client
///
/// Talks to an OpenAI-compatible `/chat/completions` endpoint. The pipeline
/// treats every call as best-effort and falls back on failure.
pub struct CompletionClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl CompletionClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, AssistantError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::ApiError(format!(
                "Completion request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| AssistantError::InvalidResponse("Missing completion content".into()))
    }
}

#[async_trait]
impl Assistant for CompletionClient {
    async fn enhance_property_description(
        &self,
        property: &PropertyRecord,
    ) -> Result<String, AssistantError> {
        let prompt = format!(
            "Create an engaging property description for a real estate listing with the following details:\n\
             Title: {}\n\
             Price: ${}\n\
             Location: {}\n\
             Bedrooms: {}\n\
             Bathrooms: {}\n\
             Square Feet: {}\n\
             Current Description: {}\n\n\
             Create a compelling description that highlights the property's best features and appeals to potential buyers.\n\
             Include details about the neighborhood, lifestyle benefits, and unique selling points.",
            property.title,
            property.price,
            property.location,
            property.bedrooms,
            property.bathrooms,
            property.square_feet,
            property.description,
        );

        self.complete("You are a professional real estate copywriter.", &prompt, 0.7, 500)
            .await
    }

    async fn generate_lead_response(
        &self,
        lead: &LeadRecord,
        property: Option<&PropertyRecord>,
    ) -> Result<String, AssistantError> {
        let preferences = serde_json::to_string(&lead.preferences).unwrap_or_default();
        let mut prompt = format!(
            "Create a personalized response for a potential real estate client with the following details:\n\
             Name: {}\n\
             Preferences: {}\n\
             Status: {:?}\n",
            lead.name, preferences, lead.status,
        );

        if let Some(property) = property {
            prompt.push_str(&format!(
                "Property of Interest:\n\
                 Title: {}\n\
                 Price: ${}\n\
                 Location: {}\n",
                property.title, property.price, property.location,
            ));
        }

        prompt.push_str(
            "Create a friendly, professional response that:\n\
             1. Acknowledges their interest\n\
             2. Addresses their specific preferences\n\
             3. Offers to help them find the perfect property\n\
             4. Includes a clear call to action",
        );

        self.complete("You are a professional real estate agent assistant.", &prompt, 0.7, 300)
            .await
    }

    async fn analyze_property_match(
        &self,
        lead: &LeadRecord,
        property: &PropertyRecord,
    ) -> Result<MatchAnalysis, AssistantError> {
        let preferences = serde_json::to_string(&lead.preferences).unwrap_or_default();
        let prompt = format!(
            "Analyze how well this property matches the lead's preferences:\n\n\
             Lead Preferences:\n{}\n\n\
             Property Details:\n\
             Title: {}\n\
             Price: ${}\n\
             Location: {}\n\
             Bedrooms: {}\n\
             Bathrooms: {}\n\
             Square Feet: {}\n\
             Description: {}\n\n\
             Provide a detailed analysis including:\n\
             1. Match score (0-100)\n\
             2. Key matching features\n\
             3. Potential concerns\n\
             4. Recommendations for follow-up",
            preferences,
            property.title,
            property.price,
            property.location,
            property.bedrooms,
            property.bathrooms,
            property.square_feet,
            property.description,
        );

        let analysis = self
            .complete("You are a real estate matchmaking expert.", &prompt, 0.3, 500)
            .await?;

        Ok(MatchAnalysis {
            lead_id: lead.id.clone(),
            property_id: property.id.clone(),
            match_score: extract_match_score(&analysis),
            analysis,
        })
    }
}

/// Extract a 0-100 match score from free-form analysis text
///
/// Takes the first one-to-three digit number, clamped to 0-100. Missing or
/// garbled scores default to a neutral 50 rather than failing the caller.
pub fn extract_match_score(analysis: &str) -> u8 {
    static SCORE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SCORE_RE.get_or_init(|| Regex::new(r"\b\d{1,3}\b").expect("valid score pattern"));

    re.find(analysis)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(|score| score.min(100) as u8)
        .unwrap_or(50)
}
