use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
    pub leads: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response after a full catalog replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogUpdateResponse {
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Rendered outreach message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewMessageResponse {
    pub scenario: String,
    pub message: String,
}
