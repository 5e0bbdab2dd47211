mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::core::{LeadScorer, MessageGenerator, Pipeline, PipelineOptions, RecommendationEngine};
use crate::models::ScoringWeights;
use crate::routes::intake::AppState;
use crate::services::{CalendlyClient, CompletionClient, FollowUpClient};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Haven Algo lead matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize collaborator clients
    let assistant = Arc::new(CompletionClient::new(
        settings.assistant.endpoint,
        settings.assistant.api_key,
        settings.assistant.model,
    ));
    let notifier = Arc::new(FollowUpClient::new(
        settings.followup.base_url,
        settings.followup.api_key,
    ));
    let scheduler = Arc::new(CalendlyClient::new(
        settings.calendly.base_url,
        settings.calendly.api_key,
    ));

    info!("Collaborator clients initialized");

    // Initialize the recommendation engine and scorer
    let engine = Arc::new(RecommendationEngine::new());

    let weights = ScoringWeights {
        response_time: settings.scoring.weights.response_time,
        engagement: settings.scoring.weights.engagement,
        property_interest: settings.scoring.weights.property_interest,
        budget_alignment: settings.scoring.weights.budget_alignment,
        timeline: settings.scoring.weights.timeline,
    };
    let scorer = LeadScorer::new(weights);

    info!("Scorer initialized with weights: {:?}", weights);

    // Build the pipeline
    let defaults = PipelineOptions::default();
    let options = PipelineOptions {
        match_threshold: settings.matching.match_threshold.unwrap_or(defaults.match_threshold),
        analysis_concurrency: settings
            .matching
            .analysis_concurrency
            .unwrap_or(defaults.analysis_concurrency),
        default_recommendations: settings
            .matching
            .default_recommendations
            .unwrap_or(defaults.default_recommendations),
    };

    let pipeline = Arc::new(Pipeline::new(
        engine,
        scorer,
        MessageGenerator::new(),
        assistant,
        notifier,
        scheduler,
        options,
    ));

    let app_state = AppState { pipeline };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
