use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{NewLead, Pipeline};
use crate::models::{
    CatalogUpdateResponse, CreateLeadRequest, CreatePropertyRequest, ErrorResponse,
    HealthResponse, PreviewMessageRequest, PropertyRecord, UpdateLeadStatusRequest,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Configure all pipeline routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/properties", web::post().to(create_property))
        .route("/catalog", web::put().to(replace_catalog))
        .route("/leads", web::post().to(create_lead))
        .route("/leads/prioritized", web::get().to(prioritized_leads))
        .route("/leads/{id}/status", web::put().to(update_lead_status))
        .route("/leads/{id}/score", web::get().to(get_lead_score))
        .route("/showings", web::post().to(schedule_showing))
        .route("/messages/preview", web::post().to(preview_message));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.pipeline.engine().catalog_size(),
        leads: state.pipeline.lead_count(),
    })
}

/// Ingest a new property listing
///
/// POST /api/v1/properties
///
/// Runs the full new-property workflow: description enhancement, catalog
/// extension, lead matching and outreach.
async fn create_property(
    state: web::Data<AppState>,
    req: web::Json<CreatePropertyRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let property = PropertyRecord {
        id: req.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        title: req.title,
        description: req.description,
        price: req.price,
        location: req.location,
        property_type: req.property_type,
        bedrooms: req.bedrooms,
        bathrooms: req.bathrooms,
        square_feet: req.square_feet,
        features: req.features,
        available: true,
    };

    tracing::info!("Processing new property {}", property.id);

    match state.pipeline.process_new_property(property).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            tracing::error!("Outreach template failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Template failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Replace the entire recommendation catalog
///
/// PUT /api/v1/catalog
///
/// The body must carry the complete desired catalog; this is a full
/// replace, not a merge.
async fn replace_catalog(
    state: web::Data<AppState>,
    req: web::Json<Vec<PropertyRecord>>,
) -> impl Responder {
    state.pipeline.engine().update_catalog(req.into_inner());

    HttpResponse::Ok().json(CatalogUpdateResponse {
        catalog_size: state.pipeline.engine().catalog_size(),
    })
}

/// Ingest a new lead
///
/// POST /api/v1/leads
async fn create_lead(
    state: web::Data<AppState>,
    req: web::Json<CreateLeadRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_lead request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let intake = NewLead {
        name: req.name,
        email: req.email,
        phone: req.phone,
        preferences: req.preferences,
        signals: req.signals,
        schedule_consultation: req.schedule_consultation,
    };

    let outcome = state.pipeline.process_new_lead(intake).await;
    HttpResponse::Ok().json(outcome)
}

/// Move a lead to a new status
///
/// PUT /api/v1/leads/{id}/status
async fn update_lead_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateLeadStatusRequest>,
) -> impl Responder {
    let lead_id = path.into_inner();

    if state.pipeline.update_lead_status(&lead_id, req.status) {
        HttpResponse::Ok().json(serde_json::json!({
            "leadId": lead_id,
            "status": req.status,
        }))
    } else {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "Lead not found".to_string(),
            message: format!("No lead with id {}", lead_id),
            status_code: 404,
        })
    }
}

/// Priority score for one lead
///
/// GET /api/v1/leads/{id}/score
async fn get_lead_score(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let lead_id = path.into_inner();

    match state.pipeline.lead_score(&lead_id) {
        Some(score) => HttpResponse::Ok().json(score),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "Lead not found".to_string(),
            message: format!("No lead with id {}", lead_id),
            status_code: 404,
        }),
    }
}

/// All leads ordered by descending priority
///
/// GET /api/v1/leads/prioritized
async fn prioritized_leads(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.pipeline.prioritized_leads())
}

/// Schedule a property showing
///
/// POST /api/v1/showings
async fn schedule_showing(
    state: web::Data<AppState>,
    req: web::Json<crate::models::AppointmentRequest>,
) -> impl Responder {
    match state.pipeline.schedule_showing(req.into_inner()).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            tracing::error!("Confirmation template failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Template failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Render an outreach message for a scenario
///
/// POST /api/v1/messages/preview
async fn preview_message(
    state: web::Data<AppState>,
    req: web::Json<PreviewMessageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.pipeline.render_message(&req.scenario, &req.context) {
        Ok(message) => HttpResponse::Ok().json(crate::models::PreviewMessageResponse {
            scenario: req.scenario.clone(),
            message,
        }),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Template failure".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}
