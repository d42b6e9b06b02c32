/// Recommendation API Handlers
///
/// HTTP endpoints for per-user activity recommendations
use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::metrics::{observe_recommendation, ServingPath};
use crate::models::{RecommendationRequest, RecommendationResponse};
use crate::services::{ColdStartStrategy, RecommendationEngine, RecommendationQuery};

/// Shared handler state, read-only after startup
pub struct RecommendationHandlerState {
    pub engine: Arc<RecommendationEngine>,
    pub service_name: String,
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub default_strategy: ColdStartStrategy,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub message: String,
    pub status: &'static str,
}

/// GET /
#[get("/")]
pub async fn service_status(state: web::Data<RecommendationHandlerState>) -> HttpResponse {
    HttpResponse::Ok().json(ServiceStatus {
        message: format!("{} API", state.service_name),
        status: "running",
    })
}

/// POST /recommendations
///
/// Request body: the full activity catalogue plus the user's likes, views and
/// comments. `top_n` defaults to 10, `cold_start_strategy` to "popular".
///
/// Response:
/// ```json
/// {
///   "userId": "user-1",
///   "recommendations": [
///     { "id": "act-9", "owner_id": "user-4", "age_days": 2,
///       "similarity_score": 0.93, "is_public": true }
///   ],
///   "reusedContent": false,
///   "count": 1
/// }
/// ```
#[post("/recommendations")]
pub async fn get_recommendations(
    state: web::Data<RecommendationHandlerState>,
    body: web::Json<RecommendationRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;

    let top_n = request.top_n.unwrap_or(state.default_top_n);
    if top_n > state.max_top_n {
        return Err(AppError::ValidationError(format!(
            "top_n must be at most {}, got {}",
            state.max_top_n, top_n
        )));
    }

    let cold_start_strategy = request
        .cold_start_strategy
        .as_deref()
        .map(ColdStartStrategy::normalize)
        .unwrap_or(state.default_strategy);

    debug!(
        user_id = %request.user_id,
        activities = request.activities.len(),
        views = request.views.len(),
        likes = request.likes.len(),
        comments = request.comments.len(),
        top_n,
        strategy = %cold_start_strategy,
        "Recommendation request"
    );

    let query = RecommendationQuery {
        user_id: &request.user_id,
        activities: &request.activities,
        views: &request.views,
        likes: &request.likes,
        comments: &request.comments,
        top_n,
        cold_start_strategy,
    };

    let started = Instant::now();
    let outcome = match state.engine.recommend(query) {
        Ok(outcome) => outcome,
        Err(err) => {
            observe_recommendation(ServingPath::Error, started.elapsed(), None);
            return Err(err.into());
        }
    };

    observe_recommendation(
        ServingPath::from_reused_content(outcome.reused_content),
        started.elapsed(),
        Some(outcome.count()),
    );

    let response = RecommendationResponse::new(
        request.user_id,
        outcome.recommendations,
        outcome.reused_content,
    );

    Ok(HttpResponse::Ok().json(response))
}
