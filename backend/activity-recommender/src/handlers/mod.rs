pub mod recommendations;

// Re-export handlers for convenience
pub use recommendations::{
    get_recommendations, service_status, RecommendationHandlerState, ServiceStatus,
};

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::metrics::serve_metrics;

/// JSON extractor config; malformed bodies become 400 responses.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            AppError::BadRequest(err.to_string()).into()
        })
}

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| async { "OK" }))
        .route("/metrics", web::get().to(serve_metrics))
        .service(service_status)
        .service(get_recommendations);
}
