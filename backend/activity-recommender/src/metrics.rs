use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter_vec, Encoder, Histogram,
    HistogramVec, IntCounterVec, TextEncoder,
};
use std::time::Duration;

lazy_static! {
    /// Recommendation requests segmented by path (personalized, cold_start, error).
    pub static ref RECOMMENDATION_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "recommendation_requests_total",
        "Total recommendation requests segmented by serving path",
        &["path"]
    )
    .expect("failed to register recommendation_requests_total");

    /// Engine latency segmented by path.
    pub static ref RECOMMENDATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "recommendation_duration_seconds",
        "Recommendation computation duration segmented by serving path",
        &["path"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("failed to register recommendation_duration_seconds");

    /// Number of recommendations returned per request.
    pub static ref RECOMMENDATION_RESULT_SIZE: Histogram = register_histogram!(
        "recommendation_result_size",
        "Number of recommendations returned per request",
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 500.0]
    )
    .expect("failed to register recommendation_result_size");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingPath {
    Personalized,
    ColdStart,
    Error,
}

impl ServingPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingPath::Personalized => "personalized",
            ServingPath::ColdStart => "cold_start",
            ServingPath::Error => "error",
        }
    }

    pub fn from_reused_content(reused_content: bool) -> Self {
        if reused_content {
            ServingPath::ColdStart
        } else {
            ServingPath::Personalized
        }
    }
}

pub fn observe_recommendation(path: ServingPath, elapsed: Duration, result_size: Option<usize>) {
    RECOMMENDATION_REQUESTS_TOTAL
        .with_label_values(&[path.as_str()])
        .inc();
    RECOMMENDATION_DURATION_SECONDS
        .with_label_values(&[path.as_str()])
        .observe(elapsed.as_secs_f64());
    if let Some(size) = result_size {
        RECOMMENDATION_RESULT_SIZE.observe(size as f64);
    }
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
