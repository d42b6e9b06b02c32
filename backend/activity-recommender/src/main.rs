use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use activity_recommender::handlers::{self, RecommendationHandlerState};
use activity_recommender::{Config, RecommendationEngine};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        "Starting {} v{}",
        config.service_name,
        env!("CARGO_PKG_VERSION")
    );
    info!(
        environment = %config.app_env,
        default_top_n = config.default_top_n,
        max_top_n = config.max_top_n,
        default_strategy = %config.cold_start_strategy(),
        popular_from_engagement = config.popular_from_engagement,
        "Configuration loaded"
    );

    let engine = Arc::new(RecommendationEngine::new(config.engine_config()));

    let state = web::Data::new(RecommendationHandlerState {
        engine,
        service_name: config.service_name.clone(),
        default_top_n: config.default_top_n,
        max_top_n: config.max_top_n,
        default_strategy: config.cold_start_strategy(),
    });

    let json_limit = config.json_payload_limit_bytes;
    let bind_address = config.bind_address();
    info!("HTTP server listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(state.clone())
            .app_data(handlers::json_config(json_limit))
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
