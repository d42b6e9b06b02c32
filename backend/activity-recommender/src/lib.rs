pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use services::{
    ColdStartStrategy, EngineConfig, RecommendError, RecommendationEngine, RecommendationOutcome,
    RecommendationQuery,
};
