/// Recommendation Module
///
/// Content-based filtering over a per-request activity catalogue.
///
/// # Workflow
/// 1. Fold the user's views/likes/comments into per-activity engagement scores
/// 2. Build the standardized feature matrix (owner, visibility, age)
/// 3. Build a weighted user profile from engaged rows
/// 4. Rank unseen activities by cosine similarity to the profile
/// 5. Fall back to a cold-start policy when the profile is empty
pub mod cold_start;
pub mod engagement;
pub mod engine;
pub mod features;
pub mod similarity;

pub use cold_start::{ColdStartSelector, ColdStartStrategy};
pub use engagement::{EngagementAggregator, EngagementScores};
pub use engine::{EngineConfig, RecommendationEngine, RecommendationOutcome, RecommendationQuery};
pub use features::{ActivityFeatures, FeatureBuilder};
pub use similarity::{cosine_similarity, SimilarityRanker, UserProfile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Activity catalogue is empty")]
    EmptyCatalogue,

    #[error("Invalid created_at timestamp for activity {activity_id}: {value:?}")]
    InvalidTimestamp { activity_id: String, value: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
