//! Recommendation Engine
//!
//! Orchestrates one recommendation call:
//! aggregate -> build features -> (cold start | similarity) -> top N.
//!
//! The engine holds only read-only configuration; every intermediate structure
//! lives for the duration of a single call.

use super::cold_start::{ColdStartSelector, ColdStartStrategy};
use super::engagement::EngagementAggregator;
use super::features::FeatureBuilder;
use super::similarity::SimilarityRanker;
use super::Result;
use crate::models::{Activity, EngagementEvent, Recommendation};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Order the `popular` cold start by engagement across all users in the
    /// request instead of by recency alone.
    pub popular_from_engagement: bool,
}

/// Inputs for a single call, borrowed from the request
#[derive(Debug, Clone, Copy)]
pub struct RecommendationQuery<'a> {
    pub user_id: &'a str,
    pub activities: &'a [Activity],
    pub views: &'a [EngagementEvent],
    pub likes: &'a [EngagementEvent],
    pub comments: &'a [EngagementEvent],
    pub top_n: usize,
    pub cold_start_strategy: ColdStartStrategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<Recommendation>,
    /// True when the cold start path produced the list
    pub reused_content: bool,
}

impl RecommendationOutcome {
    pub fn count(&self) -> usize {
        self.recommendations.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: EngineConfig,
    aggregator: EngagementAggregator,
    feature_builder: FeatureBuilder,
    cold_start: ColdStartSelector,
    ranker: SimilarityRanker,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn recommend(&self, query: RecommendationQuery<'_>) -> Result<RecommendationOutcome> {
        let scores = self.aggregator.aggregate_for_user(
            query.user_id,
            query.views,
            query.likes,
            query.comments,
        );

        // Validates the catalogue (non-empty, parseable timestamps) on both paths
        let features = self.feature_builder.build(query.activities)?;

        let Some(profile) = self.ranker.build_profile(&scores, &features) else {
            let popularity = (self.config.popular_from_engagement
                && query.cold_start_strategy == ColdStartStrategy::Popular)
                .then(|| {
                    self.aggregator
                        .aggregate_all(query.views, query.likes, query.comments)
                });

            let recommendations = self.cold_start.select(
                query.activities,
                &features,
                query.cold_start_strategy,
                query.top_n,
                popularity.as_ref(),
            );

            info!(
                user_id = %query.user_id,
                strategy = %query.cold_start_strategy,
                engaged_keys = scores.len(),
                count = recommendations.len(),
                "Served cold start recommendations"
            );

            return Ok(RecommendationOutcome {
                recommendations,
                reused_content: true,
            });
        };

        let recommendations =
            self.ranker
                .rank(&profile, &scores, query.activities, &features, query.top_n);

        info!(
            user_id = %query.user_id,
            profile_rows = profile.matched,
            count = recommendations.len(),
            "Served personalized recommendations"
        );

        Ok(RecommendationOutcome {
            recommendations,
            reused_content: false,
        })
    }
}
