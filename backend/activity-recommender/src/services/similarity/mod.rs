//! Similarity Ranking Module
//!
//! Builds a user profile as the engagement-weighted mean of the normalized
//! feature rows the user interacted with, then ranks every unseen activity by
//! cosine similarity to that profile.

use super::engagement::EngagementScores;
use super::features::{ActivityFeatures, FEATURE_DIM};
use crate::models::{Activity, Recommendation};
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// Norms below this are treated as zero vectors
const NORM_EPSILON: f64 = 1e-12;

/// Weighted mean of engaged feature rows
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub vector: Array1<f64>,
    /// Engaged activities that matched the catalogue
    pub matched: usize,
    pub total_weight: u64,
}

/// Cosine of the angle between two vectors, 0.0 if either has zero norm.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a < NORM_EPSILON || norm_b < NORM_EPSILON {
        return 0.0;
    }

    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker;

impl SimilarityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when no engaged activity is present in the catalogue.
    pub fn build_profile(
        &self,
        scores: &EngagementScores,
        features: &ActivityFeatures,
    ) -> Option<UserProfile> {
        // Dangling ids are skipped
        let mut engaged_rows: Vec<(usize, u32)> = scores
            .iter()
            .filter_map(|(activity_id, score)| Some((features.row_of(activity_id)?, score)))
            .collect();

        // Summation order must not depend on map iteration order
        engaged_rows.sort_unstable_by_key(|&(row, _)| row);

        let mut weighted_sum = Array1::<f64>::zeros(FEATURE_DIM);
        let mut total_weight: u64 = 0;
        let matched = engaged_rows.len();

        for (row, score) in engaged_rows {
            weighted_sum.scaled_add(score as f64, &features.normalized_row(row));
            total_weight += u64::from(score);
        }

        if matched == 0 || total_weight == 0 {
            return None;
        }

        Some(UserProfile {
            vector: weighted_sum / total_weight as f64,
            matched,
            total_weight,
        })
    }

    /// Ranks catalogue rows whose id is not an engagement key.
    ///
    /// Sorting is stable, so equal scores keep catalogue order.
    pub fn rank(
        &self,
        profile: &UserProfile,
        scores: &EngagementScores,
        activities: &[Activity],
        features: &ActivityFeatures,
        top_n: usize,
    ) -> Vec<Recommendation> {
        let mut ranked: Vec<(usize, f64)> = activities
            .iter()
            .enumerate()
            .filter(|(_, activity)| !scores.contains(&activity.id))
            .map(|(row, _)| {
                (
                    row,
                    cosine_similarity(profile.vector.view(), features.normalized_row(row)),
                )
            })
            .collect();

        let unseen = ranked.len();

        // Scores are never NaN (zero-norm guard above)
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_n);

        debug!(
            profile_rows = profile.matched,
            unseen,
            returned = ranked.len(),
            top_score = ranked.first().map(|(_, score)| *score),
            "Ranked activities by profile similarity"
        );

        ranked
            .into_iter()
            .map(|(row, similarity_score)| Recommendation {
                id: activities[row].id.clone(),
                owner_id: activities[row].owner_id.clone(),
                age_days: features.age_days[row],
                similarity_score,
                is_public: activities[row].is_public,
            })
            .collect()
    }
}
