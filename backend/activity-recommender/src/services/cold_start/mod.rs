// ============================================
// Cold Start Selector
// ============================================
//
// Fallback ranking for users without usable engagement history.
//
// Strategies (public activities only):
// - newest:  created_at descending
// - popular: catalogue-wide engagement descending, then newest; identical to
//            newest when no popularity counts are supplied
// - random:  uniform sample without replacement, unseeded
//
// Unknown strategy names normalize to newest.

use super::engagement::EngagementScores;
use super::features::ActivityFeatures;
use crate::models::{Activity, Recommendation};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColdStartStrategy {
    Newest,
    Popular,
    Random,
}

impl Default for ColdStartStrategy {
    fn default() -> Self {
        ColdStartStrategy::Popular
    }
}

impl ColdStartStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColdStartStrategy::Newest => "newest",
            ColdStartStrategy::Popular => "popular",
            ColdStartStrategy::Random => "random",
        }
    }

    /// Lenient parse: anything unrecognized becomes `Newest`.
    pub fn normalize(value: &str) -> Self {
        match value.parse() {
            Ok(strategy) => strategy,
            Err(_) => {
                debug!(strategy = %value, "Unknown cold start strategy, using newest");
                ColdStartStrategy::Newest
            }
        }
    }
}

impl FromStr for ColdStartStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(ColdStartStrategy::Newest),
            "popular" => Ok(ColdStartStrategy::Popular),
            "random" => Ok(ColdStartStrategy::Random),
            other => Err(format!("unknown cold start strategy: {}", other)),
        }
    }
}

impl fmt::Display for ColdStartStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColdStartSelector;

impl ColdStartSelector {
    pub fn new() -> Self {
        Self
    }

    pub fn select(
        &self,
        activities: &[Activity],
        features: &ActivityFeatures,
        strategy: ColdStartStrategy,
        top_n: usize,
        popularity: Option<&EngagementScores>,
    ) -> Vec<Recommendation> {
        self.select_with_rng(
            activities,
            features,
            strategy,
            top_n,
            popularity,
            &mut rand::thread_rng(),
        )
    }

    pub fn select_with_rng<R: Rng + ?Sized>(
        &self,
        activities: &[Activity],
        features: &ActivityFeatures,
        strategy: ColdStartStrategy,
        top_n: usize,
        popularity: Option<&EngagementScores>,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        let mut public_rows: Vec<usize> = activities
            .iter()
            .enumerate()
            .filter(|(_, activity)| activity.is_public)
            .map(|(row, _)| row)
            .collect();

        match (strategy, popularity) {
            (ColdStartStrategy::Random, _) => {
                public_rows = public_rows
                    .choose_multiple(rng, top_n.min(public_rows.len()))
                    .copied()
                    .collect();
            }
            (ColdStartStrategy::Popular, Some(popularity)) => {
                // Stable: equal keys keep catalogue order
                public_rows.sort_by_key(|&row| {
                    (
                        Reverse(popularity.get(&activities[row].id).unwrap_or(0)),
                        Reverse(features.created_at[row]),
                    )
                });
            }
            _ => {
                public_rows.sort_by_key(|&row| Reverse(features.created_at[row]));
            }
        }

        public_rows.truncate(top_n);

        debug!(
            strategy = %strategy,
            selected = public_rows.len(),
            "Selected cold start activities"
        );

        public_rows
            .into_iter()
            .map(|row| Recommendation {
                id: activities[row].id.clone(),
                owner_id: activities[row].owner_id.clone(),
                age_days: features.age_days[row],
                similarity_score: 0.0,
                is_public: true,
            })
            .collect()
    }
}
